mod scheduler_test;

use cp_testutils::make_fake_api_server;

use crate::scheduler::Scheduler;

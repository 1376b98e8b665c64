
use cp_testutils::make_fake_api_server;

use crate::agent::{
    register,
    Agent,
};

mod cli_test;

use super::*;

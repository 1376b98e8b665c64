use cp_api::v1::{
    Node,
    Pod,
};
use rstest::fixture;

use crate::constants::*;

#[fixture]
pub fn test_pod(#[default(TEST_POD_NAME.into())] name: String) -> Pod {
    Pod::new(TEST_NAMESPACE, name, TEST_IMAGE)
}

#[fixture]
pub fn test_node(#[default(TEST_NODE_NAME.into())] name: String) -> Node {
    Node::new(name, TEST_NODE_ADDRESS)
}

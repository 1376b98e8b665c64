pub const TEST_NAMESPACE: &str = "default";
pub const TEST_NODE_NAME: &str = "test-node";
pub const TEST_NODE_ADDRESS: &str = "http://test-node:8081";
pub const TEST_POD_NAME: &str = "test-pod";
pub const TEST_IMAGE: &str = "nginx:latest";

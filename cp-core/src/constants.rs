// Namespacing
pub const DEFAULT_NAMESPACE: &str = "default";

// Networking defaults
pub const DEFAULT_API_SERVER_PORT: u16 = 8080;
pub const DEFAULT_API_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_NODE_ADDRESS: &str = "http://localhost:8081";

// Timing
pub const HTTP_CLIENT_TIMEOUT_SECONDS: u64 = 10;
pub const RECONCILE_TICK_SECONDS: u64 = 10;

// Watch fan-out
pub const WATCH_QUEUE_CAPACITY: usize = 100;

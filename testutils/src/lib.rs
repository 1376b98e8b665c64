mod constants;
mod fake;
mod fixtures;

pub use constants::*;
pub use fake::*;
pub use fixtures::*;
pub use rstest::fixture;

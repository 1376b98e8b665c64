pub mod constants;
pub mod errors;
pub mod logging;
pub mod macros;
pub mod time;

pub mod prelude {
    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
}

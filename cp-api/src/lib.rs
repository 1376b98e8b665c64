pub mod client;
pub mod error;
pub mod v1;

pub use client::Client;
pub use error::{
    ApiErrorBody,
    ApiErrorKind,
    ClientError,
};

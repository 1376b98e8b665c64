use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Wire-level classification of a store/API failure, shared between the API server's response
/// bodies and the client's error parsing so both sides agree on what a 404/409/400/500 means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    NotFound,
    AlreadyExists,
    ConflictTerminating,
    InvalidArgument,
    Internal,
}

impl ApiErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ApiErrorKind::NotFound => 404,
            ApiErrorKind::AlreadyExists => 409,
            ApiErrorKind::ConflictTerminating => 409,
            ApiErrorKind::InvalidArgument => 400,
            ApiErrorKind::Internal => 500,
        }
    }
}

/// The JSON body returned alongside a non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub kind: ApiErrorKind,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    pub fn new(kind: ApiErrorKind, error: impl Into<String>) -> ApiErrorBody {
        ApiErrorBody { kind, error: error.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> ApiErrorBody {
        self.detail = Some(detail.into());
        self
    }
}

/// An error from a `Client` call: either we never got a classified response from the API server
/// (transport/parse failure), or we did and it's one of §7's taxonomy members.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not parse API server URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("request to API server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API server returned an error: {}{}", .0.error, .0.detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Api(ApiErrorBody),

    #[error("API server returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl ClientError {
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            ClientError::Api(body) => Some(body.kind),
            _ => None,
        }
    }
}

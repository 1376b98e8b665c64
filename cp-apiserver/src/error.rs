use std::io::Cursor;

use cp_api::{
    ApiErrorBody,
    ApiErrorKind,
};
use cp_store::StoreError;
use rocket::http::{
    ContentType,
    Status,
};
use rocket::response::{
    self,
    Responder,
};
use rocket::{
    Request,
    Response,
};

/// A handler failure, carrying the wire-level classification from §7. Unlike the fixed-status
/// variants a `#[derive(Responder)]` enum gives you, the HTTP status here is picked at runtime
/// from `ApiErrorKind::status_code`, so the `Responder` impl is written by hand.
pub struct ApiError(pub ApiErrorBody);

impl ApiError {
    pub fn invalid_argument(msg: impl Into<String>) -> ApiError {
        ApiError(ApiErrorBody::new(ApiErrorKind::InvalidArgument, msg))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> ApiError {
        ApiError(ApiErrorBody::new(e.api_kind(), e.to_string()))
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
        let status = Status::new(self.0.kind.status_code());
        let body = serde_json::to_vec(&self.0).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

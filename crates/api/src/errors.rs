use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hatedns_domain::{DomainError, ErrorKind};
use tracing::error;

/// Plain-text error responses for the record API.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NXDOMAIN\n".to_string()),
            ErrorKind::MalformedInput | ErrorKind::UnsupportedOperation => {
                (StatusCode::BAD_REQUEST, format!("{}\n", self.0))
            }
            ErrorKind::InternalFault => {
                error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error\n".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::controller::ApiResponse;
use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Translates domain error kinds into HTTP statuses. The body keeps the
// `{"success":false,"message":...}` envelope the frontend expects.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Config) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service is not configured for this operation",
            ),
            DomainErrorKind::Internal(InternalErrorKind::Other(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            DomainErrorKind::External(ExternalErrorKind::Network) => {
                (StatusCode::BAD_GATEWAY, "Upstream service unreachable")
            }
            DomainErrorKind::External(ExternalErrorKind::Other(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

//! Handler errors and their plain-text HTTP replies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bps::kernel::ApiStateError;
use std::borrow::Cow;
use tracing::error;

/// Failures a handler can answer with. Bodies are plain text.
#[bps_derive::bps_error]
pub enum ApiError {
    /// The client sent something the endpoint cannot use; `message` is the reply body.
    #[error("{message}{}", format_context(.context))]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A feature slice the handler needs was never registered.
    #[error("API state error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },
    /// A response body could not be serialized.
    #[error("Response encoding error{}: {source}", format_context(.context))]
    Encoding { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal server error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest { message, .. } => {
                (StatusCode::BAD_REQUEST, message.into_owned()).into_response()
            }
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers turn
//! failures into consistent JSON responses and status codes. Internal
//! errors are redacted before leaving the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::error::{Error, ErrorCode};
use crate::domain::ports::GatewayError;

/// Convenient result alias for JSON handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(err: &Error) -> Error {
    if matches!(err.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        err.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<GatewayError> for Error {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::Unauthorized => Error::unauthorized("authentication expired"),
            GatewayError::Forbidden => Error::forbidden(err.user_message()),
            GatewayError::NotFound => Error::not_found(err.user_message()),
            GatewayError::Rejected { message } => Error::invalid_request(message.clone()),
            GatewayError::Transport { .. }
            | GatewayError::Timeout { .. }
            | GatewayError::Upstream { .. } => Error::upstream(err.user_message()),
            GatewayError::Decode { message } => {
                error!(%message, "undecodable backend response");
                Error::internal("Internal server error")
            }
        }
    }
}

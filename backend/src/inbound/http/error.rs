//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent responses and status
//! codes. Recoverable failures (invalid input, bad credentials) never reach
//! this mapping — handlers turn them into flash-and-redirect flows — so what
//! lands here is the transport-level tail: not-found, unauthorised fallback,
//! and internal errors.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::pages;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self.code() {
            ErrorCode::NotFound => pages::render_not_found(),
            // Do not leak implementation details to clients.
            ErrorCode::InternalError => {
                error!(message = %self.message(), "internal error reached the HTTP surface");
                pages::render_error_page(status, "Internal server error")
            }
            _ => pages::render_error_page(status, self.message()),
        };
        HttpResponse::build(status)
            .content_type(actix_web::http::header::ContentType::html())
            .body(body)
    }
}

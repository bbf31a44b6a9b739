//! HTTP inbound adapter exposing the server-rendered watchlist surface.

pub mod auth;
pub mod error;
pub mod flash;
pub mod guard;
pub mod movies;
pub mod pages;
pub mod session;
pub mod settings;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::http::header;
use actix_web::HttpResponse;

/// Redirect-after-action response used by every mutating handler.
#[must_use]
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// An HTML page response.
#[must_use]
pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(actix_web::http::header::ContentType::html())
        .body(body)
}

//! Response construction.
//!
//! # Responsibilities
//! - Map a composed page to an HTML response with the right status
//! - Provide the security header layers
//!
//! # Design Decisions
//! - Not-found pages are still full HTML documents (root shell + message)
//! - Security headers never overwrite a value set by a handler

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::render::PageStatus;

pub fn html_page(status: PageStatus, document: String) -> Response {
    let code = match status {
        PageStatus::Found => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
    };
    (code, Html(document)).into_response()
}

pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("same-origin"),
        ),
    ]
}

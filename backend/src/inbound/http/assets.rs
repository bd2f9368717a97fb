//! Static assets embedded in the binary.

use actix_web::{HttpResponse, get, mime};

use crate::inbound::http::cache_control;

const STYLESHEET: &str = include_str!("../../../static/style.css");

/// Serve the site stylesheet.
#[get("/static/style.css")]
pub async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(mime::TEXT_CSS_UTF_8)
        .insert_header(cache_control::header(cache_control::STATIC_ASSET))
        .body(STYLESHEET)
}

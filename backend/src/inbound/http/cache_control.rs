//! Shared cache-control policies for HTTP handlers.

use actix_web::http::header::CACHE_CONTROL;

/// Probe responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// Share pages may be cached briefly by browsers and CDNs.
pub const SHARE_PAGE: &str = "public, max-age=300";

/// Embedded static assets change only with a new binary.
pub const STATIC_ASSET: &str = "public, max-age=86400";

/// Build a cache-control header tuple for `policy`.
#[must_use]
pub fn header(policy: &'static str) -> (actix_web::http::header::HeaderName, &'static str) {
    (CACHE_CONTROL, policy)
}

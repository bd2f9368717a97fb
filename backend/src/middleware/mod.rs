//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every page:
//! trace identifiers with access logging, and per-client rate limiting.

pub mod rate_limit;
pub mod trace;

pub use rate_limit::{RateLimit, RateLimiter};
pub use trace::Trace;

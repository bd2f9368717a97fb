//! Contributions card backend.
//!
//! Serves HTML pages summarising a GitHub user's yearly contributions,
//! repository count, and avatar, fetched with one GraphQL query per request.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::{RateLimit, Trace};

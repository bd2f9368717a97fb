//! Inbound adapters that translate external requests into domain calls
//! while keeping framework details at the edge.
//!
//! HTML pages and probes live under [`http`].

pub mod http;

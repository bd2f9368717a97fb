//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **github**: reqwest-backed GraphQL client for contribution summaries
//!
//! Adapters are thin translators between domain types and wire formats.
//! They contain no presentation logic.

pub mod github;

//! GitHub outbound adapters.
//!
//! This module provides the GraphQL implementation of the `ProfileSource`
//! port together with the credential wrapper it authenticates with.

mod dto;
mod graphql_source;
mod token;

pub use graphql_source::{DEFAULT_GRAPHQL_ENDPOINT, GithubGraphqlSource};
pub use token::ApiToken;

//! Runtime configuration loaded via OrthoConfig.
//!
//! Every field can be supplied as a CLI flag, a `CONTRIB_*` environment
//! variable, or a configuration file entry. Accessors apply defaults and
//! validate values so `main` only has to wire the results together.

use std::net::SocketAddr;
use std::num::NonZeroU32;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{ContributionWindow, ContributionWindowError};
use crate::outbound::github::{ApiToken, DEFAULT_GRAPHQL_ENDPOINT};

/// Environment variable consulted when no prefixed token is configured.
pub const LEGACY_TOKEN_ENV: &str = "GH_TOKEN";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while validating configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The GraphQL endpoint is not an absolute URL.
    #[error("invalid GraphQL endpoint {value:?}: {message}")]
    InvalidEndpoint {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// The contribution year cannot be represented.
    #[error(transparent)]
    InvalidYear(#[from] ContributionWindowError),
}

/// Configuration values for the contributions card service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTRIB")]
pub struct Settings {
    /// Token sent as the GraphQL bearer credential.
    pub github_token: Option<String>,
    /// GraphQL endpoint override.
    pub graphql_endpoint: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Calendar year the contributions count covers.
    #[ortho_config(default = 2023)]
    pub contribution_year: i32,
    /// Requests allowed per client per second.
    #[ortho_config(default = 5)]
    pub rate_limit_per_second: u32,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("graphql_endpoint", &self.graphql_endpoint)
            .field("bind_addr", &self.bind_addr)
            .field("contribution_year", &self.contribution_year)
            .field("rate_limit_per_second", &self.rate_limit_per_second)
            .finish()
    }
}

impl Settings {
    /// Return the configured token, falling back to `GH_TOKEN`.
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn api_token(&self) -> Option<ApiToken> {
        self.github_token
            .clone()
            .or_else(|| std::env::var(LEGACY_TOKEN_ENV).ok())
            .map(ApiToken::new)
            .filter(|token| !token.is_empty())
    }

    /// Return the GraphQL endpoint, falling back to the public GitHub API.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidEndpoint`] for unparsable URLs.
    pub fn graphql_endpoint(&self) -> Result<Url, SettingsError> {
        let value = self
            .graphql_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GRAPHQL_ENDPOINT);
        Url::parse(value).map_err(|error| SettingsError::InvalidEndpoint {
            value: value.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|error: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: error.to_string(),
            })
    }

    /// Return the contributions window.
    ///
    /// The year defaults to [`ContributionWindow::PINNED_YEAR`] and is never
    /// derived from the clock.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidYear`] when the year has no UTC
    /// representation.
    pub fn contribution_window(&self) -> Result<ContributionWindow, SettingsError> {
        Ok(ContributionWindow::calendar_year(self.contribution_year)?)
    }

    /// Return the per-client request allowance, never below one.
    #[must_use]
    pub fn rate_limit_per_second(&self) -> NonZeroU32 {
        NonZeroU32::new(self.rate_limit_per_second).unwrap_or(NonZeroU32::MIN)
    }
}

//! Driven port for fetching a contributions summary from upstream.
//!
//! Adapters report precise failure causes so operators can tell a revoked
//! token from a typo in a login. Callers that face visitors go through
//! `ProfileLookup`, which collapses every variant into one outcome.

use async_trait::async_trait;

use crate::domain::{ProfileSummary, Username};

/// Errors surfaced while fetching a profile summary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileSourceError {
    /// Network transport failed before a complete response arrived.
    #[error("profile source transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// Upstream answered with a non-success status.
    #[error("profile source answered status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Body preview or reason.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("profile response decode failed: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
    /// Upstream knows no user with this login.
    #[error("no user found for login {login}")]
    NotFound {
        /// Login that was queried.
        login: String,
    },
}

impl ProfileSourceError {
    /// Build a [`ProfileSourceError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`ProfileSourceError::Status`].
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a [`ProfileSourceError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build a [`ProfileSourceError::NotFound`].
    pub fn not_found(login: impl Into<String>) -> Self {
        Self::NotFound {
            login: login.into(),
        }
    }

    /// Stable label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::NotFound { .. } => "not_found",
        }
    }
}

/// Port for fetching one user's contributions summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the summary for `username`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use contrib_card::domain::Username;
    /// use contrib_card::domain::ports::ProfileSource;
    ///
    /// let username = Username::new("octocat")?;
    /// let summary = source.fetch_profile(&username).await?;
    /// println!("{} contributions", summary.contribution_count());
    /// ```
    async fn fetch_profile(&self, username: &Username)
    -> Result<ProfileSummary, ProfileSourceError>;
}

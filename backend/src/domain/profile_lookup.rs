//! Uniform failure boundary in front of the profile source port.
//!
//! Visitors only ever learn that data for a login is unavailable. The
//! precise cause is logged here and goes no further.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::ProfileSource;
use crate::domain::{Error, ProfileSummary, TraceId, Username};

/// Message shown to visitors whenever a lookup fails.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// The single failure outcome of a profile lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("user data unavailable")]
pub struct ProfileUnavailable;

impl From<ProfileUnavailable> for Error {
    fn from(_: ProfileUnavailable) -> Self {
        Self::not_found(USER_NOT_FOUND_MESSAGE)
    }
}

/// Fetches profile summaries and hides failure detail from callers.
#[derive(Clone)]
pub struct ProfileLookup {
    source: Arc<dyn ProfileSource>,
}

impl ProfileLookup {
    /// Wrap a profile source.
    #[must_use]
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self { source }
    }

    /// Fetch the summary for `username`.
    ///
    /// # Errors
    /// Returns [`ProfileUnavailable`] for every transport, status, or shape
    /// failure reported by the source.
    pub async fn summarise(
        &self,
        username: &Username,
    ) -> Result<ProfileSummary, ProfileUnavailable> {
        let trace_id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
        match self.source.fetch_profile(username).await {
            Ok(summary) => {
                debug!(
                    %username,
                    %trace_id,
                    contributions = summary.contribution_count(),
                    repositories = summary.repository_count(),
                    "profile summary fetched"
                );
                Ok(summary)
            }
            Err(error) => {
                warn!(
                    %username,
                    %trace_id,
                    kind = error.kind(),
                    %error,
                    "profile lookup failed"
                );
                Err(ProfileUnavailable)
            }
        }
    }
}

//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain lookup service and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ProfileLookup;
use crate::domain::ports::ProfileSource;

/// Dependency bundle for page handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Profile lookup with uniform failure semantics.
    pub profiles: ProfileLookup,
}

impl HttpState {
    /// Construct state around a profile source.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use contrib_card::domain::ContributionWindow;
    /// use contrib_card::inbound::http::state::HttpState;
    /// use contrib_card::outbound::github::{ApiToken, GithubGraphqlSource};
    ///
    /// let source = GithubGraphqlSource::new(
    ///     "https://api.github.com/graphql".parse().expect("valid url"),
    ///     ApiToken::new("ghp_example"),
    ///     ContributionWindow::calendar_year(2023).expect("valid year"),
    /// )
    /// .expect("client builds");
    /// let state = HttpState::new(Arc::new(source));
    /// let _profiles = state.profiles.clone();
    /// ```
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self {
            profiles: ProfileLookup::new(source),
        }
    }
}

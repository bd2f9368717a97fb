//! Bearer credential for the GitHub GraphQL API.

use zeroize::Zeroizing;

/// GitHub API token, wiped from memory on drop.
///
/// `Debug` output is redacted so the token never reaches logs.
///
/// # Examples
/// ```
/// use contrib_card::outbound::github::ApiToken;
///
/// let token = ApiToken::new("ghp_example");
/// assert_eq!(format!("{token:?}"), "ApiToken(<redacted>)");
/// ```
#[derive(Clone)]
pub struct ApiToken(Zeroizing<String>);

impl ApiToken {
    /// Wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Token used when none is configured; upstream answers 401.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Whether the token carries no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `Authorization` header value in the form GitHub expects.
    pub(super) fn authorization_value(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("bearer {}", self.0.as_str()))
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

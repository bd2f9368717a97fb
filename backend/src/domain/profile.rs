//! Profile summary value types.
//!
//! A [`ProfileSummary`] is built once per request from the upstream response
//! and discarded after rendering. The unsigned counts and the parsed avatar
//! URL carry the only invariants the summary has.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use url::Url;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// The input was empty once trimmed.
    #[error("username must not be empty")]
    Empty,
}

/// GitHub login entered by a visitor.
///
/// Surrounding whitespace is trimmed; otherwise the value is opaque and sent
/// upstream as typed.
///
/// # Examples
/// ```
/// use contrib_card::domain::Username;
///
/// let username = Username::new("  octocat ").expect("non-empty");
/// assert_eq!(username.as_str(), "octocat");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and wrap a raw login.
    ///
    /// # Errors
    /// Returns [`UsernameValidationError::Empty`] for blank input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the login.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contribution summary for one GitHub user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    avatar_url: Url,
    repository_count: u64,
    contribution_count: u64,
}

impl ProfileSummary {
    /// Assemble a summary from already-validated parts.
    #[must_use]
    pub fn new(avatar_url: Url, repository_count: u64, contribution_count: u64) -> Self {
        Self {
            avatar_url,
            repository_count,
            contribution_count,
        }
    }

    /// Avatar image location.
    #[must_use]
    pub const fn avatar_url(&self) -> &Url {
        &self.avatar_url
    }

    /// Total number of repositories owned by the user.
    #[must_use]
    pub const fn repository_count(&self) -> u64 {
        self.repository_count
    }

    /// Contributions recorded inside the queried window.
    #[must_use]
    pub const fn contribution_count(&self) -> u64 {
        self.contribution_count
    }
}

/// Errors raised while building a [`ContributionWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContributionWindowError {
    /// The year cannot be represented as a UTC timestamp.
    #[error("year {year} is outside the supported calendar range")]
    YearOutOfRange {
        /// Rejected year.
        year: i32,
    },
}

/// Time range the contributions query is scoped to.
///
/// Built from a calendar year: midnight on 1 January through 23:59 on
/// 31 December, both UTC.
///
/// # Examples
/// ```
/// use contrib_card::domain::ContributionWindow;
///
/// let window = ContributionWindow::calendar_year(2023).expect("valid year");
/// assert_eq!(window.from_timestamp(), "2023-01-01T00:00:00Z");
/// assert_eq!(window.to_timestamp(), "2023-12-31T23:59:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionWindow {
    year: i32,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ContributionWindow {
    /// Year the window is pinned to unless configuration says otherwise.
    pub const PINNED_YEAR: i32 = 2023;

    /// Window covering one calendar year.
    ///
    /// # Errors
    /// Returns [`ContributionWindowError::YearOutOfRange`] when the year has
    /// no UTC representation.
    pub fn calendar_year(year: i32) -> Result<Self, ContributionWindowError> {
        let out_of_range = || ContributionWindowError::YearOutOfRange { year };
        let from = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(out_of_range)?;
        let to = Utc
            .with_ymd_and_hms(year, 12, 31, 23, 59, 0)
            .single()
            .ok_or_else(out_of_range)?;
        Ok(Self { year, from, to })
    }

    /// Calendar year covered by the window.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Lower bound as an RFC 3339 timestamp with a `Z` suffix.
    #[must_use]
    pub fn from_timestamp(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Upper bound as an RFC 3339 timestamp with a `Z` suffix.
    #[must_use]
    pub fn to_timestamp(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

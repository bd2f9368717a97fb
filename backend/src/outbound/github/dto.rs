//! DTOs for the GitHub GraphQL wire format.
//!
//! The adapter decodes into these transport DTOs first, then validates them
//! into a `ProfileSummary` in one pass. Any missing key, `null` where an
//! object is expected, negative count, or unparsable avatar URL fails the
//! whole decode.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::ProfileSummary;
use crate::domain::ports::ProfileSourceError;

#[derive(Debug, Serialize)]
pub(super) struct GraphqlRequestDto<'a> {
    pub(super) query: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileResponseDto {
    pub(super) data: Option<ProfileDataDto>,
    #[serde(default)]
    pub(super) errors: Vec<GraphqlErrorDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlErrorDto {
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileDataDto {
    pub(super) user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) avatar_url: String,
    pub(super) repositories: CountDto,
    pub(super) contributions_collection: ContributionsCollectionDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CountDto {
    pub(super) total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContributionsCollectionDto {
    pub(super) contribution_calendar: ContributionCalendarDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContributionCalendarDto {
    pub(super) total_contributions: u64,
}

impl ProfileResponseDto {
    /// Validate the decoded payload into a summary for `login`.
    pub(super) fn into_summary(self, login: &str) -> Result<ProfileSummary, ProfileSourceError> {
        let Some(data) = self.data else {
            return Err(ProfileSourceError::decode(format!(
                "response carried no data{}",
                describe_errors(&self.errors)
            )));
        };
        // GitHub answers 200 with `user: null` plus an error entry for unknown logins.
        let Some(user) = data.user else {
            return Err(ProfileSourceError::not_found(login));
        };
        user.into_summary()
    }
}

impl UserDto {
    fn into_summary(self) -> Result<ProfileSummary, ProfileSourceError> {
        let avatar_url = Url::parse(&self.avatar_url).map_err(|error| {
            ProfileSourceError::decode(format!("invalid avatarUrl {:?}: {error}", self.avatar_url))
        })?;
        Ok(ProfileSummary::new(
            avatar_url,
            self.repositories.total_count,
            self.contributions_collection
                .contribution_calendar
                .total_contributions,
        ))
    }
}

fn describe_errors(errors: &[GraphqlErrorDto]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let joined = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {joined}")
}

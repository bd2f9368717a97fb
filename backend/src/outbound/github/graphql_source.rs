//! Reqwest-backed GitHub GraphQL profile source.
//!
//! This adapter owns transport details only: query construction, the
//! authenticated POST, HTTP error mapping, and JSON decoding into a
//! `ProfileSummary`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use tracing::debug;

use super::ApiToken;
use super::dto::{GraphqlRequestDto, ProfileResponseDto};
use crate::domain::ports::{ProfileSource, ProfileSourceError};
use crate::domain::{ContributionWindow, ProfileSummary, Username};

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("contrib-card/", env!("CARGO_PKG_VERSION"));

/// Profile source that issues one GraphQL POST per lookup.
pub struct GithubGraphqlSource {
    client: Client,
    endpoint: Url,
    token: ApiToken,
    window: ContributionWindow,
}

impl GithubGraphqlSource {
    /// Build a source around a fresh reqwest client.
    ///
    /// The client keeps reqwest's default timeouts.
    /// ```rust,ignore
    /// let window = ContributionWindow::calendar_year(2023)?;
    /// let source = GithubGraphqlSource::new(endpoint, token, window)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        token: ApiToken,
        window: ContributionWindow,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint,
            token,
            window,
        })
    }

    /// Window the contributions count is scoped to.
    #[must_use]
    pub const fn window(&self) -> &ContributionWindow {
        &self.window
    }
}

#[async_trait]
impl ProfileSource for GithubGraphqlSource {
    async fn fetch_profile(
        &self,
        username: &Username,
    ) -> Result<ProfileSummary, ProfileSourceError> {
        let query = build_profile_query(username, &self.window);
        debug!(%username, %query, "sending contributions query");

        let authorization = self.token.authorization_value();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::AUTHORIZATION, authorization.as_str())
            .header(header::ACCEPT, "application/json")
            .json(&GraphqlRequestDto { query: &query })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_profile(username, body.as_ref())
    }
}

fn parse_profile(username: &Username, body: &[u8]) -> Result<ProfileSummary, ProfileSourceError> {
    let decoded: ProfileResponseDto = serde_json::from_slice(body).map_err(|error| {
        ProfileSourceError::decode(format!("invalid GraphQL JSON payload: {error}"))
    })?;
    decoded.into_summary(username.as_str())
}

fn build_profile_query(username: &Username, window: &ContributionWindow) -> String {
    format!(
        r#"query {{
  user(login: "{login}") {{
    avatarUrl,
    repositories(first:1) {{
      totalCount
    }},
    contributionsCollection(
      from: "{from}", to: "{to}") {{
      contributionCalendar {{
        totalContributions
      }}
    }}
  }}
}}"#,
        login = escape_graphql_string(username.as_str()),
        from = window.from_timestamp(),
        to = window.to_timestamp(),
    )
}

fn escape_graphql_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\t' => escaped.push_str(r"\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn map_transport_error(error: reqwest::Error) -> ProfileSourceError {
    ProfileSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProfileSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    ProfileSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Query construction and response decoding.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn window() -> ContributionWindow {
        ContributionWindow::calendar_year(2023).expect("valid year")
    }

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    fn success_body(avatar_url: &str, repos: i64, contributions: i64) -> String {
        serde_json::json!({
            "data": {
                "user": {
                    "avatarUrl": avatar_url,
                    "repositories": { "totalCount": repos },
                    "contributionsCollection": {
                        "contributionCalendar": { "totalContributions": contributions }
                    }
                }
            }
        })
        .to_string()
    }

    #[rstest]
    fn query_embeds_login_and_window(window: ContributionWindow) {
        let query = build_profile_query(&username("octocat"), &window);

        assert!(query.starts_with("query {"), "query: {query}");
        assert!(query.contains(r#"user(login: "octocat")"#), "query: {query}");
        assert!(
            query.contains(r#"from: "2023-01-01T00:00:00Z", to: "2023-12-31T23:59:00Z""#),
            "query should carry the configured window: {query}"
        );
        assert!(query.contains("totalContributions"));
        assert!(query.contains("totalCount"));
        assert!(query.contains("avatarUrl"));
    }

    #[rstest]
    fn query_follows_configured_year() {
        let window = ContributionWindow::calendar_year(2024).expect("valid year");
        let query = build_profile_query(&username("octocat"), &window);
        assert!(query.contains(r#"from: "2024-01-01T00:00:00Z""#), "query: {query}");
    }

    #[rstest]
    fn query_escapes_quotes_in_login(window: ContributionWindow) {
        let query = build_profile_query(&username(r#"evil") { id } x("#), &window);
        assert!(
            query.contains(r#"user(login: "evil\") { id } x(")"#),
            "login must stay inside its string literal: {query}"
        );
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case(r"back\slash", r"back\\slash")]
    #[case("new\nline", r"new\nline")]
    #[case("tab\there", r"tab\there")]
    fn escapes_graphql_string_literals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_graphql_string(raw), expected);
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    #[case::not_found(StatusCode::NOT_FOUND)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY)]
    fn non_success_statuses_map_to_status_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, br#"{"message": "Bad credentials"}"#);
        assert!(
            matches!(
                &error,
                ProfileSourceError::Status { status: code, message }
                    if *code == status.as_u16() && message.contains("Bad credentials")
            ),
            "unexpected error: {error:?}"
        );
    }

    #[rstest]
    fn empty_status_body_falls_back_to_reason() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(error, ProfileSourceError::status(503, "Service Unavailable"));
    }

    #[rstest]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    fn decodes_the_three_summary_fields() {
        let body = success_body("http://x/a.png", 3, 42);

        let summary = parse_profile(&username("ok"), body.as_bytes()).expect("valid payload");

        assert_eq!(summary.avatar_url().as_str(), "http://x/a.png");
        assert_eq!(summary.repository_count(), 3);
        assert_eq!(summary.contribution_count(), 42);
    }

    #[rstest]
    fn null_user_maps_to_not_found() {
        let body = r#"{
            "data": { "user": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User" }]
        }"#;

        let error = parse_profile(&username("ghost"), body.as_bytes()).expect_err("no user");
        assert_eq!(error, ProfileSourceError::not_found("ghost"));
    }

    #[rstest]
    #[case::missing_user_key(r#"{ "data": {} }"#)]
    #[case::missing_data(r#"{ "errors": [{ "message": "Something went wrong" }] }"#)]
    #[case::missing_calendar(
        r#"{ "data": { "user": {
            "avatarUrl": "http://x/a.png",
            "repositories": { "totalCount": 3 },
            "contributionsCollection": {}
        } } }"#
    )]
    #[case::not_json("<html>rate limited</html>")]
    #[case::wrong_type(
        r#"{ "data": { "user": {
            "avatarUrl": "http://x/a.png",
            "repositories": { "totalCount": "three" },
            "contributionsCollection": { "contributionCalendar": { "totalContributions": 42 } }
        } } }"#
    )]
    fn malformed_payloads_fail_without_panicking(#[case] body: &str) {
        let result = parse_profile(&username("ok"), body.as_bytes());
        assert!(result.is_err(), "payload should be rejected: {body}");
    }

    #[rstest]
    fn negative_counts_are_rejected() {
        let body = success_body("http://x/a.png", -1, 42);
        let error = parse_profile(&username("ok"), body.as_bytes()).expect_err("negative count");
        assert!(matches!(error, ProfileSourceError::Decode { .. }), "{error:?}");
    }

    #[rstest]
    fn unparsable_avatar_urls_are_rejected() {
        let body = success_body("not a url", 3, 42);
        let error = parse_profile(&username("ok"), body.as_bytes()).expect_err("bad url");
        assert!(matches!(error, ProfileSourceError::Decode { .. }), "{error:?}");
    }

    #[rstest]
    fn missing_data_reports_graphql_errors() {
        let body = r#"{ "errors": [{ "message": "Bad credentials" }] }"#;
        let error = parse_profile(&username("ok"), body.as_bytes()).expect_err("no data");
        assert_eq!(
            error,
            ProfileSourceError::decode("response carried no data: Bad credentials")
        );
    }
}

//! Behavioural tests for the GitHub GraphQL adapter against a local stub.

#[path = "support/stub_graphql.rs"]
#[allow(dead_code)]
mod stub_graphql;

use contrib_card::domain::Username;
use contrib_card::domain::ports::{ProfileSource, ProfileSourceError};
use rstest::rstest;
use stub_graphql::{StubGraphql, success_body};

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

#[actix_web::test]
async fn decodes_a_successful_response() {
    let stub = StubGraphql::start(200, success_body("http://x/a.png", 3, 42));
    let source = stub.source("ghp_stub");

    let summary = source
        .fetch_profile(&username("ok"))
        .await
        .expect("profile fetched");

    assert_eq!(summary.contribution_count(), 42);
    assert_eq!(summary.repository_count(), 3);
    assert_eq!(summary.avatar_url().as_str(), "http://x/a.png");
    stub.stop().await;
}

#[actix_web::test]
async fn sends_bearer_token_and_scoped_query() {
    let stub = StubGraphql::start(200, success_body("http://x/a.png", 1, 1));
    let source = stub.source("ghp_stub");

    source
        .fetch_profile(&username("octocat"))
        .await
        .expect("profile fetched");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1, "exactly one upstream call per lookup");
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some("bearer ghp_stub"));
    assert!(
        request.query.contains(r#"user(login: "octocat")"#),
        "{}",
        request.query
    );
    assert!(
        request
            .query
            .contains(r#"from: "2023-01-01T00:00:00Z", to: "2023-12-31T23:59:00Z""#),
        "{}",
        request.query
    );
    stub.stop().await;
}

#[rstest]
#[case(401, r#"{"message":"Bad credentials"}"#)]
#[case(500, "")]
#[case(502, "<html>bad gateway</html>")]
#[actix_web::test]
async fn non_success_statuses_fail(#[case] status: u16, #[case] body: &str) {
    let stub = StubGraphql::start(status, body);
    let source = stub.source("ghp_stub");

    let error = source
        .fetch_profile(&username("ok"))
        .await
        .expect_err("status should fail");

    assert!(
        matches!(error, ProfileSourceError::Status { status: got, .. } if got == status),
        "{error:?}"
    );
    stub.stop().await;
}

#[actix_web::test]
async fn missing_user_fails() {
    let stub = StubGraphql::start(
        200,
        r#"{"data":{"user":null},"errors":[{"message":"Could not resolve to a User"}]}"#,
    );
    let source = stub.source("ghp_stub");

    let error = source
        .fetch_profile(&username("ghost"))
        .await
        .expect_err("missing user should fail");

    assert!(
        matches!(error, ProfileSourceError::NotFound { ref login } if login == "ghost"),
        "{error:?}"
    );
    stub.stop().await;
}

#[rstest]
#[case(r#"{"data":{"user":{"avatarUrl":"http://x/a.png"}}}"#)]
#[case("not json at all")]
#[case(r#"{"errors":[{"message":"rate limited"}]}"#)]
#[actix_web::test]
async fn malformed_bodies_fail(#[case] body: &str) {
    let stub = StubGraphql::start(200, body);
    let source = stub.source("ghp_stub");

    let error = source
        .fetch_profile(&username("ok"))
        .await
        .expect_err("malformed body should fail");

    assert!(
        matches!(error, ProfileSourceError::Decode { .. }),
        "{error:?}"
    );
    stub.stop().await;
}

#[actix_web::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    let stub = StubGraphql::start(200, success_body("http://x/a.png", 1, 1));
    let source = stub.source("ghp_stub");
    stub.stop().await;

    let error = source
        .fetch_profile(&username("ok"))
        .await
        .expect_err("stopped stub should fail");

    assert!(
        matches!(error, ProfileSourceError::Transport { .. }),
        "{error:?}"
    );
}

//! In-process stand-in for the GitHub GraphQL endpoint.
//!
//! Binds an ephemeral port, answers every POST with a canned status and
//! body, and records what the adapter sent.

use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use contrib_card::domain::ContributionWindow;
use contrib_card::outbound::github::{ApiToken, GithubGraphqlSource};
use url::Url;

/// One request observed by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub query: String,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

async fn answer(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
    state: web::Data<StubState>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let query = body
        .get("query")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    state
        .seen
        .lock()
        .expect("recorder lock")
        .push(Recorded {
            authorization,
            query,
        });
    HttpResponse::build(state.reply.status)
        .content_type("application/json")
        .body(state.reply.body.clone())
}

/// Running stub server.
pub struct StubGraphql {
    endpoint: Url,
    seen: Arc<Mutex<Vec<Recorded>>>,
    handle: ServerHandle,
}

impl StubGraphql {
    /// Start a stub answering with `status` and `body`.
    pub fn start(status: u16, body: impl Into<String>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply: Reply {
                status: StatusCode::from_u16(status).expect("valid status"),
                body: body.into(),
            },
            seen: Arc::clone(&seen),
        };
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/graphql", web::post().to(answer))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        let endpoint = Url::parse(&format!("http://{addr}/graphql")).expect("stub url");
        Self {
            endpoint,
            seen,
            handle,
        }
    }

    /// Endpoint URL for the adapter.
    pub fn endpoint(&self) -> Url {
        self.endpoint.clone()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().expect("recorder lock").clone()
    }

    /// Build the real adapter against this stub.
    pub fn source(&self, token: &str) -> GithubGraphqlSource {
        GithubGraphqlSource::new(
            self.endpoint(),
            ApiToken::new(token),
            ContributionWindow::calendar_year(2023).expect("valid year"),
        )
        .expect("client builds")
    }

    /// Stop accepting connections.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// GraphQL success body in the upstream shape.
pub fn success_body(avatar_url: &str, repos: i64, contributions: i64) -> String {
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

//! Contributions card entry-point: loads settings, wires the GitHub adapter,
//! and serves the HTML pages.

mod server;

use std::env;
use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contrib_card::inbound::http::health::HealthState;
use contrib_card::outbound::github::{ApiToken, GithubGraphqlSource};
use contrib_card::settings::Settings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let endpoint = settings.graphql_endpoint().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let window = settings.contribution_window().map_err(io::Error::other)?;

    let token = settings.api_token().unwrap_or_else(|| {
        warn!("no GitHub token configured; upstream requests will be rejected");
        ApiToken::empty()
    });

    let source = GithubGraphqlSource::new(endpoint, token, window)
        .map_err(|e| io::Error::other(format!("failed to build GitHub client: {e}")))?;
    info!(
        %bind_addr,
        year = source.window().year(),
        rate_limit = settings.rate_limit_per_second().get(),
        "starting contributions card server"
    );

    let config = ServerConfig::new(
        bind_addr,
        settings.rate_limit_per_second(),
        Arc::new(source),
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

//! HTTP server assembly: middleware order and route registration.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use contrib_card::inbound::http::health::{HealthState, live, ready};
use contrib_card::inbound::http::pages;
use contrib_card::inbound::http::state::HttpState;
use contrib_card::middleware::RateLimiter;
use contrib_card::{RateLimit, Trace};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    limiter: Arc<RateLimiter>,
}

// Trace wraps last so rate-limited responses still carry a trace id.
fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        limiter,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RateLimit::new(limiter))
        .wrap(Trace)
        .configure(pages::configure)
        .service(ready)
        .service(live)
}

/// Bind the page server and mark it ready.
///
/// The limiter is created once here so every worker shares the same
/// per-client windows.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        rate_limit,
        source,
    } = config;
    let http_state = web::Data::new(HttpState::new(source));
    let limiter = Arc::new(RateLimiter::new(rate_limit));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            limiter: Arc::clone(&limiter),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

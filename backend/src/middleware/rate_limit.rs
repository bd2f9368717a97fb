//! Per-client request rate limiting.
//!
//! Clients are keyed by peer IP address and metered by a keyed GCRA limiter
//! from `governor`: each key may burst up to `limit` requests and regains one
//! slot every `1 / limit` seconds. Requests over the allowance are answered
//! with `429 Too Many Requests` before reaching a handler.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::HashMapStateStore;
use governor::{Quota, RateLimiter as Gcra};
use tracing::{debug, warn};

use crate::domain::Error as DomainError;

/// Tracked client count above which idle keys are dropped.
const SWEEP_THRESHOLD: usize = 4_096;
const UNKNOWN_CLIENT: &str = "unknown";

type KeyedGcra<C> =
    Gcra<String, HashMapStateStore<String>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Keyed request limiter shared by every worker.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
///
/// use contrib_card::middleware::RateLimiter;
///
/// let limiter = RateLimiter::new(NonZeroU32::MIN);
/// assert!(limiter.try_acquire("203.0.113.9"));
/// assert!(!limiter.try_acquire("203.0.113.9"));
/// ```
pub struct RateLimiter<C: Clock = DefaultClock> {
    limit: NonZeroU32,
    gcra: KeyedGcra<C>,
}

impl RateLimiter {
    /// Allow `limit` requests per client per second.
    #[must_use]
    pub fn new(limit: NonZeroU32) -> Self {
        Self::with_clock(limit, &DefaultClock::default())
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Allow `limit` requests per client per second, timed by `clock`.
    #[must_use]
    pub fn with_clock(limit: NonZeroU32, clock: &C) -> Self {
        Self {
            limit,
            gcra: Gcra::hashmap_with_clock(Quota::per_second(limit), clock),
        }
    }

    /// Configured allowance per second.
    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    /// Record one request for `client`; returns whether it is admitted.
    pub fn try_acquire(&self, client: &str) -> bool {
        if self.gcra.len() >= SWEEP_THRESHOLD {
            self.sweep();
        }
        self.gcra.check_key(&client.to_owned()).is_ok()
    }

    /// Drop clients whose allowance has fully refilled.
    pub fn sweep(&self) {
        let before = self.gcra.len();
        self.gcra.retain_recent();
        self.gcra.shrink_to_fit();
        debug!(before, after = self.gcra.len(), "swept idle rate limit keys");
    }

    /// Number of clients currently tracked.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.gcra.len()
    }
}

impl<C: Clock> std::fmt::Debug for RateLimiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .field("tracked_clients", &self.gcra.len())
            .finish()
    }
}

/// Middleware rejecting clients that exceed a [`RateLimiter`] allowance.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use contrib_card::middleware::{RateLimit, RateLimiter};
///
/// let limiter = Arc::new(RateLimiter::new(NonZeroU32::MIN));
/// let app = App::new().wrap(RateLimit::new(limiter));
/// ```
#[derive(Debug, Clone)]
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    /// Wrap a shared limiter.
    #[must_use]
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .peer_addr()
            .map_or_else(|| UNKNOWN_CLIENT.to_owned(), |addr| addr.ip().to_string());

        if !self.limiter.try_acquire(&client) {
            warn!(%client, limit = self.limiter.limit().get(), "rate limit exceeded");
            let error = DomainError::too_many_requests("Too many requests, slow down");
            return Box::pin(ready(Ok(req.error_response(error))));
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_boxed_body()) })
    }
}

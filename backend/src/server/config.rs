//! HTTP server configuration object.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use contrib_card::domain::ports::ProfileSource;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rate_limit: NonZeroU32,
    pub(crate) source: Arc<dyn ProfileSource>,
}

impl ServerConfig {
    /// Construct a configuration around the profile source adapter.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        rate_limit: NonZeroU32,
        source: Arc<dyn ProfileSource>,
    ) -> Self {
        Self {
            bind_addr,
            rate_limit,
            source,
        }
    }
}

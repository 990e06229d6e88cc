//! HTTP server configuration object.

use std::net::SocketAddr;

use records_backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything [`super::create_server`] needs besides health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: String,
    pub(crate) db_pool: DbPool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, cors_origin: impl Into<String>, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            cors_origin: cors_origin.into(),
            db_pool,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

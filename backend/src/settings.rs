//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional config file, `RECORDS_*`
//! environment variables, and command-line flags.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Origin of the records UI dev server.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
/// Port the records API has always listened on.
pub const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration for the records server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDS")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to bind.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Browser origin allowed by CORS.
    pub cors_origin: Option<String>,
    /// Apply pending schema migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured CORS origin, defaulting to the UI dev server.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }
}

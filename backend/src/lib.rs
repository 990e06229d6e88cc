//! Student records backend library.
//!
//! Hexagonal layout: `domain` holds the record types, validation, services,
//! and ports; `inbound::http` exposes them over Actix; `outbound::persistence`
//! implements the repository ports with Diesel on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

//! PostgreSQL persistence adapters.
//!
//! Diesel repositories implementing the domain's driven ports over a shared
//! `diesel-async` + `bb8` pool. Row structs and table definitions stay
//! private to this module; adapters translate rows into domain types and
//! Diesel failures into port errors.
//!
//! # Example
//!
//! ```no_run
//! use records_backend::outbound::persistence::{
//!     DbPool, DieselStudentRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/records")).await?;
//! let students = DieselStudentRepository::new(pool);
//! # let _ = students;
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_mark_repository;
mod diesel_student_repository;
mod diesel_subject_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_mark_repository::DieselMarkRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_subject_repository::DieselSubjectRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

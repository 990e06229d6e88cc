//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod persistence;

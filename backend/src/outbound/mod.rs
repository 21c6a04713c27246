//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: process-local repositories for running without a database
//! - **geocoding**: Google Geocoding API client
//! - **password**: Argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod geocoding;
pub mod memory;
pub mod password;
pub mod persistence;

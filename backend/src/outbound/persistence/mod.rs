//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain records, and map database failures
//! onto the port error types. Connections come from a shared `bb8` pool via
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselCampgroundRepository, PoolConfig};
//!
//! let pool = DbPool::connect(&PoolConfig::new("postgres://localhost/yelpcamp")).await?;
//! let campgrounds = DieselCampgroundRepository::new(pool);
//! ```

mod diesel_campground_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod row_conversion;
mod schema;

pub use diesel_campground_repository::DieselCampgroundRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

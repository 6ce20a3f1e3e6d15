//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The room repository runs on `diesel-async` connections pooled by `bb8`.
//! Schema management (embedded migrations) and database provisioning use
//! blocking clients and are driven by the `manage` binary.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal; only domain types cross the adapter boundary.
//!
//! # Example
//!
//! ```no_run
//! use rentomatic::outbound::persistence::{DbPool, DieselRoomRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), rentomatic::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/application")).await?;
//! let repository = DieselRoomRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_room_repository;
mod migrations;
mod models;
mod pool;
mod provisioning;
mod schema;

pub use diesel_room_repository::DieselRoomRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use provisioning::{
    DatabaseName, ProvisionOutcome, ProvisioningError, create_application_database,
};

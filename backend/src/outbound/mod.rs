//! Outbound adapters implementing domain ports.
//!
//! - **memory**: deterministic in-process room storage.
//! - **persistence**: PostgreSQL via Diesel, plus schema provisioning.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;

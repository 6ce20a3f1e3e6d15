//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod rooms;
pub mod state;

pub use error::status_for;

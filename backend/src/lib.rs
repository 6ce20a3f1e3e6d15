//! Room listing service: domain, adapters, configuration, and orchestration.
//!
//! The crate follows a ports-and-adapters layout. [`domain`] owns the room
//! model and the listing use case; [`inbound`] and [`outbound`] adapt it to
//! HTTP and storage; [`settings`] and [`orchestration`] back the binaries.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod orchestration;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;

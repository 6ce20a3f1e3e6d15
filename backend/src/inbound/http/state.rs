//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only depend on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::RoomListQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub rooms: Arc<dyn RoomListQuery>,
}

impl HttpState {
    pub fn new(rooms: Arc<dyn RoomListQuery>) -> Self {
        Self { rooms }
    }
}

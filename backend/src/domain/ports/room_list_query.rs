//! Driving port for listing rooms.
//!
//! Inbound adapters depend on this port rather than on a concrete
//! repository, so the HTTP layer never sees storage errors.

use async_trait::async_trait;

use crate::domain::{ResponseFailure, Room, RoomListRequest};

/// Use-case port for listing rooms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomListQuery: Send + Sync {
    /// List the rooms selected by `request`, or explain why it failed.
    async fn list_rooms(&self, request: RoomListRequest) -> Result<Vec<Room>, ResponseFailure>;
}

//! Room listing use case.
//!
//! The use case depends only on the [`RoomRepository`] port. Invalid requests
//! are answered without touching storage, and storage failures are folded
//! into [`FailureType::SystemError`] so no backend error reaches callers.
//!
//! [`FailureType::SystemError`]: crate::domain::FailureType::SystemError

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RoomListQuery, RoomRepository, RoomRepositoryError};
use crate::domain::{ResponseFailure, Room, RoomListRequest};

/// List rooms matching `request` using `repository`.
///
/// # Examples
/// ```
/// use rentomatic::domain::{RoomListRequest, room_list_use_case};
/// use rentomatic::outbound::memory::InMemoryRoomRepository;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .build()
///     .expect("runtime");
/// let repository = InMemoryRoomRepository::sample();
/// let request = RoomListRequest::from_filters([("price_max", "40")]);
/// let rooms = runtime
///     .block_on(room_list_use_case(&repository, request))
///     .expect("in-memory listing succeeds");
/// assert!(rooms.iter().all(|room| room.price() <= 40));
/// ```
pub async fn room_list_use_case<R>(
    repository: &R,
    request: RoomListRequest,
) -> Result<Vec<Room>, ResponseFailure>
where
    R: RoomRepository + ?Sized,
{
    let filters = match request {
        RoomListRequest::Valid(filters) => filters,
        RoomListRequest::Invalid(invalid) => {
            return Err(ResponseFailure::from_invalid_request(&invalid));
        }
    };

    repository.list(&filters).await.map_err(map_repository_error)
}

fn map_repository_error(error: RoomRepositoryError) -> ResponseFailure {
    ResponseFailure::system_error(error.to_string())
}

/// Room listing service implementing the [`RoomListQuery`] driving port.
pub struct RoomListService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> RoomListService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: ?Sized> Clone for RoomListService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[async_trait]
impl<R> RoomListQuery for RoomListService<R>
where
    R: RoomRepository + ?Sized,
{
    async fn list_rooms(&self, request: RoomListRequest) -> Result<Vec<Room>, ResponseFailure> {
        room_list_use_case(self.repository.as_ref(), request).await
    }
}

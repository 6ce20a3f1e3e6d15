//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod room_list_query;
mod room_repository;

#[cfg(test)]
pub use room_list_query::MockRoomListQuery;
pub use room_list_query::RoomListQuery;
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{RoomRepository, RoomRepositoryError};

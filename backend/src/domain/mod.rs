//! Domain entities, request objects, and use cases.
//!
//! Purpose: define the room listing vocabulary shared by every adapter.
//! Nothing here performs I/O; storage and transport live behind the
//! [`ports`].
//!
//! Public surface:
//! - [`Room`] and [`RoomCode`]: the rentable unit and its identity.
//! - [`RoomFilters`] and [`Bounds`]: the predicate repositories apply.
//! - [`RoomListRequest`]: validated input, or the list of rejected filters.
//! - [`ResponseFailure`] and [`ResponseType`]: the response taxonomy.
//! - [`room_list_use_case`] and [`RoomListService`]: the listing use case.

pub mod ports;
mod response;
mod room;
mod room_filters;
mod room_list_request;
mod room_list_service;

pub use self::response::{
    FailureType, ResponseFailure, ResponseFailureValidationError, ResponseType,
};
pub use self::room::{Room, RoomCode, RoomValidationError};
pub use self::room_filters::{Bounds, RoomFilters};
pub use self::room_list_request::{FilterError, FilterErrorCode, InvalidRequest, RoomListRequest};
pub use self::room_list_service::{RoomListService, room_list_use_case};

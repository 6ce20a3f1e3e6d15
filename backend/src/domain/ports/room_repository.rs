//! Driven port for room storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Room, RoomFilters};

use super::define_port_error;

define_port_error! {
    /// Errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// The backend could not be reached or a connection was lost.
        Connection { message: String } => "room repository unavailable: {message}",
        /// The query failed or returned rows that do not describe a room.
        Query { message: String } => "room repository query failed: {message}",
    }
}

/// Read access to stored rooms.
///
/// Implementations must apply [`RoomFilters`] with the semantics of
/// [`RoomFilters::matches`] so that backends are interchangeable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Return every room matching `filters` in a stable order.
    async fn list(&self, filters: &RoomFilters) -> Result<Vec<Room>, RoomRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        RoomRepositoryError::connection("pool timed out"),
        "room repository unavailable: pool timed out"
    )]
    #[case(
        RoomRepositoryError::query("relation \"room\" does not exist"),
        "room repository query failed: relation \"room\" does not exist"
    )]
    fn errors_describe_the_backend_failure(
        #[case] error: RoomRepositoryError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }
}

//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.
//!
//! Filters are rendered as a single `WHERE` clause of ANDed equality and
//! inclusive range predicates, and rows are returned in `id` order.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{Room, RoomFilters};

use super::models::RoomRow;
use super::pool::{DbPool, PoolError};
use super::schema::room;

/// Diesel-backed implementation of the [`RoomRepository`] port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RoomRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RoomRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "room query failed");
        }
        _ => debug!(%error, "room query failed"),
    }

    match error {
        DieselError::QueryBuilderError(_) => RoomRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RoomRepositoryError::connection("database connection error")
        }
        DieselError::DeserializationError(_) => {
            RoomRepositoryError::query("unexpected room row shape")
        }
        _ => RoomRepositoryError::query("database error"),
    }
}

/// Narrow `$query` with the constraints held by a `Bounds` value.
macro_rules! filter_bounds {
    ($query:ident, $column:expr, $bounds:expr) => {{
        let bounds = $bounds;
        if let Some(value) = bounds.exact() {
            $query = $query.filter($column.eq(value));
        }
        if let Some(min) = bounds.min() {
            $query = $query.filter($column.ge(min));
        }
        if let Some(max) = bounds.max() {
            $query = $query.filter($column.le(max));
        }
    }};
}

/// Build the listing query for `filters`.
pub(crate) fn listing_query(filters: &RoomFilters) -> room::BoxedQuery<'static, Pg> {
    let mut query = room::table.order(room::id.asc()).into_boxed();

    if let Some(code) = filters.code() {
        query = query.filter(room::code.eq(code.to_string()));
    }
    filter_bounds!(query, room::size, filters.size());
    filter_bounds!(query, room::price, filters.price());
    filter_bounds!(query, room::longitude, filters.longitude());
    filter_bounds!(query, room::latitude, filters.latitude());

    query
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn list(&self, filters: &RoomFilters) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = listing_query(filters)
            .load::<RoomRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(rows = rows.len(), "loaded rooms");
        rows.into_iter().map(Room::try_from).collect()
    }
}

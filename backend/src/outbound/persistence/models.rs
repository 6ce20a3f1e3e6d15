//! Internal Diesel row structs.
//!
//! These types never leave the persistence adapter.

use diesel::prelude::*;

use crate::domain::ports::RoomRepositoryError;
use crate::domain::{Room, RoomCode};

/// Row struct for reading from the `room` table.
///
/// Field order follows the column order in `schema.rs`.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct RoomRow {
    pub id: i32,
    pub code: String,
    pub size: Option<i32>,
    pub price: Option<i32>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

fn required<T>(id: i32, column: &str, value: Option<T>) -> Result<T, RoomRepositoryError> {
    value.ok_or_else(|| RoomRepositoryError::query(format!("room {id} has no {column}")))
}

/// Coordinates must be finite so range filters agree with SQL ordering,
/// where `NaN` sorts above every number.
fn finite(id: i32, column: &str, value: Option<f64>) -> Result<f64, RoomRepositoryError> {
    let value = required(id, column, value)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RoomRepositoryError::query(format!(
            "room {id} has a non-finite {column}"
        )))
    }
}

/// Codes are stored in the hyphenated lowercase form that code filters bind,
/// since `varchar` equality is exact.
fn canonical_code(id: i32, code: &str) -> Result<RoomCode, RoomRepositoryError> {
    let parsed =
        RoomCode::new(code).map_err(|err| RoomRepositoryError::query(format!("room {id}: {err}")))?;
    if parsed.to_string() == code {
        Ok(parsed)
    } else {
        Err(RoomRepositoryError::query(format!(
            "room {id}: code {code} is not lowercase hyphenated"
        )))
    }
}

impl TryFrom<RoomRow> for Room {
    type Error = RoomRepositoryError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            id,
            code,
            size,
            price,
            longitude,
            latitude,
        } = row;

        Ok(Self::new(
            canonical_code(id, &code)?,
            required(id, "size", size)?,
            required(id, "price", price)?,
            finite(id, "longitude", longitude)?,
            finite(id, "latitude", latitude)?,
        ))
    }
}

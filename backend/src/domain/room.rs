//! Room data model.
//!
//! A room is the only entity the service exposes. Its `code` is the domain
//! identity; storage adapters may keep surrogate keys of their own but never
//! surface them here.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned when constructing room values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomValidationError {
    EmptyCode,
    InvalidCode,
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "room code must not be empty"),
            Self::InvalidCode => write!(f, "room code must be a valid UUID"),
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// Unique room code stored as a UUID.
///
/// # Examples
/// ```
/// use rentomatic::domain::RoomCode;
///
/// let code = RoomCode::new("f853578c-fc0f-4e65-81b8-566c5dffa35a").expect("valid code");
/// assert_eq!(code.to_string(), "f853578c-fc0f-4e65-81b8-566c5dffa35a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RoomCode(Uuid);

impl RoomCode {
    /// Validate and construct a [`RoomCode`] from its textual form.
    pub fn new(code: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let code = code.as_ref();
        if code.trim().is_empty() {
            return Err(RoomValidationError::EmptyCode);
        }
        if code.trim() != code {
            return Err(RoomValidationError::InvalidCode);
        }
        Uuid::parse_str(code)
            .map(Self)
            .map_err(|_| RoomValidationError::InvalidCode)
    }

    /// Wrap an already parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random code.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated lowercase, matching the `varchar(36)` column.
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RoomCode {
    type Err = RoomValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A rentable room.
///
/// Serialised as `{"code", "size", "price", "longitude", "latitude"}`.
///
/// # Examples
/// ```
/// use rentomatic::domain::{Room, RoomCode};
///
/// let room = Room::new(RoomCode::random(), 215, 39, -0.09998975, 51.75436293);
/// assert_eq!(room.price(), 39);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Room {
    code: RoomCode,
    size: i32,
    price: i32,
    longitude: f64,
    latitude: f64,
}

impl Room {
    /// Build a room from its attributes.
    pub const fn new(code: RoomCode, size: i32, price: i32, longitude: f64, latitude: f64) -> Self {
        Self {
            code,
            size,
            price,
            longitude,
            latitude,
        }
    }

    /// Unique room code.
    pub const fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Floor area in square metres.
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Nightly price.
    pub const fn price(&self) -> i32 {
        self.price
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }
}

//! Request objects for the room listing use case.
//!
//! Raw filters arrive as `name -> value` string pairs (the HTTP adapter
//! strips the `filter_` prefix from query parameters). Validation happens
//! here, before any repository is involved, and collects every problem in
//! one pass so clients can fix all of them at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Bounds, RoomCode, RoomFilters};

const MIN_SUFFIX: &str = "_min";
const MAX_SUFFIX: &str = "_max";

/// Stable machine-readable code describing why a filter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterErrorCode {
    /// The filter name is not recognised.
    UnknownFilter,
    /// The value is not an integer.
    InvalidInteger,
    /// The value is not a finite number.
    InvalidFloat,
    /// The value is not a UUID.
    InvalidUuid,
    /// The `_min` bound exceeds the `_max` bound.
    InvertedRange,
}

/// A single rejected filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterError {
    #[schema(example = "price_min")]
    parameter: String,
    code: FilterErrorCode,
    #[schema(example = "price_min must be an integer")]
    message: String,
}

impl FilterError {
    fn new(parameter: impl Into<String>, code: FilterErrorCode, message: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            code,
            message: message.into(),
        }
    }

    /// Filter name as supplied by the caller.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

/// A request that failed validation.
///
/// ## Invariants
/// - `errors` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequest {
    errors: Vec<FilterError>,
}

impl InvalidRequest {
    pub fn errors(&self) -> &[FilterError] {
        &self.errors
    }
}

/// Validated input for the room listing use case.
///
/// # Examples
/// ```
/// use rentomatic::domain::RoomListRequest;
///
/// let request = RoomListRequest::from_filters([("price_min", "abc")]);
/// assert!(!request.is_valid());
///
/// let request = RoomListRequest::from_filters([("price_min", "40")]);
/// assert!(request.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RoomListRequest {
    Valid(RoomFilters),
    Invalid(InvalidRequest),
}

impl RoomListRequest {
    /// A valid request without filters.
    pub fn unfiltered() -> Self {
        Self::Valid(RoomFilters::none())
    }

    /// Validate raw filters. Later duplicates of a key override earlier ones.
    pub fn from_filters<I, K, V>(filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut parsed = RoomFilters::none();
        let mut errors = Vec::new();

        for (name, value) in filters {
            if let Err(error) = apply_filter(&mut parsed, name.as_ref(), value.as_ref()) {
                errors.push(error);
            }
        }

        errors.extend(inverted_ranges(&parsed));

        if errors.is_empty() {
            Self::Valid(parsed)
        } else {
            Self::Invalid(InvalidRequest { errors })
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl From<RoomFilters> for RoomListRequest {
    fn from(value: RoomFilters) -> Self {
        Self::Valid(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Code,
    Size,
    Price,
    Longitude,
    Latitude,
}

impl Attribute {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "code" => Some(Self::Code),
            "size" => Some(Self::Size),
            "price" => Some(Self::Price),
            "longitude" => Some(Self::Longitude),
            "latitude" => Some(Self::Latitude),
            _ => None,
        }
    }

    fn supports(self, comparison: Comparison) -> bool {
        match self {
            Self::Code => comparison == Comparison::Exact,
            Self::Size | Self::Price => true,
            Self::Longitude | Self::Latitude => comparison != Comparison::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Exact,
    Min,
    Max,
}

fn parse_filter_name(name: &str) -> Option<(Attribute, Comparison)> {
    let (attribute, comparison) = if let Some(base) = name.strip_suffix(MIN_SUFFIX) {
        (Attribute::parse(base)?, Comparison::Min)
    } else if let Some(base) = name.strip_suffix(MAX_SUFFIX) {
        (Attribute::parse(base)?, Comparison::Max)
    } else {
        (Attribute::parse(name)?, Comparison::Exact)
    };
    attribute
        .supports(comparison)
        .then_some((attribute, comparison))
}

fn apply_filter(filters: &mut RoomFilters, name: &str, value: &str) -> Result<(), FilterError> {
    let (attribute, comparison) = parse_filter_name(name).ok_or_else(|| {
        FilterError::new(
            name,
            FilterErrorCode::UnknownFilter,
            format!("filter {name} cannot be used"),
        )
    })?;

    match attribute {
        Attribute::Code => {
            let code = RoomCode::new(value).map_err(|_| {
                FilterError::new(
                    name,
                    FilterErrorCode::InvalidUuid,
                    format!("{name} must be a valid UUID"),
                )
            })?;
            filters.set_code(code);
        }
        Attribute::Size => set_bound(filters.size_mut(), comparison, parse_integer(name, value)?),
        Attribute::Price => {
            set_bound(filters.price_mut(), comparison, parse_integer(name, value)?);
        }
        Attribute::Longitude => {
            set_bound(filters.longitude_mut(), comparison, parse_float(name, value)?);
        }
        Attribute::Latitude => {
            set_bound(filters.latitude_mut(), comparison, parse_float(name, value)?);
        }
    }
    Ok(())
}

fn set_bound<T>(bounds: &mut Bounds<T>, comparison: Comparison, value: T) {
    match comparison {
        Comparison::Exact => bounds.set_exact(value),
        Comparison::Min => bounds.set_min(value),
        Comparison::Max => bounds.set_max(value),
    }
}

fn parse_integer(name: &str, value: &str) -> Result<i32, FilterError> {
    value.parse::<i32>().map_err(|_| {
        FilterError::new(
            name,
            FilterErrorCode::InvalidInteger,
            format!("{name} must be an integer"),
        )
    })
}

fn parse_float(name: &str, value: &str) -> Result<f64, FilterError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| {
            FilterError::new(
                name,
                FilterErrorCode::InvalidFloat,
                format!("{name} must be a finite number"),
            )
        })
}

fn inverted_ranges(filters: &RoomFilters) -> Vec<FilterError> {
    let checks = [
        ("size", filters.size().is_inverted()),
        ("price", filters.price().is_inverted()),
        ("longitude", filters.longitude().is_inverted()),
        ("latitude", filters.latitude().is_inverted()),
    ];
    checks
        .into_iter()
        .filter(|(_, inverted)| *inverted)
        .map(|(attribute, _)| {
            FilterError::new(
                attribute,
                FilterErrorCode::InvertedRange,
                format!("{attribute}_min must not exceed {attribute}_max"),
            )
        })
        .collect()
}

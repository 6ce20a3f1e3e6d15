//! Validated room filters.
//!
//! [`RoomFilters`] is the predicate every room repository applies. Keeping
//! the matching rules here lets the in-memory adapter and the SQL adapter
//! agree on what a filter means: equality on `code`, and inclusive bounds on
//! the numeric attributes.

use crate::domain::{Room, RoomCode};

/// Equality and inclusive range constraints on a single attribute.
///
/// # Examples
/// ```
/// use rentomatic::domain::Bounds;
///
/// let bounds = Bounds::unbounded().with_min(40).with_max(60);
/// assert!(bounds.contains(40));
/// assert!(!bounds.contains(39));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    exact: Option<T>,
    min: Option<T>,
    max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            exact: None,
            min: None,
            max: None,
        }
    }
}

impl<T: Copy + PartialOrd> Bounds<T> {
    /// Bounds that accept every value.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Require the attribute to equal `value`.
    #[must_use]
    pub fn with_exact(mut self, value: T) -> Self {
        self.exact = Some(value);
        self
    }

    /// Require the attribute to be at least `value`.
    #[must_use]
    pub fn with_min(mut self, value: T) -> Self {
        self.min = Some(value);
        self
    }

    /// Require the attribute to be at most `value`.
    #[must_use]
    pub fn with_max(mut self, value: T) -> Self {
        self.max = Some(value);
        self
    }

    pub fn exact(&self) -> Option<T> {
        self.exact
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }

    /// Whether no constraint has been set.
    pub fn is_unbounded(&self) -> bool {
        self.exact.is_none() && self.min.is_none() && self.max.is_none()
    }

    /// Whether the lower bound lies above the upper bound.
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// Evaluate every constraint against `value`.
    pub fn contains(&self, value: T) -> bool {
        self.exact.is_none_or(|exact| value == exact)
            && self.min.is_none_or(|min| value >= min)
            && self.max.is_none_or(|max| value <= max)
    }
}

/// Filters applied when listing rooms.
///
/// Built by [`crate::domain::RoomListRequest::from_filters`] from raw
/// `name -> value` pairs, or directly in code and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilters {
    code: Option<RoomCode>,
    size: Bounds<i32>,
    price: Bounds<i32>,
    longitude: Bounds<f64>,
    latitude: Bounds<f64>,
}

impl RoomFilters {
    /// Filters that match every room.
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_code(mut self, code: RoomCode) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_size(mut self, bounds: Bounds<i32>) -> Self {
        self.size = bounds;
        self
    }

    #[must_use]
    pub fn with_price(mut self, bounds: Bounds<i32>) -> Self {
        self.price = bounds;
        self
    }

    #[must_use]
    pub fn with_longitude(mut self, bounds: Bounds<f64>) -> Self {
        self.longitude = bounds;
        self
    }

    #[must_use]
    pub fn with_latitude(mut self, bounds: Bounds<f64>) -> Self {
        self.latitude = bounds;
        self
    }

    pub fn code(&self) -> Option<&RoomCode> {
        self.code.as_ref()
    }

    pub fn size(&self) -> &Bounds<i32> {
        &self.size
    }

    pub fn price(&self) -> &Bounds<i32> {
        &self.price
    }

    pub fn longitude(&self) -> &Bounds<f64> {
        &self.longitude
    }

    pub fn latitude(&self) -> &Bounds<f64> {
        &self.latitude
    }

    pub(crate) fn size_mut(&mut self) -> &mut Bounds<i32> {
        &mut self.size
    }

    pub(crate) fn price_mut(&mut self) -> &mut Bounds<i32> {
        &mut self.price
    }

    pub(crate) fn longitude_mut(&mut self) -> &mut Bounds<f64> {
        &mut self.longitude
    }

    pub(crate) fn latitude_mut(&mut self) -> &mut Bounds<f64> {
        &mut self.latitude
    }

    pub(crate) fn set_code(&mut self, code: RoomCode) {
        self.code = Some(code);
    }

    /// Whether no filter has been set.
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.size.is_unbounded()
            && self.price.is_unbounded()
            && self.longitude.is_unbounded()
            && self.latitude.is_unbounded()
    }

    /// Evaluate the filters against a room.
    ///
    /// # Examples
    /// ```
    /// use rentomatic::domain::{Bounds, Room, RoomCode, RoomFilters};
    ///
    /// let room = Room::new(RoomCode::random(), 215, 39, -0.1, 51.75);
    /// let filters = RoomFilters::none().with_price(Bounds::unbounded().with_min(40));
    /// assert!(!filters.matches(&room));
    /// ```
    pub fn matches(&self, room: &Room) -> bool {
        self.code.is_none_or(|code| room.code() == &code)
            && self.size.contains(room.size())
            && self.price.contains(room.price())
            && self.longitude.contains(room.longitude())
            && self.latitude.contains(room.latitude())
    }
}

impl<T> Bounds<T> {
    pub(crate) fn set_exact(&mut self, value: T) {
        self.exact = Some(value);
    }

    pub(crate) fn set_min(&mut self, value: T) {
        self.min = Some(value);
    }

    pub(crate) fn set_max(&mut self, value: T) {
        self.max = Some(value);
    }
}

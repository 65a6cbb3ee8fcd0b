//! Dashboard filter state.
//!
//! A [`FilterState`] is the whole of the user's input for one render pass:
//! which shapes to map and which years to show. It is never mutated in
//! place; every interaction produces a fresh value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shapes selected when the dashboard first loads.
pub const DEFAULT_SHAPES: [&str; 2] = ["triangle", "disk"];

/// Earliest year the year slider can select.
pub const MIN_YEAR: i32 = 1981;

/// Latest year the year slider can select.
pub const MAX_YEAR: i32 = 2014;

/// Default first year of the selected range.
pub const DEFAULT_FROM_YEAR: i32 = 1990;

/// Default last year of the selected range.
pub const DEFAULT_TO_YEAR: i32 = 2010;

/// An inclusive range of years.
///
/// Always ordered: `min() <= max()`, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    min: i32,
    max: i32,
}

/// Unchecked wire form of [`YearRange`].
#[derive(Debug, Deserialize)]
struct RawYearRange {
    min: i32,
    max: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = Error;

    fn try_from(raw: RawYearRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl YearRange {
    /// Create a year range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidYearRange`] if `min` is after `max`.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The range the year slider spans.
    #[must_use]
    pub fn slider_bounds() -> Self {
        Self {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }

    /// First year in the range.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Last year in the range.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Check whether `year` falls inside the range.
    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Check whether `other` lies entirely inside this range.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Clamp both ends into `bounds`.
    #[must_use]
    pub fn clamp_to(&self, bounds: &Self) -> Self {
        Self {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_FROM_YEAR,
            max: DEFAULT_TO_YEAR,
        }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// The user's current filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected_shapes: BTreeSet<String>,
    year_range: Option<YearRange>,
}

impl FilterState {
    /// Create a filter from explicit parts.
    #[must_use]
    pub fn new<I, S>(shapes: I, year_range: Option<YearRange>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_shapes: shapes.into_iter().map(Into::into).collect(),
            year_range,
        }
    }

    /// Replace the shape selection.
    #[must_use]
    pub fn with_shapes<I, S>(&self, shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(shapes, self.year_range)
    }

    /// Replace the year range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidYearRange`] if `min` is after `max`.
    pub fn with_year_range(&self, min: i32, max: i32) -> Result<Self> {
        Ok(Self {
            selected_shapes: self.selected_shapes.clone(),
            year_range: Some(YearRange::new(min, max)?),
        })
    }

    /// Drop the year range so every year is included.
    #[must_use]
    pub fn without_year_range(&self) -> Self {
        Self {
            selected_shapes: self.selected_shapes.clone(),
            year_range: None,
        }
    }

    /// Keep only the selected shapes that appear in `known`.
    #[must_use]
    pub fn restricted_to<S: AsRef<str>>(&self, known: &[S]) -> Self {
        let selected_shapes = self
            .selected_shapes
            .iter()
            .filter(|shape| known.iter().any(|k| k.as_ref() == shape.as_str()))
            .cloned()
            .collect();
        Self {
            selected_shapes,
            year_range: self.year_range,
        }
    }

    /// The selected shapes, in sorted order.
    #[must_use]
    pub fn selected_shapes(&self) -> &BTreeSet<String> {
        &self.selected_shapes
    }

    /// The selected year range, if years are filtered at all.
    #[must_use]
    pub fn year_range(&self) -> Option<YearRange> {
        self.year_range
    }

    /// Check whether no shapes are selected.
    #[must_use]
    pub fn has_empty_selection(&self) -> bool {
        self.selected_shapes.is_empty()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_SHAPES, Some(YearRange::default()))
    }
}

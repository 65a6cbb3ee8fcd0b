//! Row types read from the sightings database.
//!
//! Every value here is a read-only snapshot of one query result row, fetched
//! for a single render pass and then discarded.

use serde::{Deserialize, Serialize};

/// One year of the trend series: sighting volume alongside the average film
/// rating for that year.
///
/// Rows are pre-aggregated by the data preparation step; there is one per
/// year and nothing here recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieQualityPoint {
    /// Calendar year.
    #[serde(rename = "Year")]
    pub year: i32,

    /// Number of sightings reported that year.
    pub sighting_count: i64,

    /// Average rating on a 0–10 scale.
    pub imdb_rating: f64,
}

impl MovieQualityPoint {
    /// Create a trend point.
    #[must_use]
    pub fn new(year: i32, sighting_count: i64, imdb_rating: f64) -> Self {
        Self {
            year,
            sighting_count,
            imdb_rating,
        }
    }
}

/// A publicly acknowledged military aircraft reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryTechEvent {
    /// Year of the disclosure.
    #[serde(rename = "Year")]
    pub year: i32,

    /// Name of the disclosed aircraft.
    #[serde(rename = "Aircraft")]
    pub aircraft: String,
}

impl MilitaryTechEvent {
    /// Create a disclosure event.
    #[must_use]
    pub fn new(year: i32, aircraft: impl Into<String>) -> Self {
        Self {
            year,
            aircraft: aircraft.into(),
        }
    }
}

/// Coordinates of one reported sighting, as projected by the map query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl MapPoint {
    /// Create a map point.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

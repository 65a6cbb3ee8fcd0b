//! The read-only schema contract for the sightings database.
//!
//! The database is produced by a separate data preparation step. These are
//! the tables and columns the dashboard queries depend on; other columns may
//! exist and are ignored.

/// Table of individual sighting reports.
pub const SIGHTINGS_TABLE: &str = "sightings";

/// Per-year sighting counts joined with film ratings.
pub const MOVIE_QUALITY_TABLE: &str = "movie_quality";

/// Dated military aircraft disclosures.
pub const MILITARY_TECH_TABLE: &str = "military_tech";

/// Columns required from `sightings`.
pub const SIGHTINGS_COLUMNS: &[&str] = &["latitude", "longitude", "year", "country", "refined_shape"];

/// Columns required from `movie_quality`.
pub const MOVIE_QUALITY_COLUMNS: &[&str] = &["Year", "sighting_count", "imdb_rating"];

/// Columns required from `military_tech`.
pub const MILITARY_TECH_COLUMNS: &[&str] = &["Year", "Aircraft"];

/// Every required table with its required columns.
pub const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    (SIGHTINGS_TABLE, SIGHTINGS_COLUMNS),
    (MOVIE_QUALITY_TABLE, MOVIE_QUALITY_COLUMNS),
    (MILITARY_TECH_TABLE, MILITARY_TECH_COLUMNS),
];

//! Read-only access to the sightings database.
//!
//! [`QueryGateway`] opens a fresh read-only `SQLite` connection for every
//! query and closes it before returning, so no connection outlives a call.
//! Concurrent dashboard sessions only rely on `SQLite` allowing concurrent
//! readers.

pub mod queries;
pub mod schema;
pub mod table;

#[cfg(test)]
pub(crate) mod fixture;

use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, types::Value, Connection, OpenFlags};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::filter::{FilterState, YearRange};
use crate::model::{MapPoint, MilitaryTechEvent, MovieQualityPoint};

pub use queries::Query;
pub use table::{Row, Table};

/// The queries a dashboard render pass needs.
///
/// [`QueryGateway`] answers them from `SQLite`; tests substitute in-memory
/// sources.
pub trait DataSource {
    /// Distinct shape labels for the shape selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    fn shapes(&self) -> Result<Vec<String>>;

    /// The yearly trend series, limited to `range` when given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    fn movie_quality(&self, range: Option<YearRange>) -> Result<Vec<MovieQualityPoint>>;

    /// Military aircraft disclosures, limited to `range` when given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    fn military_tech(&self, range: Option<YearRange>) -> Result<Vec<MilitaryTechEvent>>;

    /// Coordinates of the sightings matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySelection`] if no shapes are selected, or
    /// [`Error::DataUnavailable`] if the data cannot be read.
    fn sightings(&self, filter: &FilterState, us_only: bool) -> Result<Vec<MapPoint>>;
}

/// Executes the dashboard's fixed queries against a database file.
#[derive(Debug, Clone)]
pub struct QueryGateway {
    /// Path to the database file.
    path: PathBuf,
}

impl QueryGateway {
    /// Create a gateway for the database at `path`.
    ///
    /// Nothing is opened until the first query.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection for a single call.
    fn connect(&self) -> Result<Connection> {
        trace!("Opening read-only connection to {}", self.path.display());
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.unavailable(&e))
    }

    fn unavailable(&self, err: &rusqlite::Error) -> Error {
        Error::from_sqlite(&self.path, err)
    }

    /// Run `query` and return every row.
    ///
    /// The connection is opened for this call only and closed on return.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the database cannot be opened or
    /// the query refers to tables or columns the database lacks.
    pub fn fetch(&self, query: &Query) -> Result<Table> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(query.sql()).map_err(|e| self.unavailable(&e))?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let rows = stmt
            .query_map(params_from_iter(query.params()), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| self.unavailable(&e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.unavailable(&e))?;

        debug!(
            rows = rows.len(),
            params = query.params().len(),
            "Fetched: {}",
            query.sql()
        );
        Ok(Table::new(columns, rows))
    }

    /// Check that every table and column the dashboard queries exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] naming the first missing table or
    /// column, or if the database cannot be opened.
    pub fn verify_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for (table, required) in schema::REQUIRED_TABLES {
            let mut stmt = conn
                .prepare(&format!("PRAGMA table_info({table})"))
                .map_err(|e| self.unavailable(&e))?;
            let present = stmt
                .query_map([], |row| row.get::<_, String>(1))
                .map_err(|e| self.unavailable(&e))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| self.unavailable(&e))?;

            if present.is_empty() {
                return Err(Error::data_unavailable(format!(
                    "{}: missing table {table}",
                    self.path.display()
                )));
            }
            if let Some(column) = required.iter().find(|c| !present.iter().any(|p| p == *c)) {
                return Err(Error::data_unavailable(format!(
                    "{}: table {table} has no column {column}",
                    self.path.display()
                )));
            }
            debug!("Table {} provides {} columns", table, present.len());
        }
        Ok(())
    }

    fn row_to_movie_quality(row: &Row<'_>) -> Result<MovieQualityPoint> {
        Ok(MovieQualityPoint {
            year: row.get_year("Year")?,
            sighting_count: row.get_i64("sighting_count")?,
            imdb_rating: row.get_f64("imdb_rating")?,
        })
    }

    fn row_to_military_tech(row: &Row<'_>) -> Result<MilitaryTechEvent> {
        Ok(MilitaryTechEvent {
            year: row.get_year("Year")?,
            aircraft: row.get_text("Aircraft")?.to_string(),
        })
    }

    fn row_to_map_point(row: &Row<'_>) -> Result<MapPoint> {
        Ok(MapPoint {
            lat: row.get_f64("lat")?,
            lon: row.get_f64("lon")?,
        })
    }
}

impl DataSource for QueryGateway {
    fn shapes(&self) -> Result<Vec<String>> {
        self.fetch(&queries::distinct_shapes())?
            .decode(|row| row.get_text("refined_shape").map(ToString::to_string))
    }

    fn movie_quality(&self, range: Option<YearRange>) -> Result<Vec<MovieQualityPoint>> {
        self.fetch(&queries::movie_quality(range))?
            .decode(Self::row_to_movie_quality)
    }

    fn military_tech(&self, range: Option<YearRange>) -> Result<Vec<MilitaryTechEvent>> {
        self.fetch(&queries::military_tech(range))?
            .decode(Self::row_to_military_tech)
    }

    fn sightings(&self, filter: &FilterState, us_only: bool) -> Result<Vec<MapPoint>> {
        let query =
            queries::sighting_coordinates(filter.selected_shapes(), filter.year_range(), us_only)?;
        self.fetch(&query)?.decode(Self::row_to_map_point)
    }
}

//! The fixed set of read queries the dashboard issues.
//!
//! Every user-supplied value is bound as a positional parameter; the SQL text
//! only ever contains placeholders.

use rusqlite::types::Value;

use crate::error::{Error, Result};
use crate::filter::YearRange;

/// Country code used when the map is limited to the United States.
pub const US_COUNTRY: &str = "us";

/// A SQL template together with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: String,
    params: Vec<Value>,
}

impl Query {
    /// Create a query with no parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// The SQL template.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound parameters, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Append a parameter and return its `?N` placeholder.
    fn bind(&mut self, value: impl Into<Value>) -> String {
        self.params.push(value.into());
        format!("?{}", self.params.len())
    }

    /// Add an inclusive `BETWEEN` condition on `column` with both years bound.
    fn push_year_bound(&mut self, conditions: &mut Vec<String>, column: &str, range: YearRange) {
        let from = self.bind(i64::from(range.min()));
        let to = self.bind(i64::from(range.max()));
        conditions.push(format!("{column} BETWEEN {from} AND {to}"));
    }

    fn finish(mut self, select: &str, conditions: &[String]) -> Self {
        self.sql = if conditions.is_empty() {
            select.to_string()
        } else {
            format!("{select} WHERE {}", conditions.join(" AND "))
        };
        self
    }
}

/// Distinct shape labels, for the shape selector.
#[must_use]
pub fn distinct_shapes() -> Query {
    Query::new(
        "SELECT DISTINCT refined_shape FROM sightings WHERE refined_shape IS NOT NULL",
    )
}

/// The yearly trend series, optionally limited to `range`.
#[must_use]
pub fn movie_quality(range: Option<YearRange>) -> Query {
    let mut query = Query::new("");
    let mut conditions = Vec::new();
    if let Some(range) = range {
        query.push_year_bound(&mut conditions, "Year", range);
    }
    query.finish(
        "SELECT Year, sighting_count, imdb_rating FROM movie_quality",
        &conditions,
    )
}

/// Military aircraft disclosures, optionally limited to `range`.
#[must_use]
pub fn military_tech(range: Option<YearRange>) -> Query {
    let mut query = Query::new("");
    let mut conditions = Vec::new();
    if let Some(range) = range {
        query.push_year_bound(&mut conditions, "Year", range);
    }
    query.finish("SELECT Year, Aircraft FROM military_tech", &conditions)
}

/// Coordinates of sightings matching the given shapes, years and country.
///
/// # Errors
///
/// Returns [`Error::EmptySelection`] if `shapes` is empty; an empty `IN ()`
/// list is not valid SQL and would match nothing anyway.
pub fn sighting_coordinates<'a, I>(
    shapes: I,
    range: Option<YearRange>,
    us_only: bool,
) -> Result<Query>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut query = Query::new("");
    let placeholders: Vec<String> = shapes
        .into_iter()
        .map(|shape| query.bind(shape.clone()))
        .collect();
    if placeholders.is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut conditions = vec![
        "latitude IS NOT NULL".to_string(),
        "longitude IS NOT NULL".to_string(),
        format!("refined_shape IN ({})", placeholders.join(", ")),
    ];
    if let Some(range) = range {
        query.push_year_bound(&mut conditions, "year", range);
    }
    if us_only {
        let country = query.bind(US_COUNTRY.to_string());
        conditions.push(format!("country = {country}"));
    }

    Ok(query.finish(
        "SELECT latitude AS lat, longitude AS lon FROM sightings",
        &conditions,
    ))
}

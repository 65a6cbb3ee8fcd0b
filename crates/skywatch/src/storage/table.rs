//! Tabular query results.

use rusqlite::types::Value;

use crate::error::{Error, Result};

/// Rows returned by one query, with named columns in select order.
///
/// Rows keep the order the database produced them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table. Rows should have one value per column; a value
    /// missing from a short row reads as a missing column.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Convert every row with `f`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns for the first row it rejects.
    pub fn decode<T, F>(&self, f: F) -> Result<Vec<T>>
    where
        F: Fn(&Row<'_>) -> Result<T>,
    {
        self.rows().map(|row| f(&row)).collect()
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Row<'_> {
    /// The raw value in `column`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the row has no such column or
    /// holds no value for it.
    pub fn value(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .ok_or_else(|| Error::data_unavailable(format!("missing column: {column}")))
    }

    /// The value in `column` as an integer.
    ///
    /// Whole-number reals are accepted, since loaders often store integer
    /// columns as floating point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the column is missing or not an integer.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_i64(&self, column: &str) -> Result<i64> {
        match self.value(column)? {
            Value::Integer(v) => Ok(*v),
            Value::Real(v) if v.fract() == 0.0 && v.is_finite() => Ok(*v as i64),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    /// The value in `column` as a year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the column is missing or not a year.
    pub fn get_year(&self, column: &str) -> Result<i32> {
        let year = self.get_i64(column)?;
        i32::try_from(year)
            .map_err(|_| Error::data_unavailable(format!("column {column}: {year} is not a year")))
    }

    /// The value in `column` as a float.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the column is missing or not numeric.
    #[allow(clippy::cast_precision_loss)]
    pub fn get_f64(&self, column: &str) -> Result<f64> {
        match self.value(column)? {
            Value::Real(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => Err(type_mismatch(column, "number", other)),
        }
    }

    /// The value in `column` as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the column is missing or not text.
    pub fn get_text(&self, column: &str) -> Result<&str> {
        match self.value(column)? {
            Value::Text(v) => Ok(v.as_str()),
            other => Err(type_mismatch(column, "text", other)),
        }
    }
}

fn type_mismatch(column: &str, expected: &str, found: &Value) -> Error {
    Error::data_unavailable(format!(
        "column {column}: expected {expected}, found {:?}",
        found.data_type()
    ))
}

//! Row to record mapping.
//!
//! Turns the rows of a [`Table`](crate::types::Table) into ordered JSON
//! objects, either as a plain array or keyed by the value of one column.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::error::{DataError, Result, column_not_found};
use crate::types::{KeyedRecords, Record};

/// Position of `column` in `headers`.
///
/// `option` names the setting that referenced the column and is only used
/// for the error message.
///
/// # Errors
///
/// Returns [`ConfigError::ColumnNotFound`](crate::error::ConfigError::ColumnNotFound)
/// when the header has no such column.
pub fn resolve_column(headers: &[String], column: &str, option: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| column_not_found(option, column, headers).into())
}

/// Zip one row with the header, keeping header order.
///
/// A row shorter than the header yields a record without the trailing fields.
#[must_use]
pub fn build_record(headers: &[String], row: &[String]) -> Record {
    headers
        .iter()
        .zip(row)
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect()
}

/// Build one record per row, in row order.
#[must_use]
pub fn build_records(headers: &[String], rows: &[Vec<String>]) -> Vec<Record> {
    rows.iter().map(|row| build_record(headers, row)).collect()
}

/// Build an object mapping each row's `key_column` value to its full record.
///
/// The key column stays inside each record. Keys keep input row order.
///
/// # Errors
///
/// Returns a column-not-found configuration error before touching any row
/// when `key_column` is not in `headers`, and
/// [`DataError::NonUniqueKeyColumn`] on the first repeated key value.
pub fn build_keyed_records(
    headers: &[String],
    rows: &[Vec<String>],
    key_column: &str,
) -> Result<KeyedRecords> {
    let key_idx = resolve_column(headers, key_column, "key")?;
    let mut tracker = KeyTracker::new(key_column, rows.len());
    let mut keyed = KeyedRecords::new();

    for (i, row) in rows.iter().enumerate() {
        let key = tracker.observe(cell(row, key_idx), i)?;
        keyed.insert(key.to_string(), Value::Object(build_record(headers, row)));
    }

    debug!("Keyed {} record(s) by column '{key_column}'", keyed.len());
    Ok(keyed)
}

/// Verify that `key_column` holds a distinct value on every row.
///
/// # Errors
///
/// Same as [`build_keyed_records`].
pub fn check_unique_keys(headers: &[String], rows: &[Vec<String>], key_column: &str) -> Result<()> {
    let key_idx = resolve_column(headers, key_column, "key")?;
    check_unique_keys_at(rows, key_column, key_idx)
}

pub(crate) fn check_unique_keys_at(
    rows: &[Vec<String>],
    key_column: &str,
    key_idx: usize,
) -> Result<()> {
    let mut tracker = KeyTracker::new(key_column, rows.len());
    for (i, row) in rows.iter().enumerate() {
        tracker.observe(cell(row, key_idx), i)?;
    }
    Ok(())
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

/// Remembers the first row each key value was seen on.
struct KeyTracker<'a> {
    column: &'a str,
    seen: HashMap<&'a str, usize>,
}

impl<'a> KeyTracker<'a> {
    fn new(column: &'a str, capacity: usize) -> Self {
        Self {
            column,
            seen: HashMap::with_capacity(capacity),
        }
    }

    /// Record `value` for the zero-based row `index`.
    fn observe(&mut self, value: &'a str, index: usize) -> Result<&'a str> {
        if let Some(&first) = self.seen.get(value) {
            return Err(DataError::NonUniqueKeyColumn {
                column: self.column.to_string(),
                value: value.to_string(),
                first_row: first + 1,
                duplicate_row: index + 1,
            }
            .into());
        }
        self.seen.insert(value, index);
        Ok(value)
    }
}

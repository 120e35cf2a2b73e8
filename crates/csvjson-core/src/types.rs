//! Data types shared by the conversion stages.
//!
//! Records and keyed collections are `serde_json` maps. The workspace enables
//! `serde_json/preserve_order`, so both keep insertion order when serialized.

use geojson::FeatureCollection;
use serde::Serialize;
use serde_json::{Map, Value};

/// One row as an ordered field name to cell value mapping.
pub type Record = Map<String, Value>;

/// Records indexed by the value of a key column, in input row order.
pub type KeyedRecords = Map<String, Value>;

/// A CSV input held fully in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Cell values, one inner vector per data row
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and rows.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// The result of a conversion, serialized as exactly one JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonOutput {
    /// An array of records
    Records(Vec<Record>),
    /// An object keyed by the key column
    Keyed(KeyedRecords),
    /// A GeoJSON feature collection
    Features(FeatureCollection),
}

impl JsonOutput {
    /// Number of top-level entries (records, keys or features).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Keyed(keyed) => keyed.len(),
            Self::Features(collection) => collection.features.len(),
        }
    }

    /// Returns `true` when the output holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

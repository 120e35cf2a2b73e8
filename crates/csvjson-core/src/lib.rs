//! `csvjson-core` converts CSV tables into JSON documents.
//!
//! This crate includes:
//! - **Reader**: loads a CSV document into an in-memory [`Table`].
//! - **Records**: maps each row to an ordered JSON object, optionally keyed by a
//!   column whose values must be unique.
//! - **Features**: builds a GeoJSON `FeatureCollection` of points from latitude
//!   and longitude columns.
//! - **Writer**: serializes the result compactly or with a chosen indentation.
//!
//! # Examples
//!
//! ```
//! use csvjson_core::{ConvertOptions, ReaderOptions, convert};
//!
//! let mut output = Vec::new();
//! convert(
//!     "a,b,c\n1,2,3\n".as_bytes(),
//!     &mut output,
//!     &ReaderOptions::default(),
//!     &ConvertOptions::new().with_key_column("a"),
//! )?;
//! assert_eq!(String::from_utf8(output)?, r#"{"1":{"a":"1","b":"2","c":"3"}}"#);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod features;
pub mod operations;
pub mod options;
pub mod reader;
pub mod records;
pub mod types;
pub mod writer;

pub use error::{CsvJsonError, Result};
pub use operations::{convert, convert_table};
pub use options::{ConvertOptions, GeoColumns, ReaderOptions};
pub use types::{JsonOutput, Record, Table};

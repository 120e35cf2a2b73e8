//! Reader and conversion options.

use crate::error::{ConfigError, Result};

/// Options for reading CSV input
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Field delimiter (default: b',')
    pub delimiter: u8,
    /// Quote character (default: b'"')
    pub quote: u8,
    /// Whether the first row holds column names (default: true)
    pub has_header: bool,
    /// Whether to trim whitespace around fields (default: false)
    pub trim: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_header: true,
            trim: false,
        }
    }
}

impl ReaderOptions {
    /// Create new reader options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set quote character
    #[must_use]
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Set whether the first row is a header row
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set whether to trim whitespace around fields
    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Options controlling the shape and formatting of the JSON output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Column whose values key the output object
    pub key_column: Option<String>,
    /// Spaces per indentation level; `None` or `Some(0)` is compact
    pub indent: Option<usize>,
    /// Latitude column, enables GeoJSON output together with `lon_column`
    pub lat_column: Option<String>,
    /// Longitude column, enables GeoJSON output together with `lat_column`
    pub lon_column: Option<String>,
}

/// Latitude and longitude column pair for GeoJSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoColumns<'a> {
    /// Latitude column name
    pub lat: &'a str,
    /// Longitude column name
    pub lon: &'a str,
}

impl ConvertOptions {
    /// Create new conversion options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key the output by this column
    #[must_use]
    pub fn with_key_column(mut self, column: impl Into<String>) -> Self {
        self.key_column = Some(column.into());
        self
    }

    /// Pretty-print with this many spaces per level
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Emit GeoJSON using these latitude and longitude columns
    #[must_use]
    pub fn with_geo_columns(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.lat_column = Some(lat.into());
        self.lon_column = Some(lon.into());
        self
    }

    /// Check that the latitude and longitude options come as a pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteGeoColumns`] when only one of them is set.
    pub fn validate(&self) -> Result<()> {
        match (&self.lat_column, &self.lon_column) {
            (Some(_), None) => Err(ConfigError::IncompleteGeoColumns {
                present: "latitude".to_string(),
                missing: "longitude".to_string(),
            }
            .into()),
            (None, Some(_)) => Err(ConfigError::IncompleteGeoColumns {
                present: "longitude".to_string(),
                missing: "latitude".to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// The geo column pair, when GeoJSON output was requested.
    #[must_use]
    pub fn geo_columns(&self) -> Option<GeoColumns<'_>> {
        match (&self.lat_column, &self.lon_column) {
            (Some(lat), Some(lon)) => Some(GeoColumns {
                lat: lat.as_str(),
                lon: lon.as_str(),
            }),
            _ => None,
        }
    }

    /// Indentation width, with `0` folded into compact output.
    #[must_use]
    pub fn effective_indent(&self) -> Option<usize> {
        self.indent.filter(|&n| n > 0)
    }
}

//! Custom error types for csvjson conversions.
//!
//! Every failure the conversion engine can report has its own variant so that
//! callers (and tests) can tell a bad option apart from bad data without
//! inspecting message text.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csvjson operations.
///
/// The root error delegates display formatting to the underlying category
/// through `#[error(transparent)]`.
#[derive(Debug, Error)]
pub enum CsvJsonError {
    /// Options that reference missing columns or are inconsistent
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Data integrity violations, such as a non-unique key column
    #[error(transparent)]
    Data(#[from] DataError),

    /// CSV parsing and geometry decoding errors
    #[error(transparent)]
    Format(#[from] FormatError),

    /// I/O errors while reading input or writing output
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Configuration errors.
///
/// These are raised before any row is converted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A column named by an option is absent from the header
    #[error("Column '{column}' given for {option} was not found. Available columns: {available}")]
    ColumnNotFound {
        /// The option naming the column (e.g. "key", "latitude")
        option: String,
        /// The requested column name
        column: String,
        /// Comma-separated list of header names
        available: String,
    },

    /// Only one of the latitude/longitude pair was supplied
    #[error("The {present} column was given without a {missing} column")]
    IncompleteGeoColumns {
        /// The option that was supplied
        present: String,
        /// The option that is missing
        missing: String,
    },

    /// Invalid option value
    #[error("Invalid {option} option: {message}")]
    InvalidOption {
        /// The option name
        option: String,
        /// Why it's invalid
        message: String,
    },
}

/// Data integrity errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// Two rows share the same value in the key column
    #[error(
        "Value '{value}' in key column '{column}' is not unique (rows {first_row} and {duplicate_row})"
    )]
    NonUniqueKeyColumn {
        /// The key column name
        column: String,
        /// The duplicated value
        value: String,
        /// 1-based data row where the value first appeared
        first_row: usize,
        /// 1-based data row holding the duplicate
        duplicate_row: usize,
    },
}

/// Format parsing and validation errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Failed to parse the input
    #[error("Failed to parse {format} at line {line}: {message}", line = line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    Parse {
        /// The format being parsed
        format: String,
        /// The line number where parsing failed (if available)
        line: Option<u64>,
        /// Description of the parse error
        message: String,
    },

    /// The header row names the same column twice
    #[error("Duplicate column name '{name}' in header")]
    DuplicateHeader {
        /// The repeated column name
        name: String,
    },

    /// A latitude or longitude cell is not a finite number
    #[error("Invalid coordinate '{value}' in column '{column}' at row {row}")]
    InvalidCoordinate {
        /// 1-based data row number
        row: usize,
        /// The coordinate column name
        column: String,
        /// The raw cell value
        value: String,
    },
}

/// I/O related errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// Failed to read input
    #[error("Failed to read {format} from '{path}': {source}")]
    Read {
        /// The format being read
        format: String,
        /// The input path ("-" for standard input)
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write output
    #[error("Failed to write {format} to '{path}': {source}")]
    Write {
        /// The format being written
        format: String,
        /// The output path ("-" for standard output)
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Type alias for Results using `CsvJsonError`.
pub type Result<T> = std::result::Result<T, CsvJsonError>;

impl CsvJsonError {
    /// Get a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => format!("Configuration error: {e}"),
            Self::Data(e) => format!("Data error: {e}"),
            Self::Format(e) => e.user_message(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Config(e) => e.recovery_suggestion(),
            Self::Data(DataError::NonUniqueKeyColumn { .. }) => Some(
                "Choose a key column whose values are unique, or omit --key to emit an array."
                    .to_string(),
            ),
            Self::Format(e) => e.recovery_suggestion(),
            Self::Io(_) => None,
        }
    }
}

impl ConfigError {
    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::ColumnNotFound { .. } => {
                Some("Column names are case-sensitive; check the header row.".to_string())
            },
            Self::IncompleteGeoColumns { .. } => {
                Some("Pass both --lat and --lon to produce GeoJSON.".to_string())
            },
            Self::InvalidOption { .. } => None,
        }
    }
}

impl FormatError {
    fn user_message(&self) -> String {
        match self {
            Self::Parse {
                format,
                line: Some(line),
                message,
            } => format!("Parse error in {format} at line {line}: {message}"),
            Self::Parse {
                format, message, ..
            } => format!("Parse error in {format}: {message}"),
            Self::DuplicateHeader { .. } | Self::InvalidCoordinate { .. } => self.to_string(),
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Parse { .. } => {
                Some("Check the delimiter and quote character options.".to_string())
            },
            Self::DuplicateHeader { .. } => {
                Some("Rename the column or use --no-header-row.".to_string())
            },
            Self::InvalidCoordinate { .. } => {
                Some("Latitude and longitude cells must hold decimal numbers.".to_string())
            },
        }
    }
}

/// Extension trait for adding I/O context to errors.
pub trait IoErrorExt<T> {
    /// Add read context to an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError::Read`] if the underlying operation fails.
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;

    /// Add write context to an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError::Write`] if the underlying operation fails.
    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> IoErrorExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            CsvJsonError::Io(IoError::Read {
                format: format.to_string(),
                path: path.into(),
                source: Box::new(e),
            })
        })
    }

    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            CsvJsonError::Io(IoError::Write {
                format: format.to_string(),
                path: path.into(),
                source: Box::new(e),
            })
        })
    }
}

/// Helper to create `ConfigError::ColumnNotFound` listing the header.
#[must_use]
pub fn column_not_found(option: &str, column: &str, headers: &[String]) -> ConfigError {
    ConfigError::ColumnNotFound {
        option: option.to_string(),
        column: column.to_string(),
        available: headers.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_lists_headers() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let err = CsvJsonError::from(column_not_found("key", "z", &headers));

        assert_eq!(
            err.to_string(),
            "Column 'z' given for key was not found. Available columns: a, b"
        );
        assert!(err.user_message().starts_with("Configuration error:"));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_non_unique_key_message() {
        let err = CsvJsonError::from(DataError::NonUniqueKeyColumn {
            column: "a".to_string(),
            value: "1".to_string(),
            first_row: 1,
            duplicate_row: 2,
        });

        let message = err.to_string();
        assert!(message.contains("'1'"));
        assert!(message.contains("key column 'a'"));
        assert!(message.contains("rows 1 and 2"));
    }

    #[test]
    fn test_parse_error_without_line() {
        let err = FormatError::Parse {
            format: "CSV".to_string(),
            line: None,
            message: "bad quote".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse CSV at line unknown: bad quote");
        assert_eq!(err.user_message(), "Parse error in CSV: bad quote");
    }

    #[test]
    fn test_parse_error_with_line() {
        let err = FormatError::Parse {
            format: "CSV".to_string(),
            line: Some(3),
            message: "bad quote".to_string(),
        };
        assert_eq!(err.user_message(), "Parse error in CSV at line 3: bad quote");
    }

    #[test]
    fn test_io_error_ext_wraps_source() {
        let failing: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = failing.with_write_context("JSON", "out.json").unwrap_err();

        assert!(matches!(err, CsvJsonError::Io(IoError::Write { .. })));
        assert!(err.to_string().contains("out.json"));
        assert!(err.to_string().contains("disk full"));
        assert!(err.recovery_suggestion().is_none());
    }
}

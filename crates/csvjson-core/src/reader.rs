//! CSV reading into an in-memory [`Table`].
//!
//! Quoting and delimiter handling is left to the `csv` crate; this module only
//! turns its records into header names and string rows and attaches line
//! numbers to failures.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::error::{CsvJsonError, FormatError, IoError, IoErrorExt, Result};
use crate::options::ReaderOptions;
use crate::types::Table;

/// Read a complete CSV document from `reader`.
///
/// Every data row must have as many fields as the header. An input with no
/// records at all yields an empty table.
///
/// # Errors
///
/// Returns [`FormatError::Parse`] for malformed CSV or ragged rows,
/// [`FormatError::DuplicateHeader`] when a column name repeats and
/// [`IoError::Read`] when the underlying reader fails.
pub fn read_table<R: Read>(reader: R, options: &ReaderOptions) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let Some(first) = records.next() else {
        debug!("CSV input is empty");
        return Ok(Table::default());
    };
    let first = first.map_err(map_csv_error)?;

    let (headers, mut rows) = if options.has_header {
        (record_to_row(&first), Vec::new())
    } else {
        let generated = (1..=first.len()).map(|i| format!("column{i}")).collect();
        (generated, vec![record_to_row(&first)])
    };
    check_unique_headers(&headers)?;

    for record in records {
        let record = record.map_err(map_csv_error)?;
        rows.push(record_to_row(&record));
    }

    debug!("Read {} column(s) and {} row(s)", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

/// Read a CSV file from disk.
///
/// # Errors
///
/// Returns [`IoError::Read`] when the file cannot be opened, plus every error
/// [`read_table`] can return.
pub fn read_table_from_path(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).with_read_context("CSV", path)?;
    read_table(file, options)
}

fn record_to_row(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn check_unique_headers(headers: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    for name in headers {
        if !seen.insert(name.as_str()) {
            return Err(FormatError::DuplicateHeader { name: name.clone() }.into());
        }
    }
    Ok(())
}

fn map_csv_error(err: csv::Error) -> CsvJsonError {
    if err.is_io_error() {
        return CsvJsonError::Io(IoError::Read {
            format: "CSV".to_string(),
            path: "-".into(),
            source: Box::new(err),
        });
    }

    let line = err.position().map(csv::Position::line);
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} field(s), found {len}"),
        _ => err.to_string(),
    };

    CsvJsonError::Format(FormatError::Parse {
        format: "CSV".to_string(),
        line,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read(input: &str) -> Result<Table> {
        read_table(input.as_bytes(), &ReaderOptions::default())
    }

    #[test]
    fn test_read_simple() {
        let table = read("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows, vec![vec!["1", "2", "3"]]);
        assert_eq!(table.num_rows(), 1);
    }

    #[test]
    fn test_read_quoted_fields() {
        let table = read("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0], vec!["Smith, J", "said \"hi\""]);
    }

    #[test]
    fn test_read_header_only() {
        let table = read("a,b,c\n").unwrap();
        assert_eq!(table.headers.len(), 3);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_read_empty_input() {
        let table = read("").unwrap();
        assert_eq!(table, Table::default());
    }

    #[test]
    fn test_read_without_header_row() {
        let options = ReaderOptions::default().with_header(false);
        let table = read_table("1,2\n3,4\n".as_bytes(), &options).unwrap();
        assert_eq!(table.headers, vec!["column1", "column2"]);
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_read_custom_delimiter_and_trim() {
        let options = ReaderOptions::default().with_delimiter(b';').with_trim(true);
        let table = read_table("a; b\n 1 ;2\n".as_bytes(), &options).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_read_ragged_row_reports_line() {
        let err = read("a,b,c\n1,2,3\n4,5\n").unwrap_err();
        match err {
            CsvJsonError::Format(FormatError::Parse { line, message, .. }) => {
                assert_eq!(line, Some(3));
                assert!(message.contains("expected 3"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_duplicate_header() {
        let err = read("a,b,a\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            CsvJsonError::Format(FormatError::DuplicateHeader { ref name }) if name == "a"
        ));
    }

    #[test]
    fn test_read_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,name").unwrap();
        writeln!(file, "1,Alice").unwrap();

        let table = read_table_from_path(file.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "Alice"]]);
    }

    #[test]
    fn test_read_missing_path() {
        let err = read_table_from_path("does/not/exist.csv", &ReaderOptions::default())
            .unwrap_err();
        assert!(matches!(err, CsvJsonError::Io(IoError::Read { .. })));
    }
}

//! Conversion pipeline from CSV input to a JSON document.
//!
//! This module ties the stages together: read the table, shape it into records,
//! keyed records or GeoJSON features, then serialize. The result is built fully
//! in memory, so a failing conversion never writes partial output.

use std::io::{Read, Write};

use log::info;

use crate::error::Result;
use crate::features::build_feature_collection;
use crate::options::{ConvertOptions, ReaderOptions};
use crate::reader::read_table;
use crate::records::{build_keyed_records, build_records};
use crate::types::{JsonOutput, Table};
use crate::writer::write_json;

/// Shape an in-memory table according to `options`.
///
/// GeoJSON output is chosen when both coordinate columns are set, keyed output
/// when only a key column is set, and a plain array otherwise.
///
/// # Errors
///
/// This function will return an error if:
/// - Only one of the latitude/longitude columns is set.
/// - A named column is missing from the header.
/// - The key column holds a repeated value.
/// - A coordinate cell is not a number.
pub fn convert_table(table: &Table, options: &ConvertOptions) -> Result<JsonOutput> {
    options.validate()?;
    let key_column = options.key_column.as_deref();

    let output = match (options.geo_columns(), key_column) {
        (Some(geo), key) => {
            info!(
                "Building GeoJSON from columns '{}' (lat) and '{}' (lon)",
                geo.lat, geo.lon
            );
            JsonOutput::Features(build_feature_collection(
                &table.headers,
                &table.rows,
                geo,
                key,
            )?)
        },
        (None, Some(key)) => {
            info!("Keying records by column '{key}'");
            JsonOutput::Keyed(build_keyed_records(&table.headers, &table.rows, key)?)
        },
        (None, None) => JsonOutput::Records(build_records(&table.headers, &table.rows)),
    };

    info!("Converted {} row(s)", table.num_rows());
    Ok(output)
}

/// Read CSV from `input`, convert it and write the JSON document to `output`.
///
/// # Errors
///
/// Returns any reading, conversion or writing error. Nothing is written to
/// `output` unless reading and conversion succeed.
pub fn convert<R: Read, W: Write>(
    input: R,
    output: &mut W,
    reader_options: &ReaderOptions,
    options: &ConvertOptions,
) -> Result<()> {
    options.validate()?;

    let table = read_table(input, reader_options)?;
    info!(
        "Read {} column(s), {} row(s)",
        table.headers.len(),
        table.num_rows()
    );

    let json = convert_table(&table, options)?;
    write_json(output, &json, options.effective_indent())?;

    info!("Conversion completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, CsvJsonError, DataError, FormatError};
    use serde_json::Value;

    const DUMMY: &str = "a,b,c\n1,2,3\n";

    fn run(input: &str, options: &ConvertOptions) -> Result<String> {
        let mut output = Vec::new();
        convert(input.as_bytes(), &mut output, &ReaderOptions::default(), options)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_convert_simple() {
        let text = run(DUMMY, &ConvertOptions::default()).unwrap();
        assert_eq!(text, r#"[{"a":"1","b":"2","c":"3"}]"#);
    }

    #[test]
    fn test_convert_indented() {
        let text = run(DUMMY, &ConvertOptions::new().with_indent(4)).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"a\": \"1\",\n        \"b\": \"2\",\n        \"c\": \"3\"\n    }\n]"
        );
    }

    #[test]
    fn test_convert_keyed() {
        let text = run(DUMMY, &ConvertOptions::new().with_key_column("a")).unwrap();
        assert_eq!(text, r#"{"1":{"a":"1","b":"2","c":"3"}}"#);
    }

    #[test]
    fn test_convert_duplicate_keys_writes_nothing() {
        let mut output = Vec::new();
        let result = convert(
            "a,b,c\n1,2,3\n1,4,5\n".as_bytes(),
            &mut output,
            &ReaderOptions::default(),
            &ConvertOptions::new().with_key_column("a"),
        );

        assert!(matches!(
            result,
            Err(CsvJsonError::Data(DataError::NonUniqueKeyColumn { .. }))
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_convert_empty_rows() {
        assert_eq!(run("a,b\n", &ConvertOptions::default()).unwrap(), "[]");
        assert_eq!(
            run("a,b\n", &ConvertOptions::new().with_key_column("a")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_convert_geojson() {
        let input = "name,latitude,longitude\nA,1.5,2.5\nB,-3,4\n";
        let text = run(
            input,
            &ConvertOptions::new().with_geo_columns("latitude", "longitude"),
        )
        .unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().unwrap().len(), 2);
        assert_eq!(json["features"][1]["geometry"]["coordinates"][0].as_f64(), Some(4.0));
        assert_eq!(json["features"][1]["geometry"]["coordinates"][1].as_f64(), Some(-3.0));
        assert_eq!(json["features"][0]["properties"]["name"], "A");
    }

    #[test]
    fn test_convert_table_dispatch() {
        let table = Table::new(
            vec!["k".to_string(), "lat".to_string(), "lon".to_string()],
            vec![vec!["x".to_string(), "1".to_string(), "2".to_string()]],
        );

        let plain = convert_table(&table, &ConvertOptions::default()).unwrap();
        assert!(matches!(plain, JsonOutput::Records(_)));

        let keyed = convert_table(&table, &ConvertOptions::new().with_key_column("k")).unwrap();
        assert!(matches!(keyed, JsonOutput::Keyed(_)));

        let geo = convert_table(
            &table,
            &ConvertOptions::new()
                .with_key_column("k")
                .with_geo_columns("lat", "lon"),
        )
        .unwrap();
        assert!(matches!(geo, JsonOutput::Features(_)));
        assert_eq!(geo.len(), 1);
    }

    #[test]
    fn test_convert_incomplete_geo_options() {
        let options = ConvertOptions {
            lat_column: Some("lat".to_string()),
            ..ConvertOptions::default()
        };
        let mut output = Vec::new();
        let result = convert(DUMMY.as_bytes(), &mut output, &ReaderOptions::default(), &options);

        assert!(matches!(
            result,
            Err(CsvJsonError::Config(ConfigError::IncompleteGeoColumns { .. }))
        ));
    }

    #[test]
    fn test_convert_missing_key_column() {
        let err = run(DUMMY, &ConvertOptions::new().with_key_column("z")).unwrap_err();
        assert!(matches!(
            err,
            CsvJsonError::Config(ConfigError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_convert_invalid_coordinate_writes_nothing() {
        let mut output = Vec::new();
        let result = convert(
            "lat,lon\n1,2\nabc,3\n".as_bytes(),
            &mut output,
            &ReaderOptions::default(),
            &ConvertOptions::new().with_geo_columns("lat", "lon"),
        );

        assert!(matches!(
            result,
            Err(CsvJsonError::Format(FormatError::InvalidCoordinate { row: 2, .. }))
        ));
        assert!(output.is_empty());
    }
}

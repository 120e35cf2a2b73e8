//! GeoJSON point features from latitude/longitude columns.
//!
//! Each row becomes one `Point` feature. The coordinate columns are moved out
//! of `properties` into the geometry, and when a key column is given its value
//! becomes the feature `id` instead of a property.

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoValue, feature::Id};
use log::debug;
use serde_json::Value;

use crate::error::{FormatError, Result};
use crate::options::GeoColumns;
use crate::records::{check_unique_keys_at, resolve_column};
use crate::types::Record;

/// Resolved header positions for feature assembly.
#[derive(Debug, Clone, Copy)]
struct FeatureLayout {
    lat: usize,
    lon: usize,
    key: Option<usize>,
}

impl FeatureLayout {
    fn resolve(headers: &[String], geo: GeoColumns<'_>, key_column: Option<&str>) -> Result<Self> {
        Ok(Self {
            lat: resolve_column(headers, geo.lat, "latitude")?,
            lon: resolve_column(headers, geo.lon, "longitude")?,
            key: key_column
                .map(|key| resolve_column(headers, key, "key"))
                .transpose()?,
        })
    }

    fn is_property(&self, idx: usize) -> bool {
        idx != self.lat && idx != self.lon && Some(idx) != self.key
    }
}

/// Build a `FeatureCollection` with one point feature per row, in row order.
///
/// All named columns are resolved before any row is read. When `key_column`
/// is given its values must be unique, exactly as for keyed record output.
///
/// # Errors
///
/// Returns a column-not-found configuration error for an unknown column,
/// [`DataError::NonUniqueKeyColumn`](crate::error::DataError::NonUniqueKeyColumn)
/// for a repeated key and [`FormatError::InvalidCoordinate`] for a latitude or
/// longitude cell that is not a finite number.
pub fn build_feature_collection(
    headers: &[String],
    rows: &[Vec<String>],
    geo: GeoColumns<'_>,
    key_column: Option<&str>,
) -> Result<FeatureCollection> {
    let layout = FeatureLayout::resolve(headers, geo, key_column)?;

    if let (Some(key), Some(key_idx)) = (key_column, layout.key) {
        check_unique_keys_at(rows, key, key_idx)?;
    }

    let features = rows
        .iter()
        .enumerate()
        .map(|(i, row)| build_feature(headers, row, i + 1, &layout))
        .collect::<Result<Vec<_>>>()?;

    debug!("Assembled {} point feature(s)", features.len());
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn build_feature(
    headers: &[String],
    row: &[String],
    row_number: usize,
    layout: &FeatureLayout,
) -> Result<Feature> {
    let lat = parse_coordinate(headers, row, layout.lat, row_number)?;
    let lon = parse_coordinate(headers, row, layout.lon, row_number)?;

    let properties: Record = headers
        .iter()
        .zip(row)
        .enumerate()
        .filter(|(idx, _)| layout.is_property(*idx))
        .map(|(_, (name, value))| (name.clone(), Value::String(value.clone())))
        .collect();

    let id = layout
        .key
        .map(|idx| Id::String(row.get(idx).cloned().unwrap_or_default()));

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::Point(vec![lon, lat]))),
        id,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Parse one coordinate cell as a finite `f64`.
///
/// Surrounding whitespace is ignored; anything else `f64::from_str` rejects,
/// along with `NaN` and infinities, is an invalid coordinate.
fn parse_coordinate(headers: &[String], row: &[String], idx: usize, row_number: usize) -> Result<f64> {
    let raw = row.get(idx).map_or("", String::as_str);
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FormatError::InvalidCoordinate {
            row: row_number,
            column: headers[idx].clone(),
            value: raw.to_string(),
        }
        .into()),
    }
}

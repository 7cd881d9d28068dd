use std::path::Path;

use gdal::vector::{FieldValue, LayerAccess};

use crate::error::ConversionError;

use super::row::Row;

/// Read `id`, `lat`, `lon` rows from the first sheet of a spreadsheet through GDAL's
/// XLSX/XLS/ODS drivers. The first sheet row is always treated as the header.
pub fn read_rows_from_spreadsheet(path: &Path) -> Result<Vec<Row>, ConversionError> {
    gdal::DriverManager::register_all();
    let mut open_options = gdal::DatasetOptions::default();
    open_options.open_flags = gdal::GdalOpenFlags::GDAL_OF_VECTOR;
    open_options.open_options = Some(&["HEADERS=FORCE"][..]);
    let dataset = gdal::Dataset::open_ex(path, open_options)
        .map_err(|err| ConversionError::unreadable(path, err))?;

    if dataset.layer_count() == 0 {
        return Err(ConversionError::unreadable(path, "No sheets found"));
    }
    if dataset.layer_count() > 1 {
        log::warn!(
            "Found {} sheets in {:?}, only the first one is read.",
            dataset.layer_count(),
            path
        );
    }
    let mut layer = dataset
        .layer(0)
        .map_err(|err| ConversionError::unreadable(path, err))?;

    let mut rows = Vec::new();
    for (index, feature) in layer.features().enumerate() {
        let data_row = index + 1;
        let id = feature
            .field("id")
            .map_err(|err| ConversionError::unreadable(path, err))?
            .and_then(|value| field_as_string(&value));
        let lat = read_coordinate(&feature, "lat", path, data_row)?;
        let lon = read_coordinate(&feature, "lon", path, data_row)?;
        rows.push(Row::new(id.as_deref(), lat, lon));
    }
    log::debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

fn read_coordinate(
    feature: &gdal::vector::Feature,
    field_name: &str,
    path: &Path,
    data_row: usize,
) -> Result<f64, ConversionError> {
    let value = feature
        .field(field_name)
        .map_err(|err| ConversionError::unreadable(path, err))?;
    value.as_ref().and_then(field_as_f64).ok_or_else(|| {
        ConversionError::unreadable(
            path,
            format!("Data row {}: `{}` is not a number", data_row, field_name),
        )
    })
}

fn field_as_string(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::StringValue(value) => Some(value.to_owned()),
        FieldValue::IntegerValue(value) => Some(value.to_string()),
        FieldValue::Integer64Value(value) => Some(value.to_string()),
        FieldValue::RealValue(value) => Some(value.to_string()),
        _ => None,
    }
}

fn field_as_f64(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::RealValue(value) => Some(*value),
        FieldValue::IntegerValue(value) => Some(*value as f64),
        FieldValue::Integer64Value(value) => Some(*value as f64),
        FieldValue::StringValue(value) => value.trim().parse().ok(),
        _ => None,
    }
}

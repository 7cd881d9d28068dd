use std::path::Path;

use serde::Deserialize;

use crate::error::ConversionError;

use super::row::Row;

#[derive(Deserialize, Debug)]
struct CsvRecord {
    id: Option<String>,
    lat: f64,
    lon: f64,
}

/// Read `id`, `lat`, `lon` rows from a CSV file with a header line. Columns are matched by
/// name, so their order does not matter and extra columns are ignored.
pub fn read_rows_from_csv(path: &Path, delimiter: u8) -> Result<Vec<Row>, ConversionError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| ConversionError::unreadable(path, err))?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRecord>() {
        let record = record.map_err(|err| ConversionError::unreadable(path, err))?;
        rows.push(Row::new(record.id.as_deref(), record.lat, record.lon));
    }
    log::debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

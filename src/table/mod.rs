pub mod csv_table;
pub mod gdal_table;
pub mod row;

use std::path::Path;

use crate::error::ConversionError;

use self::row::Row;

/// Kind of input file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Csv,
    Spreadsheet,
}

impl SourceType {
    pub fn from_path(path: &Path) -> Result<Self, ConversionError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(SourceType::Csv),
            Some("xlsx") | Some("xls") | Some("ods") => Ok(SourceType::Spreadsheet),
            _ => Err(ConversionError::unreadable(
                path,
                "Please select a valid .csv or .xlsx file",
            )),
        }
    }
}

/// Options for reading the input table.
#[derive(Debug, Clone)]
pub struct TableSettings {
    pub csv_delimiter: u8,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self { csv_delimiter: b',' }
    }
}

/// Read all rows of the table at `path`, in file order.
pub fn read_rows(path: &Path, settings: &TableSettings) -> Result<Vec<Row>, ConversionError> {
    let source_type = SourceType::from_path(path)?;
    if !path.is_file() {
        return Err(ConversionError::unreadable(path, "File not found"));
    }
    log::debug!("Reading {:?} as {:?}", path, source_type);
    match source_type {
        SourceType::Csv => csv_table::read_rows_from_csv(path, settings.csv_delimiter),
        SourceType::Spreadsheet => gdal_table::read_rows_from_spreadsheet(path),
    }
}

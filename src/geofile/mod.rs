pub mod feature;
pub mod gdal_geofile;
pub mod geojson;

use std::path::Path;

use crate::error::ConversionError;

use self::{feature::Feature, gdal_geofile::GdalDriverType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Kml,
    GeoJson,
}

impl OutputFormat {
    /// Pick the format from the file extension, KML unless it is `.geojson` or `.json`.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| extension.to_ascii_lowercase());
        match extension.as_deref() {
            Some("geojson") | Some("json") => OutputFormat::GeoJson,
            _ => OutputFormat::Kml,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Kml => "KML",
            OutputFormat::GeoJson => "GeoJSON",
        }
    }
}

/// Write the features in the given format. For KML, `document_name` names the folder holding
/// the placemarks.
pub fn write_features(
    features: &[Feature],
    output_filepath: &Path,
    format: OutputFormat,
    document_name: &str,
) -> Result<(), ConversionError> {
    match format {
        OutputFormat::Kml => gdal_geofile::write_features_to_geofile(
            features,
            output_filepath,
            document_name,
            GdalDriverType::Kml,
        ),
        OutputFormat::GeoJson => geojson::write_features_to_geojson(features, output_filepath),
    }
}

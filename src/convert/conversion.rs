use std::path::{Path, PathBuf};

use crate::{
    error::ConversionError,
    export::export_dir::ExportDir,
    geofile::{feature::FeatureKind, write_features, OutputFormat},
    geometry::builder::build_features,
    table::{read_rows, TableSettings},
};

/// What to convert and where to write it, relative to the export directory.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub kind: FeatureKind,
    pub input: PathBuf,
    pub output_filename: String,
}

#[derive(Debug, Clone)]
pub struct ConversionSettings {
    pub output_root: PathBuf,
    pub table: TableSettings,
    /// Name of the KML document, the output file stem when unset.
    pub document_name: Option<String>,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            table: TableSettings::default(),
            document_name: None,
        }
    }
}

/// Output file name for a run: `output_<kind>.kml` by default, `.kml` appended to requested
/// names without a known geofile extension.
pub fn output_filename_for(kind: FeatureKind, requested: Option<&str>) -> String {
    match requested {
        None => format!("output_{}.kml", kind),
        Some(requested) => {
            let extension = Path::new(requested)
                .extension()
                .and_then(|extension| extension.to_str())
                .map(|extension| extension.to_ascii_lowercase());
            match extension.as_deref() {
                Some("kml") | Some("geojson") | Some("json") => requested.to_string(),
                _ => format!("{}.kml", requested),
            }
        }
    }
}

/// Read the table, group it into features and write them into `export_dir`.
pub fn convert(
    request: &ConversionRequest,
    export_dir: &ExportDir,
    settings: &ConversionSettings,
) -> anyhow::Result<PathBuf> {
    let rows = read_rows(&request.input, &settings.table)?;
    log::info!("Read {} rows from {:?}", rows.len(), request.input);

    let features = build_features(&rows, request.kind)?;
    log::info!("Built {} {} features", features.len(), request.kind);

    let output_filepath = export_dir.output_path(&request.output_filename);
    let format = OutputFormat::from_path(&output_filepath);
    let document_name = match &settings.document_name {
        Some(name) => name.to_owned(),
        None => output_filepath
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    log::debug!("Writing {} to {:?}", format.name(), output_filepath);
    write_features(&features, &output_filepath, format, &document_name)?;
    Ok(output_filepath)
}

/// Run one conversion and report its outcome.
///
/// Conversion failures are printed as a one-line summary and their full chain is appended
/// to the error log of the export directory; the result is then `Ok(None)`. Only failing to
/// set up the export directory or to write the log is returned as an error.
pub fn run(
    request: &ConversionRequest,
    settings: &ConversionSettings,
) -> anyhow::Result<Option<PathBuf>> {
    let export_dir = ExportDir::create_for_today(&settings.output_root)?;
    log::debug!("Exporting to {:?}", export_dir.path());
    match convert(request, &export_dir, settings) {
        Ok(output_filepath) => {
            println!(
                "\n✓ {} {} file {} has been successfully created!",
                request.kind.title(),
                OutputFormat::from_path(&output_filepath).name(),
                request.output_filename
            );
            Ok(Some(output_filepath))
        }
        Err(err) => {
            log::error!("Conversion of {:?} failed: {:#}", request.input, err);
            let log_filepath =
                export_dir.append_error_log(chrono::Local::now().naive_local(), &describe(&err))?;
            println!("✕ {}. Check log file {:?}", summary(&err), log_filepath);
            Ok(None)
        }
    }
}

fn summary(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConversionError>() {
        Some(ConversionError::EmptyInput) => "Imported file is empty. Try another one".to_string(),
        Some(_) => format!("{:#}", err),
        None => format!("An unexpected error occurred: {:#}", err),
    }
}

fn describe(err: &anyhow::Error) -> String {
    format!("{:?}", err)
}

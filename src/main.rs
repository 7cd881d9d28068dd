extern crate log;
pub mod convert;
pub mod error;
pub mod export;
pub mod geofile;
pub mod geometry;
pub mod table;
use crate::convert::conversion::{output_filename_for, run, ConversionRequest, ConversionSettings};
use crate::geofile::feature::FeatureKind;
use crate::table::TableSettings;
use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

const TABLE_EXAMPLES: &str = "\
File examples:
    Points:
        id      lat         lon
        point1  38.25421    23.28931
        point2  38.27523    23.31792
        point3  38.25991    23.36405
        point4  38.23862    23.32512
    this will create a kml with 4 points.

    Lines:
        id      lat         lon
        line1   38.25421    23.28931
                38.27523    23.31792
                38.25991    23.36405
        line2   38.23862    23.32512
                38.25411    23.28921
    this will create a kml with 2 lines.
    line1 will have 3 vertices and line2 will have 2 vertices.

    Polygons:
        id      lat         lon
        poly1   38.25421    23.28931
                38.27523    23.31792
                38.25991    23.36405
                38.23862    23.32512
        poly2   38.25411    23.28921
                38.27513    23.31782
                38.25981    23.36395
    this will create a kml with 2 polygons.
    poly1 will have 4 vertices and poly2 will have 3 vertices.

Example:
    excel_to_kml line inputlines.xlsx outputlines.kml";

/// Geometry type as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Point,
    Line,
    Polygon,
}

impl From<KindArg> for FeatureKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Point => FeatureKind::Point,
            KindArg::Line => FeatureKind::Line,
            KindArg::Polygon => FeatureKind::Polygon,
        }
    }
}

/// Generate a KML file of points, lines or polygons from a table with id | lat | lon columns.
///
/// The first row of the table is the header with the exact names id, lat, lon. A row with
/// an id starts a new feature; for lines and polygons the following rows with an empty id
/// add vertices to it. The file is written to a <YYYY.MM.DD>_KML directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about, after_long_help = TABLE_EXAMPLES)]
struct Args {
    /// Geometry type of the features.
    #[arg(value_enum)]
    kind: KindArg,
    /// Input .csv, .xlsx, .xls or .ods file.
    input: PathBuf,
    /// Output file name, `output_<KIND>.kml` by default. `.kml` is appended when missing.
    output: Option<String>,
    /// Path to an optional YAML config file.
    #[arg(short, long)]
    config_filepath: Option<String>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct Config {
    output_root: Option<PathBuf>,
    csv_delimiter: Option<char>,
    document_name: Option<String>,
}

impl Config {
    fn read(config_filepath: &str) -> anyhow::Result<Self> {
        if !Path::new(config_filepath).exists() {
            return Err(anyhow!("Config file {} not found", config_filepath));
        }
        let config_contents = read_to_string(config_filepath)?;
        Ok(serde_yaml::from_str(&config_contents)?)
    }

    fn into_settings(self) -> anyhow::Result<ConversionSettings> {
        let csv_delimiter = match self.csv_delimiter {
            Some(delimiter) if delimiter.is_ascii() => delimiter as u8,
            Some(delimiter) => {
                return Err(anyhow!(
                    "CSV delimiter {:?} is not a single-byte character",
                    delimiter
                ))
            }
            None => TableSettings::default().csv_delimiter,
        };
        let defaults = ConversionSettings::default();
        Ok(ConversionSettings {
            output_root: self.output_root.unwrap_or(defaults.output_root),
            table: TableSettings { csv_delimiter },
            document_name: self.document_name,
        })
    }
}

fn try_main() -> anyhow::Result<bool> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config_filepath {
        Some(config_filepath) => Config::read(config_filepath)?,
        None => Config::default(),
    };
    log::debug!("{:?}", config);
    let settings = config.into_settings()?;

    let kind = FeatureKind::from(args.kind);
    let request = ConversionRequest {
        kind,
        output_filename: output_filename_for(kind, args.output.as_deref()),
        input: args.input,
    };
    log::info!(
        "Converting {:?} to {} features in {:?}",
        request.input,
        request.kind,
        request.output_filename
    );
    Ok(run(&request, &settings)?.is_some())
}

fn main() {
    match try_main() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:?}", e);
            std::process::exit(1)
        }
    }
}

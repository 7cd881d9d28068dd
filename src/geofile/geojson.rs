use std::{fs, path::Path};

use crate::error::ConversionError;

use super::feature::Feature;

pub fn write_features_to_geojson(
    features: &[Feature],
    output_filepath: &Path,
) -> Result<(), ConversionError> {
    log::info!(
        "Writing {} features to {:?}",
        features.len(),
        output_filepath
    );
    let geojson_contents = geojson::GeoJson::from(to_feature_collection(features));
    fs::write(output_filepath, geojson_contents.to_string())
        .map_err(|err| ConversionError::write_failure(output_filepath, err))
}

fn to_feature_collection(features: &[Feature]) -> geojson::FeatureCollection {
    features
        .iter()
        .map(|feature| {
            let mut properties = geojson::JsonObject::new();
            properties.insert(
                "name".to_string(),
                geojson::JsonValue::from(feature.name.clone()),
            );
            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.to_geometry(),
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect()
}

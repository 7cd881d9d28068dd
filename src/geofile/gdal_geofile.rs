use std::path::Path;

use gdal::vector::{FieldValue, LayerAccess, OGRFieldType, OGRwkbGeometryType};

use crate::error::ConversionError;

use super::feature::{Feature, FeatureKind};

/// Attribute written as the placemark name, the default `NameField` of the KML driver.
const NAME_FIELD: &str = "Name";

pub enum GdalDriverType {
    Kml,
}

impl GdalDriverType {
    pub fn name(&self) -> &'static str {
        match self {
            GdalDriverType::Kml => "KML",
        }
    }
}

/// Write the features into one layer named `layer_name`, each with its name as attribute.
///
/// No spatial reference is attached: coordinates are already WGS84 lon/lat, which is what
/// the KML driver expects from a layer without one.
pub fn write_features_to_geofile(
    features: &[Feature],
    output_filepath: &Path,
    layer_name: &str,
    driver: GdalDriverType,
) -> Result<(), ConversionError> {
    let failed =
        |err: gdal::errors::GdalError| ConversionError::write_failure(output_filepath, err);

    gdal::DriverManager::register_all();
    let driver = gdal::DriverManager::get_driver_by_name(driver.name()).map_err(failed)?;

    let layer_type = match features.first().map(|feature| feature.kind) {
        Some(FeatureKind::Point) => OGRwkbGeometryType::wkbPoint,
        Some(FeatureKind::Line) => OGRwkbGeometryType::wkbLineString,
        Some(FeatureKind::Polygon) => OGRwkbGeometryType::wkbPolygon,
        None => OGRwkbGeometryType::wkbUnknown,
    };

    let mut dataset = driver
        .create_vector_only(output_filepath)
        .map_err(failed)?;
    let layer_options = gdal::LayerOptions {
        name: layer_name,
        srs: None,
        ty: layer_type,
        options: None,
    };
    let mut layer = dataset.create_layer(layer_options).map_err(failed)?;
    layer
        .create_defn_fields(&[(NAME_FIELD, OGRFieldType::OFTString)])
        .map_err(failed)?;

    log::info!(
        "Writing {} features to {:?}",
        features.len(),
        output_filepath
    );
    for feature in features {
        if feature.is_degenerate() {
            log::warn!(
                "{} '{}' has only {} vertices",
                feature.kind.title(),
                feature.name,
                feature.vertices.len()
            );
        }
        let wkb = wkb::geom_to_wkb(&feature.to_geometry()).map_err(|err| {
            ConversionError::write_failure(
                output_filepath,
                format!("Could not write geometry to WKB, {:?}", err),
            )
        })?;
        let geometry = gdal::vector::Geometry::from_wkb(&wkb).map_err(failed)?;
        layer
            .create_feature_fields(
                geometry,
                &[NAME_FIELD],
                &[FieldValue::StringValue(feature.name.clone())],
            )
            .map_err(failed)?;
    }
    // The driver writes the document out when the dataset is dropped.
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use approx::assert_relative_eq;
    use rstest::rstest;
    use testdir::testdir;

    use crate::{
        error::ConversionError,
        geofile::feature::{Feature, FeatureKind},
    };

    use super::{write_features_to_geofile, GdalDriverType};

    fn feature(name: &str, kind: FeatureKind, vertices: &[(f64, f64)]) -> Feature {
        Feature {
            name: name.to_string(),
            kind,
            vertices: vertices.iter().copied().map(geo::Coord::from).collect(),
        }
    }

    fn write_kml(features: &[Feature]) -> String {
        let output_filepath = testdir!().join("output.kml");
        write_features_to_geofile(features, &output_filepath, "test", GdalDriverType::Kml)
            .unwrap();
        fs::read_to_string(output_filepath).unwrap()
    }

    /// Coordinate tuples of every `<coordinates>` element, in document order.
    fn coordinates(kml: &str) -> Vec<Vec<(f64, f64)>> {
        kml.split("<coordinates>")
            .skip(1)
            .map(|chunk| {
                let text = chunk.split("</coordinates>").next().unwrap();
                text.split_whitespace()
                    .map(|tuple| {
                        let mut values = tuple.split(',').map(|v| v.parse::<f64>().unwrap());
                        (values.next().unwrap(), values.next().unwrap())
                    })
                    .collect()
            })
            .collect()
    }

    fn assert_coordinates_eq(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (actual, expected) in actual.iter().zip(expected) {
            assert_relative_eq!(actual.0, expected.0);
            assert_relative_eq!(actual.1, expected.1);
        }
    }

    #[rstest]
    fn test_point_placemark() {
        let kml = write_kml(&[feature("point1", FeatureKind::Point, &[(23.28931, 38.25421)])]);
        assert!(kml.contains("<kml"));
        assert!(kml.contains("<name>test</name>"));
        assert!(kml.contains("<name>point1</name>"));
        assert!(kml.contains("<Point>"));
        assert_coordinates_eq(&coordinates(&kml)[0], &[(23.28931, 38.25421)]);
    }

    #[rstest]
    fn test_line_keeps_vertex_order() {
        let vertices = [(23.28, 38.25), (23.31, 38.27), (23.36, 38.25)];
        let kml = write_kml(&[feature("line1", FeatureKind::Line, &vertices)]);
        assert!(kml.contains("<LineString>"));
        assert_coordinates_eq(&coordinates(&kml)[0], &vertices);
    }

    #[rstest]
    fn test_polygon_ring_is_closed() {
        let kml = write_kml(&[feature(
            "poly1",
            FeatureKind::Polygon,
            &[(23.28, 38.25), (23.31, 38.27), (23.36, 38.25)],
        )]);
        assert!(kml.contains("<outerBoundaryIs>"));
        assert!(kml.contains("<LinearRing>"));
        assert_coordinates_eq(
            &coordinates(&kml)[0],
            &[(23.28, 38.25), (23.31, 38.27), (23.36, 38.25), (23.28, 38.25)],
        );
    }

    #[rstest]
    fn test_one_placemark_per_feature() {
        let kml = write_kml(&[
            feature("a", FeatureKind::Line, &[(0.0, 0.0), (1.0, 1.0)]),
            feature("b", FeatureKind::Line, &[(2.0, 2.0), (3.0, 3.0)]),
        ]);
        assert_eq!(kml.matches("<Placemark").count(), 2);
        assert!(kml.find("<name>a</name>").unwrap() < kml.find("<name>b</name>").unwrap());
        assert_eq!(coordinates(&kml).len(), 2);
    }

    #[rstest]
    fn test_names_are_escaped() {
        let kml = write_kml(&[feature("A & <B>", FeatureKind::Point, &[(1.5, 2.5)])]);
        assert!(kml.contains("<name>A &amp; &lt;B&gt;</name>"));
    }

    #[rstest]
    fn test_write_into_missing_directory_fails() {
        let output_filepath = testdir!().join("missing").join("output.kml");
        let result =
            write_features_to_geofile(&[], &output_filepath, "output", GdalDriverType::Kml);
        assert!(matches!(result, Err(ConversionError::WriteFailure { .. })));
    }
}

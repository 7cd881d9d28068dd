use std::fmt;

/// Geometry type of the features produced by one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Point,
    Line,
    Polygon,
}

impl FeatureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Point => "point",
            FeatureKind::Line => "line",
            FeatureKind::Polygon => "polygon",
        }
    }

    /// Name with a leading capital, as shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            FeatureKind::Point => "Point",
            FeatureKind::Line => "Line",
            FeatureKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named geometric object destined for the output document.
///
/// Vertices are stored as read, `x` being the longitude and `y` the latitude. For polygons
/// they describe the outer boundary and the ring is left open; see [`Feature::to_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub kind: FeatureKind,
    pub vertices: Vec<geo::Coord>,
}

impl Feature {
    /// Convert to a `geo` geometry for serialization.
    ///
    /// Polygon rings are closed here: `geo::Polygon::new` repeats the first vertex at the
    /// end when the input does not already do so.
    pub fn to_geometry(&self) -> geo::Geometry {
        match self.kind {
            FeatureKind::Point => {
                // Builders never emit a feature without vertices.
                let coord = self
                    .vertices
                    .first()
                    .copied()
                    .unwrap_or(geo::Coord { x: 0.0, y: 0.0 });
                geo::Geometry::Point(geo::Point::from(coord))
            }
            FeatureKind::Line => {
                geo::Geometry::LineString(geo::LineString::new(self.vertices.clone()))
            }
            FeatureKind::Polygon => geo::Geometry::Polygon(geo::Polygon::new(
                geo::LineString::new(self.vertices.clone()),
                vec![],
            )),
        }
    }

    /// Whether the geometry is too small to be meaningful for its kind, e.g. a one vertex line.
    pub fn is_degenerate(&self) -> bool {
        match self.kind {
            FeatureKind::Point => false,
            FeatureKind::Line => self.vertices.len() < 2,
            FeatureKind::Polygon => {
                let mut distinct = self.vertices.clone();
                if distinct.len() > 1 && distinct.first() == distinct.last() {
                    distinct.pop();
                }
                distinct.len() < 3
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Feature, FeatureKind};

    fn feature(kind: FeatureKind, vertices: Vec<(f64, f64)>) -> Feature {
        Feature {
            name: "f".to_string(),
            kind,
            vertices: vertices.into_iter().map(geo::Coord::from).collect(),
        }
    }

    #[rstest]
    fn test_polygon_ring_is_closed_on_conversion() {
        let polygon = feature(
            FeatureKind::Polygon,
            vec![(23.28, 38.25), (23.31, 38.27), (23.36, 38.25)],
        );
        match polygon.to_geometry() {
            geo::Geometry::Polygon(polygon) => {
                let ring: Vec<geo::Coord> = polygon.exterior().coords().copied().collect();
                assert_eq!(ring.len(), 4);
                assert_eq!(ring.first(), ring.last());
            }
            other => panic!("Expected a polygon, got {:?}", other),
        }
        // The feature itself keeps the open ring.
        assert_eq!(polygon.vertices.len(), 3);
    }

    #[rstest]
    fn test_point_uses_lon_as_x() {
        let point = feature(FeatureKind::Point, vec![(23.28931, 38.25421)]);
        assert_eq!(
            point.to_geometry(),
            geo::Geometry::Point(geo::Point::new(23.28931, 38.25421))
        );
    }

    #[rstest]
    #[case(FeatureKind::Point, vec![(0.0, 0.0)], false)]
    #[case(FeatureKind::Line, vec![(0.0, 0.0)], true)]
    #[case(FeatureKind::Line, vec![(0.0, 0.0), (1.0, 1.0)], false)]
    #[case(FeatureKind::Polygon, vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], true)]
    #[case(FeatureKind::Polygon, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], false)]
    fn test_is_degenerate(
        #[case] kind: FeatureKind,
        #[case] vertices: Vec<(f64, f64)>,
        #[case] expected: bool,
    ) {
        assert_eq!(feature(kind, vertices).is_degenerate(), expected);
    }
}

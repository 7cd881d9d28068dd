use crate::{
    error::{ConversionError, MalformedReason},
    geofile::feature::{Feature, FeatureKind},
    table::row::Row,
};

/// Feature that is still collecting vertices.
struct FeatureBuilder {
    name: String,
    kind: FeatureKind,
    vertices: Vec<geo::Coord>,
}

impl FeatureBuilder {
    fn new(name: &str, kind: FeatureKind, first_vertex: geo::Coord) -> Self {
        Self {
            name: name.to_string(),
            kind,
            vertices: vec![first_vertex],
        }
    }

    fn push(&mut self, vertex: geo::Coord) {
        self.vertices.push(vertex);
    }

    fn finish(self) -> Feature {
        Feature {
            name: self.name,
            kind: self.kind,
            vertices: self.vertices,
        }
    }
}

/// Group the rows of a table into features of the given kind.
///
/// A row with an id (header row) starts a new feature, a row without one (continuation row)
/// adds a vertex to the feature started last. In point mode every row is a feature of its
/// own and must carry an id. Features come out in the order of their header rows, vertices
/// in row order.
///
/// Row numbers reported in errors count data rows from 1.
pub fn build_features(rows: &[Row], kind: FeatureKind) -> Result<Vec<Feature>, ConversionError> {
    if rows.is_empty() {
        return Err(ConversionError::EmptyInput);
    }
    match kind {
        FeatureKind::Point => build_points(rows),
        FeatureKind::Line | FeatureKind::Polygon => build_vertex_groups(rows, kind),
    }
}

fn build_points(rows: &[Row]) -> Result<Vec<Feature>, ConversionError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            ensure_finite(index, row)?;
            match &row.id {
                Some(id) => Ok(FeatureBuilder::new(id, FeatureKind::Point, row.coord()).finish()),
                None => Err(ConversionError::MalformedTable {
                    row: index + 1,
                    reason: MalformedReason::UnnamedPoint,
                }),
            }
        })
        .collect()
}

fn build_vertex_groups(rows: &[Row], kind: FeatureKind) -> Result<Vec<Feature>, ConversionError> {
    let mut features = Vec::new();
    let mut current: Option<FeatureBuilder> = None;
    for (index, row) in rows.iter().enumerate() {
        ensure_finite(index, row)?;
        match &row.id {
            Some(id) => {
                let previous = current.replace(FeatureBuilder::new(id, kind, row.coord()));
                features.extend(previous.map(FeatureBuilder::finish));
            }
            None => match current.as_mut() {
                Some(builder) => builder.push(row.coord()),
                None => {
                    return Err(ConversionError::MalformedTable {
                        row: index + 1,
                        reason: MalformedReason::ContinuationBeforeHeader,
                    })
                }
            },
        }
    }
    features.extend(current.map(FeatureBuilder::finish));
    Ok(features)
}

fn ensure_finite(index: usize, row: &Row) -> Result<(), ConversionError> {
    if row.is_finite() {
        Ok(())
    } else {
        Err(ConversionError::MalformedTable {
            row: index + 1,
            reason: MalformedReason::NonFiniteCoordinate,
        })
    }
}

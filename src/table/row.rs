/// One record of the input table.
///
/// `id` is `Some` only on the first row of a feature. Blank ids are normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Row {
    pub fn new(id: Option<&str>, lat: f64, lon: f64) -> Self {
        let id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Self { id, lat, lon }
    }

    pub fn header(id: &str, lat: f64, lon: f64) -> Self {
        Self::new(Some(id), lat, lon)
    }

    pub fn continuation(lat: f64, lon: f64) -> Self {
        Self::new(None, lat, lon)
    }

    /// Vertex of this row, `x` is the longitude.
    pub fn coord(&self) -> geo::Coord {
        geo::Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

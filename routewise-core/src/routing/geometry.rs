//! Path geometry returned by a directions service.

use geo::{Coord, LineString};

/// Drivable path through an ordered list of stops.
///
/// The path is handed to the rendering layer untouched; the engine only
/// inspects `distance_km` for the two-stop case.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use routewise_core::RouteGeometry;
///
/// let geometry = RouteGeometry::new(
///     LineString::from(vec![Coord { x: 13.37, y: 52.52 }, Coord { x: 13.40, y: 52.51 }]),
///     Some(2.4),
/// );
/// assert_eq!(geometry.points().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteGeometry {
    /// Ordered `(longitude, latitude)` vertices.
    pub path: LineString<f64>,
    /// Route length reported by the service, in kilometres.
    pub distance_km: Option<f64>,
}

impl RouteGeometry {
    /// Construct a geometry from a path and optional reported distance.
    #[must_use]
    pub const fn new(path: LineString<f64>, distance_km: Option<f64>) -> Self {
        Self { path, distance_km }
    }

    /// Iterate over the path vertices.
    pub fn points(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.path.coords().copied()
    }
}

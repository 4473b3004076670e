//! Assemble the caller-facing result of an optimization.

use geo::Coord;

use crate::{Address, Route, RouteGeometry};

/// Distance and visiting order, as shown to the user.
///
/// # Examples
/// ```
/// use routewise_core::format_distance;
///
/// assert_eq!(format_distance(0.0), "0.00 km");
/// assert_eq!(format_distance(12.345), "12.35 km");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Total distance with two decimals and a `" km"` suffix.
    pub distance: String,
    /// Addresses in visiting order.
    pub order: Vec<Address>,
}

/// Position of a stop within the caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopRole {
    /// First address; the route always begins here.
    Start,
    /// Intermediate address whose position the heuristic chooses.
    Waypoint,
    /// Last address; the route always ends here.
    End,
}

/// A resolved input address, for drawing markers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// The caller's address text.
    pub address: Address,
    /// Geocoded `(longitude, latitude)`.
    pub coordinate: Coord<f64>,
    /// Start, waypoint or end.
    pub role: StopRole,
}

/// Everything produced by one successful optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedRoute {
    /// Distance and order summary.
    pub summary: RouteSummary,
    /// Visiting order as input indices.
    pub route: Route,
    /// Driving path through the stops in visiting order.
    pub geometry: RouteGeometry,
    /// Stops in input order.
    pub stops: Vec<Stop>,
}

/// Format a distance in kilometres with exactly two decimals.
#[must_use]
pub fn format_distance(kilometres: f64) -> String {
    format!("{kilometres:.2} km")
}

/// Build the [`RouteSummary`] for `route` over `addresses`.
///
/// Indices outside `addresses` are skipped; a [`Route`] produced by
/// [`nearest_neighbour`](crate::nearest_neighbour) for the same list never
/// contains any.
#[must_use]
pub fn summarise(route: &Route, total_distance_km: f64, addresses: &[Address]) -> RouteSummary {
    RouteSummary {
        distance: format_distance(total_distance_km),
        order: route
            .indices()
            .iter()
            .filter_map(|&index| addresses.get(index).cloned())
            .collect(),
    }
}

/// Pair addresses with their coordinates and roles, in input order.
#[must_use]
pub fn stops(addresses: &[Address], coordinates: &[Coord<f64>]) -> Vec<Stop> {
    let last = addresses.len().saturating_sub(1);
    addresses
        .iter()
        .zip(coordinates)
        .enumerate()
        .map(|(index, (address, &coordinate))| Stop {
            address: address.clone(),
            coordinate,
            role: match index {
                0 => StopRole::Start,
                i if i == last => StopRole::End,
                _ => StopRole::Waypoint,
            },
        })
        .collect()
}

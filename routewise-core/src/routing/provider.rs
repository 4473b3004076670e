//! Provider traits for the routing service boundary.

use async_trait::async_trait;
use geo::Coord;

use super::{DistanceMatrix, RouteGeometry, RoutingError};

/// Fetch pairwise driving distances for a set of coordinates.
///
/// Implementers must return a square `n×n` matrix in kilometres where
/// `n == coordinates.len()` and `get(i, j)` is the distance from
/// `coordinates[i]` to `coordinates[j]`.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::Coord;
/// use routewise_core::{DistanceMatrix, DistanceMatrixProvider, RoutingError};
///
/// struct UnitProvider;
///
/// #[async_trait]
/// impl DistanceMatrixProvider for UnitProvider {
///     async fn distance_matrix(
///         &self,
///         coordinates: &[Coord<f64>],
///     ) -> Result<DistanceMatrix, RoutingError> {
///         let n = coordinates.len();
///         let rows = (0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
///             .collect();
///         DistanceMatrix::from_rows(rows).map_err(|err| RoutingError::ParseError {
///             message: err.to_string(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait DistanceMatrixProvider: Send + Sync {
    /// Return the distance matrix for `coordinates`.
    async fn distance_matrix(
        &self,
        coordinates: &[Coord<f64>],
    ) -> Result<DistanceMatrix, RoutingError>;
}

/// Fetch the driving path through an ordered list of coordinates.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Return the path visiting `coordinates` in order.
    async fn directions(&self, coordinates: &[Coord<f64>]) -> Result<RouteGeometry, RoutingError>;
}

#[async_trait]
impl<T> DistanceMatrixProvider for &T
where
    T: DistanceMatrixProvider + ?Sized,
{
    async fn distance_matrix(
        &self,
        coordinates: &[Coord<f64>],
    ) -> Result<DistanceMatrix, RoutingError> {
        (**self).distance_matrix(coordinates).await
    }
}

#[async_trait]
impl<T> DirectionsProvider for &T
where
    T: DirectionsProvider + ?Sized,
{
    async fn directions(&self, coordinates: &[Coord<f64>]) -> Result<RouteGeometry, RoutingError> {
        (**self).directions(coordinates).await
    }
}

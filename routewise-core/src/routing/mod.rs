//! Distances and paths between resolved coordinates.
//!
//! The [`DistanceMatrixProvider`] trait abstracts the retrieval of pairwise
//! driving distances and [`DirectionsProvider`] the retrieval of the path
//! geometry for a chosen visiting order. Both are thin boundaries to an
//! external routing service; failures surface as [`RoutingError`].

mod error;
mod geometry;
mod matrix;
mod provider;

pub use error::RoutingError;
pub use geometry::RouteGeometry;
pub use matrix::{DistanceMatrix, DistanceMatrixError};
pub use provider::{DirectionsProvider, DistanceMatrixProvider};

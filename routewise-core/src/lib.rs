//! Core domain types for the routewise engine.
//!
//! The engine takes an ordered list of free-text addresses, resolves each to
//! a coordinate, fetches pairwise driving distances, and chooses a visiting
//! order with a greedy nearest-neighbour heuristic. The first address is
//! always the start and the last always the end.
//!
//! External services sit behind the [`Geocoder`], [`DistanceMatrixProvider`]
//! and [`DirectionsProvider`] traits; HTTP implementations live in
//! `routewise-data`. [`RouteOptimizer`] composes them into the
//! [`Optimize`] pipeline.

mod address;
mod error;
pub mod geocode;
mod optimizer;
mod request;
pub mod routing;
mod sequencer;
mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use address::{Address, AddressError};
pub use error::OptimizeError;
pub use geocode::{
    AddressResolver, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY,
    DEFAULT_THROTTLE_DELAY, GeocodeError, Geocoder, GeocodingPolicy,
};
pub use optimizer::{Optimize, OptimizerConfig, RouteOptimizer};
pub use request::{MIN_ADDRESSES, OptimizeRequest, RequestValidationError};
pub use routing::{
    DirectionsProvider, DistanceMatrix, DistanceMatrixError, DistanceMatrixProvider,
    RouteGeometry, RoutingError,
};
pub use sequencer::{Route, Sequence, SequenceError, nearest_neighbour};
pub use summary::{OptimizedRoute, RouteSummary, Stop, StopRole, format_distance, stops, summarise};

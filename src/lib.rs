//! Facade crate for the routewise route optimization engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP
//! geocoding and routing adapters behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use routewise_core::{
    Address, AddressError, AddressResolver, DirectionsProvider, DistanceMatrix,
    DistanceMatrixError, DistanceMatrixProvider, GeocodeError, Geocoder, GeocodingPolicy,
    MIN_ADDRESSES, Optimize, OptimizeError, OptimizeRequest, OptimizedRoute, OptimizerConfig,
    RequestValidationError, Route, RouteGeometry, RouteOptimizer, RouteSummary, RoutingError,
    Stop, StopRole, format_distance, nearest_neighbour,
};

#[cfg(feature = "http")]
pub use routewise_data::{
    DEFAULT_USER_AGENT, ProviderBuildError,
    geocoding::{NominatimConfig, NominatimGeocoder},
    routing::{OrsConfig, OrsRoutingProvider},
};

#[cfg(feature = "test-support")]
pub use routewise_core::test_support;

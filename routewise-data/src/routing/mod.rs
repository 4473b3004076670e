//! OpenRouteService adapters for the routing provider traits.
//!
//! [`OrsRoutingProvider`] implements both
//! [`routewise_core::DistanceMatrixProvider`], via the Matrix API, and
//! [`routewise_core::DirectionsProvider`], via the Directions API in GeoJSON
//! form. Distances are always requested in kilometres.
//!
//! Failure mapping:
//!
//! - transport timeouts become [`RoutingError::Timeout`](routewise_core::RoutingError::Timeout);
//! - non-success statuses carrying an ORS error document become
//!   `ServiceError`, other statuses `HttpError`;
//! - `null` matrix cells become `Unreachable`;
//! - missing or malformed payloads become `ParseError`.

mod ors;
mod provider;

pub use provider::{DEFAULT_ORS_URL, DEFAULT_PROFILE, OrsConfig, OrsRoutingProvider};

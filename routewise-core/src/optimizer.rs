//! The end-to-end optimization pipeline.
//!
//! Stages run strictly in order for one request: geocode every address,
//! fetch the distance matrix, sequence the stops, fetch the path geometry,
//! assemble the summary. The first failure aborts the request.

use async_trait::async_trait;
use geo::Coord;
use log::{debug, info};

use crate::request::ensure_enough;
use crate::summary::{stops, summarise};
use crate::{
    Address, AddressResolver, DirectionsProvider, DistanceMatrix, DistanceMatrixProvider,
    Geocoder, GeocodingPolicy, OptimizeError, OptimizedRoute, RouteGeometry, RoutingError,
    nearest_neighbour,
};

/// Turn an ordered address list into a visiting order and summary.
///
/// Implementations must treat the first and last addresses as fixed and
/// return [`OptimizeError::InvalidRequest`] for fewer than two addresses
/// rather than panicking. Optimizers are `Send + Sync` so one instance can
/// serve concurrent requests.
#[async_trait]
pub trait Optimize: Send + Sync {
    /// Optimize the visiting order of `addresses`.
    async fn optimize(&self, addresses: &[Address]) -> Result<OptimizedRoute, OptimizeError>;
}

/// Configuration for [`RouteOptimizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Retry and pacing rules for geocoding.
    pub geocoding: GeocodingPolicy,
}

/// Optimizer combining a geocoder, a distance matrix provider and a
/// directions provider with the greedy nearest-neighbour sequencer.
///
/// Two-address requests skip the distance matrix request; their total
/// comes from the directions response when it reports one.
#[derive(Debug, Clone)]
pub struct RouteOptimizer<G, M, D> {
    resolver: AddressResolver<G>,
    matrix_provider: M,
    directions_provider: D,
}

impl<G, M, D> RouteOptimizer<G, M, D>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider,
{
    /// Construct an optimizer using default configuration.
    pub fn new(geocoder: G, matrix_provider: M, directions_provider: D) -> Self {
        Self::with_config(
            geocoder,
            matrix_provider,
            directions_provider,
            OptimizerConfig::default(),
        )
    }

    /// Construct an optimizer with explicit configuration.
    pub const fn with_config(
        geocoder: G,
        matrix_provider: M,
        directions_provider: D,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            resolver: AddressResolver::new(geocoder, config.geocoding),
            matrix_provider,
            directions_provider,
        }
    }

    async fn distance_matrix(
        &self,
        coordinates: &[Coord<f64>],
    ) -> Result<DistanceMatrix, OptimizeError> {
        if coordinates.len() == 2 {
            debug!("no waypoints, skipping the distance matrix request");
            return Ok(DistanceMatrix::zeros(2));
        }
        self.matrix_provider
            .distance_matrix(coordinates)
            .await
            .map_err(OptimizeError::RoutingProviderError)
    }
}

#[async_trait]
impl<G, M, D> Optimize for RouteOptimizer<G, M, D>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider,
{
    async fn optimize(&self, addresses: &[Address]) -> Result<OptimizedRoute, OptimizeError> {
        let nodes = addresses.len();
        ensure_enough(nodes)?;
        info!("optimizing a route through {nodes} addresses");

        let coordinates = self.resolver.resolve_all(addresses).await?;
        let matrix = self.distance_matrix(&coordinates).await?;
        let sequence = nearest_neighbour(&matrix, nodes).map_err(|err| {
            OptimizeError::RoutingProviderError(RoutingError::ParseError {
                message: err.to_string(),
            })
        })?;

        let ordered: Vec<Coord<f64>> = sequence
            .route
            .indices()
            .iter()
            .filter_map(|&index| coordinates.get(index).copied())
            .collect();
        let geometry = self
            .directions_provider
            .directions(&ordered)
            .await
            .map_err(OptimizeError::RouteGeometryError)?;

        let total_distance_km = if nodes == 2 {
            reported_distance(&geometry).unwrap_or(sequence.total_distance_km)
        } else {
            sequence.total_distance_km
        };
        let summary = summarise(&sequence.route, total_distance_km, addresses);
        info!("route ready: {}", summary.distance);

        Ok(OptimizedRoute {
            summary,
            route: sequence.route,
            geometry,
            stops: stops(addresses, &coordinates),
        })
    }
}

/// The directions service's own length for the path, when usable.
fn reported_distance(geometry: &RouteGeometry) -> Option<f64> {
    geometry
        .distance_km
        .filter(|distance| distance.is_finite() && *distance >= 0.0)
        // `-0.0` passes the check above but would print as "-0.00 km".
        .map(f64::abs)
}

//! Scripted, in-memory providers used by unit and behaviour tests.
//!
//! None of these types touch the network. Each records the requests it
//! receives so tests can assert on call order and counts.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use geo::{Coord, LineString};

use crate::{
    DirectionsProvider, DistanceMatrix, DistanceMatrixProvider, GeocodeError, Geocoder,
    RouteGeometry, RoutingError,
};

/// One scripted outcome of a geocoding call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeReply {
    /// Resolve to the given coordinate.
    Found(Coord<f64>),
    /// Report that no match exists.
    NotFound,
    /// Fail with [`GeocodeError::Timeout`] immediately.
    Timeout,
    /// Fail with [`GeocodeError::Provider`] carrying this message.
    Error(String),
    /// Never complete; the caller's deadline must fire.
    Hang,
}

/// [`Geocoder`] that replays a per-address script.
///
/// The `n`th call for an address receives the `n`th scripted reply; once
/// the script is exhausted its last reply repeats. Addresses without a
/// script fail with a provider error.
#[derive(Debug, Default)]
pub struct ScriptedGeocoder {
    scripts: HashMap<String, Vec<GeocodeReply>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
    /// Create a geocoder that knows no addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the replies for `address`.
    #[must_use]
    pub fn with_script<I>(mut self, address: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = GeocodeReply>,
    {
        self.scripts
            .insert(address.into(), replies.into_iter().collect());
        self
    }

    /// Make `address` always resolve to `coordinate`.
    #[must_use]
    pub fn with_found(self, address: impl Into<String>, coordinate: Coord<f64>) -> Self {
        self.with_script(address, [GeocodeReply::Found(coordinate)])
    }

    /// Every address queried so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made for `address`.
    pub fn calls_for(&self, address: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.as_str() == address)
            .count()
    }

    fn next_reply(&self, address: &str) -> Option<GeocodeReply> {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = calls.iter().filter(|call| call.as_str() == address).count();
        calls.push(address.to_owned());
        let script = self.scripts.get(address)?;
        script.get(previous).or_else(|| script.last()).cloned()
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        match self.next_reply(address) {
            Some(GeocodeReply::Found(coordinate)) => Ok(Some(coordinate)),
            Some(GeocodeReply::NotFound) => Ok(None),
            Some(GeocodeReply::Timeout) => Err(GeocodeError::Timeout),
            Some(GeocodeReply::Error(message)) => Err(GeocodeError::provider(message)),
            Some(GeocodeReply::Hang) => std::future::pending().await,
            None => Err(GeocodeError::provider(format!(
                "no scripted reply for {address}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum MatrixBehaviour {
    Fixed(DistanceMatrix),
    Unit,
    Fail(RoutingError),
}

/// [`DistanceMatrixProvider`] returning a canned answer.
#[derive(Debug)]
pub struct StubMatrixProvider {
    behaviour: MatrixBehaviour,
    requests: Mutex<Vec<Vec<Coord<f64>>>>,
}

impl StubMatrixProvider {
    const fn with_behaviour(behaviour: MatrixBehaviour) -> Self {
        Self {
            behaviour,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always return `matrix`, whatever the input size.
    #[must_use]
    pub const fn fixed(matrix: DistanceMatrix) -> Self {
        Self::with_behaviour(MatrixBehaviour::Fixed(matrix))
    }

    /// Return a matrix sized to the input with `1.0` off the diagonal.
    #[must_use]
    pub const fn unit() -> Self {
        Self::with_behaviour(MatrixBehaviour::Unit)
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: RoutingError) -> Self {
        Self::with_behaviour(MatrixBehaviour::Fail(error))
    }

    /// Coordinate lists received so far.
    pub fn requests(&self) -> Vec<Vec<Coord<f64>>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DistanceMatrixProvider for StubMatrixProvider {
    async fn distance_matrix(
        &self,
        coordinates: &[Coord<f64>],
    ) -> Result<DistanceMatrix, RoutingError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(coordinates.to_vec());
        match &self.behaviour {
            MatrixBehaviour::Fixed(matrix) => Ok(matrix.clone()),
            MatrixBehaviour::Unit => unit_matrix(coordinates.len()),
            MatrixBehaviour::Fail(error) => Err(error.clone()),
        }
    }
}

fn unit_matrix(size: usize) -> Result<DistanceMatrix, RoutingError> {
    let rows = (0..size)
        .map(|from| {
            (0..size)
                .map(|to| if from == to { 0.0 } else { 1.0 })
                .collect()
        })
        .collect();
    DistanceMatrix::from_rows(rows).map_err(|err| RoutingError::ParseError {
        message: err.to_string(),
    })
}

/// [`DirectionsProvider`] drawing straight segments between the stops.
#[derive(Debug)]
pub struct StubDirectionsProvider {
    outcome: Result<Option<f64>, RoutingError>,
    requests: Mutex<Vec<Vec<Coord<f64>>>>,
}

impl StubDirectionsProvider {
    const fn with_outcome(outcome: Result<Option<f64>, RoutingError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Return the stops joined by straight lines, without a distance.
    #[must_use]
    pub const fn straight_lines() -> Self {
        Self::with_outcome(Ok(None))
    }

    /// Return the stops joined by straight lines, reporting `distance_km`.
    #[must_use]
    pub const fn with_distance(distance_km: f64) -> Self {
        Self::with_outcome(Ok(Some(distance_km)))
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: RoutingError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Coordinate lists received so far.
    pub fn requests(&self) -> Vec<Vec<Coord<f64>>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DirectionsProvider for StubDirectionsProvider {
    async fn directions(&self, coordinates: &[Coord<f64>]) -> Result<RouteGeometry, RoutingError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(coordinates.to_vec());
        let distance_km = self.outcome.clone()?;
        Ok(RouteGeometry::new(
            LineString::from(coordinates.to_vec()),
            distance_km,
        ))
    }
}

//! OpenRouteService-backed distance matrix and directions providers.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use routewise_core::DistanceMatrixProvider;
//! use routewise_data::routing::{OrsConfig, OrsRoutingProvider};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OrsConfig::default().with_api_key("my-key");
//! let provider = OrsRoutingProvider::with_config(config)?;
//! let matrix = provider
//!     .distance_matrix(&[Coord { x: 8.68, y: 49.41 }, Coord { x: 8.69, y: 49.42 }])
//!     .await?;
//! println!("{:?}", matrix.get(0, 1));
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, LineString};
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use routewise_core::{
    DirectionsProvider, DistanceMatrix, DistanceMatrixProvider, RouteGeometry, RoutingError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ors::{
    DirectionsRequest, DirectionsResponse, ErrorResponse, MatrixRequest, MatrixResponse,
};
use crate::{DEFAULT_USER_AGENT, ProviderBuildError, error::endpoint};

/// Public OpenRouteService endpoint.
pub const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "driving-car";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OrsRoutingProvider`].
#[derive(Clone)]
pub struct OrsConfig {
    /// Base URL for the service, e.g. `"https://api.openrouteservice.org"`.
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: Option<String>,
    /// Routing profile, e.g. `"driving-car"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORS_URL.to_owned(),
            api_key: None,
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OrsConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Distance matrix and directions provider backed by OpenRouteService.
///
/// One pooled HTTP client serves both services. Distances are requested in
/// kilometres; coordinates are sent as `[longitude, latitude]`.
#[derive(Debug, Clone)]
pub struct OrsRoutingProvider {
    client: Client,
    config: OrsConfig,
    matrix_url: Url,
    directions_url: Url,
}

impl OrsRoutingProvider {
    /// Create a provider for `base_url` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OrsConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        let matrix_url = endpoint(&config.base_url, &["v2", "matrix", &config.profile])?;
        let directions_url = endpoint(
            &config.base_url,
            &["v2", "directions", &config.profile, "geojson"],
        )?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            matrix_url,
            directions_url,
        })
    }

    /// POST `body` as JSON and decode a JSON reply.
    async fn post<B, R>(&self, url: &Url, body: &B) -> Result<R, RoutingError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, api_key);
        }
        debug!("POST {url}");
        let sent = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        Self::check_status(sent, url)
            .await?
            .json()
            .await
            .map_err(|err| RoutingError::ParseError {
                message: err.to_string(),
            })
    }

    /// Turn non-success statuses into errors, preferring the service's own
    /// error document when present.
    async fn check_status(response: Response, url: &Url) -> Result<Response, RoutingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if let Ok(document) = serde_json::from_str::<ErrorResponse>(&body) {
            let (code, message) = document.error.into_parts();
            return Err(RoutingError::ServiceError { code, message });
        }
        Err(RoutingError::HttpError {
            url: url.to_string(),
            status: status.as_u16(),
            message: if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_owned()
            } else {
                body
            },
        })
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

fn positions(coordinates: &[Coord<f64>]) -> Result<Vec<[f64; 2]>, RoutingError> {
    if coordinates.len() < 2 {
        return Err(RoutingError::TooFewCoordinates {
            count: coordinates.len(),
        });
    }
    Ok(coordinates.iter().map(|c| [c.x, c.y]).collect())
}

/// Validate a matrix response against the number of requested locations.
fn convert_matrix(
    response: MatrixResponse,
    expected: usize,
) -> Result<DistanceMatrix, RoutingError> {
    let distances = response.distances.ok_or_else(|| RoutingError::ParseError {
        message: "matrix response missing distances".to_owned(),
    })?;
    if distances.len() != expected {
        return Err(RoutingError::ParseError {
            message: format!(
                "matrix response has {} rows, expected {expected}",
                distances.len()
            ),
        });
    }

    let rows = distances
        .into_iter()
        .enumerate()
        .map(|(from, row)| {
            row.into_iter()
                .enumerate()
                .map(|(to, cell)| cell.ok_or(RoutingError::Unreachable { from, to }))
                .collect::<Result<Vec<f64>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    DistanceMatrix::from_rows(rows).map_err(|err| RoutingError::ParseError {
        message: err.to_string(),
    })
}

/// Extract the path and reported distance from the first feature.
fn convert_directions(response: DirectionsResponse) -> Result<RouteGeometry, RoutingError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::ParseError {
            message: "directions response contains no features".to_owned(),
        })?;

    let path = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(RoutingError::ParseError {
                message: format!("position has {} ordinates", position.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let distance_km = feature.properties.summary.and_then(|summary| summary.distance);
    Ok(RouteGeometry::new(LineString::from(path), distance_km))
}

#[async_trait]
impl DistanceMatrixProvider for OrsRoutingProvider {
    async fn distance_matrix(
        &self,
        coordinates: &[Coord<f64>],
    ) -> Result<DistanceMatrix, RoutingError> {
        let request = MatrixRequest::distances_in_km(positions(coordinates)?);
        let response: MatrixResponse = self.post(&self.matrix_url, &request).await?;
        convert_matrix(response, coordinates.len())
    }
}

#[async_trait]
impl DirectionsProvider for OrsRoutingProvider {
    async fn directions(&self, coordinates: &[Coord<f64>]) -> Result<RouteGeometry, RoutingError> {
        let request = DirectionsRequest::in_km(positions(coordinates)?);
        let response: DirectionsResponse = self.post(&self.directions_url, &request).await?;
        convert_directions(response)
    }
}

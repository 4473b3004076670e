//! Nominatim-backed [`Geocoder`].
//!
//! # Example
//!
//! ```no_run
//! use routewise_core::Geocoder;
//! use routewise_data::geocoding::NominatimGeocoder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let geocoder = NominatimGeocoder::new("https://nominatim.openstreetmap.org")?;
//! if let Some(coordinate) = geocoder.geocode("10 Downing Street, London").await? {
//!     println!("lon {} lat {}", coordinate.x, coordinate.y);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use reqwest::Client;
use routewise_core::{GeocodeError, Geocoder};
use url::Url;

use super::nominatim::SearchResult;
use crate::{DEFAULT_USER_AGENT, ProviderBuildError, error::endpoint};

/// Public Nominatim endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string; Nominatim's usage policy requires one that
    /// identifies the application.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

/// Geocoder using the Nominatim search API.
///
/// Each call issues one `GET /search?q=…&format=jsonv2&limit=1`. An empty
/// result list means "no match"; a transport timeout maps to
/// [`GeocodeError::Timeout`] so the resolver retries it. Rate limiting is
/// left to the resolver's throttle delay.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    search_url: Url,
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(NominatimConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: NominatimConfig) -> Result<Self, ProviderBuildError> {
        let search_url = endpoint(&config.base_url, &["search"])?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, search_url })
    }

    fn search_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        url
    }
}

fn convert_reqwest_error(error: &reqwest::Error) -> GeocodeError {
    if error.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::provider(error.to_string())
    }
}

fn parse_ordinate(text: &str, name: &str) -> Result<f64, GeocodeError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeocodeError::provider(format!("invalid {name} {text:?} in response")))
}

/// Convert the first search hit to a `(longitude, latitude)` coordinate.
fn convert_results(results: &[SearchResult]) -> Result<Option<Coord<f64>>, GeocodeError> {
    let Some(first) = results.first() else {
        return Ok(None);
    };
    Ok(Some(Coord {
        x: parse_ordinate(&first.lon, "longitude")?,
        y: parse_ordinate(&first.lat, "latitude")?,
    }))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let url = self.search_url(address);
        debug!("geocoding \"{address}\"");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::provider(format!("HTTP {status}")));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|err| convert_reqwest_error(&err))?;
        if let Some(name) = results.first().and_then(|hit| hit.display_name.as_deref()) {
            debug!("\"{address}\" matched {name}");
        }
        convert_results(&results)
    }
}

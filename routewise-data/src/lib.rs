//! HTTP adapters for the routewise engine.
//!
//! - [`geocoding::NominatimGeocoder`] resolves addresses with the Nominatim
//!   search API.
//! - [`routing::OrsRoutingProvider`] fetches distance matrices and route
//!   geometry from OpenRouteService.
//!
//! Each adapter owns a single pooled [`reqwest::Client`] configured with a
//! request timeout and user agent, and must be driven from a Tokio runtime.

mod error;
pub mod geocoding;
pub mod routing;

pub use error::ProviderBuildError;

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "routewise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/leynos/routewise)"
);

//! Resolve addresses to coordinates.
//!
//! [`Geocoder`] is the boundary to an external geocoding service and performs
//! a single lookup per call. [`AddressResolver`] wraps a geocoder with the
//! retry and pacing rules of a [`GeocodingPolicy`]: timeouts are retried up
//! to a fixed number of attempts, everything else fails fast, and addresses
//! are processed strictly in order so nothing after a failure is looked up.

mod error;
mod policy;
mod provider;
mod resolver;

pub use error::GeocodeError;
pub use policy::{
    DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_THROTTLE_DELAY,
    GeocodingPolicy,
};
pub use provider::Geocoder;
pub use resolver::AddressResolver;

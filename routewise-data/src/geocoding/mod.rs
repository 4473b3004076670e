//! Nominatim adapter for the [`routewise_core::Geocoder`] trait.

mod nominatim;
mod provider;

pub use provider::{DEFAULT_NOMINATIM_URL, NominatimConfig, NominatimGeocoder};

//! Geocoder trait for the geocoding service boundary.

use async_trait::async_trait;
use geo::Coord;

use super::GeocodeError;

/// Resolve a free-text address to a `(longitude, latitude)` coordinate.
///
/// Implementations perform exactly one lookup per call; retrying and
/// pacing are the job of [`AddressResolver`](super::AddressResolver).
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::Coord;
/// use routewise_core::{GeocodeError, Geocoder};
///
/// struct Origin;
///
/// #[async_trait]
/// impl Geocoder for Origin {
///     async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
///         Ok((address == "origin").then_some(Coord { x: 0.0, y: 0.0 }))
///     }
/// }
/// ```
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `address`.
    ///
    /// Returns `Ok(None)` when the service answered but found no match.
    async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}

#[async_trait]
impl<T> Geocoder for &T
where
    T: Geocoder + ?Sized,
{
    async fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        (**self).geocode(address).await
    }
}

//! Terminal failures of an optimization request.

use thiserror::Error;

use crate::{Address, RequestValidationError, RoutingError};

/// Errors returned by [`Optimize::optimize`](crate::Optimize::optimize).
///
/// Every variant aborts the whole request; no partial summary is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The request itself was unusable, e.g. fewer than two addresses.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestValidationError),
    /// Every attempt to geocode `address` timed out.
    #[error("geocoding timeout for address: {address} (after {attempts} attempts)")]
    GeocodingTimeout {
        /// Address that could not be resolved.
        address: Address,
        /// Attempts made before giving up.
        attempts: u32,
    },
    /// The geocoding service found no match for `address`.
    #[error("could not geocode address: {address}")]
    AddressNotFound {
        /// Address that could not be resolved.
        address: Address,
    },
    /// The geocoding service failed for a reason other than a timeout.
    #[error("geocoding error for address {address}: {detail}")]
    GeocodingProviderError {
        /// Address being resolved when the failure occurred.
        address: Address,
        /// Provider-supplied failure detail.
        detail: String,
    },
    /// The distance matrix could not be obtained.
    #[error("distance matrix request failed: {0}")]
    RoutingProviderError(#[source] RoutingError),
    /// The route geometry could not be obtained.
    #[error("route geometry request failed: {0}")]
    RouteGeometryError(#[source] RoutingError),
}

impl OptimizeError {
    /// Whether the caller, rather than an upstream service, is at fault.
    ///
    /// Invalid requests and unknown addresses can be fixed by editing the
    /// input; everything else is an upstream failure.
    ///
    /// # Examples
    /// ```
    /// use routewise_core::{Address, OptimizeError};
    ///
    /// let address = Address::new("Atlantis")?;
    /// assert!(OptimizeError::AddressNotFound { address }.is_client_error());
    /// # Ok::<(), routewise_core::AddressError>(())
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::AddressNotFound { .. })
    }

    /// The address the failure relates to, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        match self {
            Self::GeocodingTimeout { address, .. }
            | Self::AddressNotFound { address }
            | Self::GeocodingProviderError { address, .. } => Some(address),
            Self::InvalidRequest(_)
            | Self::RoutingProviderError(_)
            | Self::RouteGeometryError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn address(text: &str) -> Address {
        Address::new(text).expect("valid address")
    }

    #[rstest]
    fn messages_name_the_address() {
        let err = OptimizeError::AddressNotFound {
            address: address("Nowhere Lane"),
        };
        assert_eq!(err.to_string(), "could not geocode address: Nowhere Lane");

        let err = OptimizeError::GeocodingTimeout {
            address: address("Slow Street"),
            attempts: 3,
        };
        assert!(err.to_string().contains("Slow Street"));
    }

    #[rstest]
    #[case(
        OptimizeError::InvalidRequest(RequestValidationError::TooFewAddresses { count: 1 }),
        true
    )]
    #[case(OptimizeError::AddressNotFound { address: address("X") }, true)]
    #[case(OptimizeError::GeocodingTimeout { address: address("X"), attempts: 3 }, false)]
    #[case(
        OptimizeError::GeocodingProviderError { address: address("X"), detail: "boom".into() },
        false
    )]
    #[case(
        OptimizeError::RoutingProviderError(RoutingError::TooFewCoordinates { count: 1 }),
        false
    )]
    #[case(
        OptimizeError::RouteGeometryError(RoutingError::TooFewCoordinates { count: 1 }),
        false
    )]
    fn classifies_client_errors(#[case] err: OptimizeError, #[case] expected: bool) {
        assert_eq!(err.is_client_error(), expected);
    }

    #[rstest]
    fn exposes_offending_address() {
        let err = OptimizeError::GeocodingProviderError {
            address: address("Main St"),
            detail: "HTTP 503".into(),
        };
        assert_eq!(err.address().map(Address::as_str), Some("Main St"));
        assert!(
            OptimizeError::RouteGeometryError(RoutingError::TooFewCoordinates { count: 0 })
                .address()
                .is_none()
        );
    }
}

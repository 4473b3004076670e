use thiserror::Error;

/// Errors from a single [`Geocoder::geocode`](super::Geocoder::geocode) call.
///
/// "No match" is not an error; providers report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The call did not complete in time.
    ///
    /// This is the only variant the resolver retries.
    #[error("geocoding request timed out")]
    Timeout,
    /// Any other provider failure: transport, HTTP status or parsing.
    #[error("{message}")]
    Provider {
        /// Human-readable failure detail.
        message: String,
    },
}

impl GeocodeError {
    /// Construct a [`GeocodeError::Provider`] from any displayable detail.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Whether the failure is timeout-class and worth retrying.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

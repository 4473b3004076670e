use thiserror::Error;

/// Errors from [`DistanceMatrixProvider`](super::DistanceMatrixProvider) and
/// [`DirectionsProvider`](super::DirectionsProvider) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Fewer coordinates were supplied than the service requires.
    ///
    /// Both services need at least two coordinates.
    #[error("at least two coordinates are required, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description from the service or transport.
        message: String,
    },
    /// The request could not be delivered.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service reported an error in an otherwise well-formed response.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service-specific error code.
        code: String,
        /// Service-supplied message.
        message: String,
    },
    /// No route exists between two of the supplied coordinates.
    #[error("no route between coordinate {from} and coordinate {to}")]
    Unreachable {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Parser or validation detail.
        message: String,
    },
}

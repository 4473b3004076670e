use thiserror::Error;

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL text.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Join `segments` onto `base`, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<url::Url, ProviderBuildError> {
    let joined = std::iter::once(base.trim_end_matches('/'))
        .chain(segments.iter().copied())
        .collect::<Vec<_>>()
        .join("/");
    url::Url::parse(&joined).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: base.to_owned(),
        source,
    })
}

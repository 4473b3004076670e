//! Bounded-retry address resolution.

use std::time::Duration;

use geo::Coord;
use log::{debug, warn};

use super::{GeocodeError, Geocoder, GeocodingPolicy};
use crate::{Address, OptimizeError};

/// Resolves addresses one at a time through a [`Geocoder`], applying a
/// [`GeocodingPolicy`].
///
/// Only timeout-class failures are retried. A missing match or any other
/// provider error ends resolution immediately. All waiting happens on the
/// async timer, so dropping the returned future cancels a pending retry or
/// throttle pause.
#[derive(Debug, Clone)]
pub struct AddressResolver<G> {
    geocoder: G,
    policy: GeocodingPolicy,
}

impl<G> AddressResolver<G>
where
    G: Geocoder,
{
    /// Construct a resolver around `geocoder`.
    pub const fn new(geocoder: G, policy: GeocodingPolicy) -> Self {
        Self { geocoder, policy }
    }

    /// The wrapped geocoder.
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// The policy in force.
    pub const fn policy(&self) -> &GeocodingPolicy {
        &self.policy
    }

    /// Resolve a single address, retrying on timeouts.
    ///
    /// # Errors
    ///
    /// - [`OptimizeError::AddressNotFound`] when the provider has no match.
    /// - [`OptimizeError::GeocodingTimeout`] once every attempt timed out.
    /// - [`OptimizeError::GeocodingProviderError`] for any other failure.
    pub async fn resolve(&self, address: &Address) -> Result<Coord<f64>, OptimizeError> {
        let attempts = self.policy.effective_attempts();
        let mut attempt = 1;
        loop {
            match self.attempt(address).await {
                Ok(Some(coordinate)) => {
                    debug!(
                        "geocoded \"{address}\" to ({}, {}) on attempt {attempt}",
                        coordinate.x, coordinate.y
                    );
                    return Ok(coordinate);
                }
                Ok(None) => {
                    return Err(OptimizeError::AddressNotFound {
                        address: address.clone(),
                    });
                }
                Err(GeocodeError::Timeout) if attempt < attempts => {
                    warn!(
                        "geocoding \"{address}\" timed out (attempt {attempt} of {attempts}), retrying"
                    );
                    pause(self.policy.retry_delay).await;
                    attempt += 1;
                }
                Err(GeocodeError::Timeout) => {
                    warn!("geocoding \"{address}\" timed out after {attempts} attempts, giving up");
                    return Err(OptimizeError::GeocodingTimeout {
                        address: address.clone(),
                        attempts,
                    });
                }
                Err(GeocodeError::Provider { message }) => {
                    return Err(OptimizeError::GeocodingProviderError {
                        address: address.clone(),
                        detail: message,
                    });
                }
            }
        }
    }

    /// Resolve `addresses` strictly in order, stopping at the first failure.
    ///
    /// Consecutive addresses are separated by the policy's throttle delay.
    /// Addresses after a failing one are never sent to the provider.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`AddressResolver::resolve`].
    pub async fn resolve_all(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<Coord<f64>>, OptimizeError> {
        let mut coordinates = Vec::with_capacity(addresses.len());
        for (index, address) in addresses.iter().enumerate() {
            if index > 0 {
                pause(self.policy.throttle_delay).await;
            }
            coordinates.push(self.resolve(address).await?);
        }
        Ok(coordinates)
    }

    async fn attempt(&self, address: &Address) -> Result<Option<Coord<f64>>, GeocodeError> {
        tokio::time::timeout(
            self.policy.attempt_timeout,
            self.geocoder.geocode(address.as_str()),
        )
        .await
        .unwrap_or(Err(GeocodeError::Timeout))
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

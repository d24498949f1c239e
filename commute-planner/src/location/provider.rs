//! The location provider abstraction and the fixed default provider.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Coordinate, LocationCandidate};

use super::error::ProviderFailure;

/// Default per-attempt timeout for network providers.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Center of the target metro area (downtown Seattle).
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    lat: 47.6062,
    lon: -122.3321,
};

/// A source of the traveller's current location.
///
/// Providers are capability-equivalent: the resolver holds an ordered list
/// of them and takes the first success.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Time budget for one attempt.
    fn timeout(&self) -> Duration {
        DEFAULT_PROVIDER_TIMEOUT
    }

    /// Try once to produce a location.
    async fn locate(&self) -> Result<LocationCandidate, ProviderFailure>;
}

/// Always answers with a fixed coordinate.
///
/// Used as the last link in the chain so that resolution only fails when
/// the chain has been configured without it.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl Default for FixedLocationProvider {
    fn default() -> Self {
        Self::new(DEFAULT_COORDINATE)
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "default"
    }

    async fn locate(&self) -> Result<LocationCandidate, ProviderFailure> {
        Ok(LocationCandidate::from(self.coordinate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_provider_returns_metro_center() {
        let provider = FixedLocationProvider::default();
        let loc = provider.locate().await.unwrap();
        assert_eq!(loc.as_str(), "47.606200,-122.332100");
        assert_eq!(provider.timeout(), DEFAULT_PROVIDER_TIMEOUT);
    }
}

//! Current-location resolution over an ordered provider chain.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{Coordinate, LocationCandidate};

use super::error::{FailedAttempt, LocationError, ProviderFailure};
use super::ip::{IP_API_URL, IP_INFO_URL, IpApiProvider, IpInfoProvider};
use super::precise::{PlatformLocator, PreciseLocationProvider};
use super::provider::{DEFAULT_COORDINATE, FixedLocationProvider, LocationProvider};

/// Configuration for the standard provider chain.
pub struct ResolverConfig {
    /// Native locator, if the platform has one
    pub platform_locator: Option<Box<dyn PlatformLocator>>,
    /// URL of the first IP geolocation endpoint
    pub ip_api_url: String,
    /// URL of the second IP geolocation endpoint
    pub ip_info_url: String,
    /// Coordinate used when everything else fails
    pub default_coordinate: Coordinate,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self {
            platform_locator: None,
            ip_api_url: IP_API_URL.to_string(),
            ip_info_url: IP_INFO_URL.to_string(),
            default_coordinate: DEFAULT_COORDINATE,
        }
    }

    /// Put a native locator at the front of the chain.
    pub fn with_platform_locator(mut self, locator: Option<Box<dyn PlatformLocator>>) -> Self {
        self.platform_locator = locator;
        self
    }

    /// Set custom IP geolocation URLs (for testing).
    pub fn with_ip_urls(mut self, ip_api: impl Into<String>, ip_info: impl Into<String>) -> Self {
        self.ip_api_url = ip_api.into();
        self.ip_info_url = ip_info.into();
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("platform_locator", &self.platform_locator.is_some())
            .field("ip_api_url", &self.ip_api_url)
            .field("ip_info_url", &self.ip_info_url)
            .field("default_coordinate", &self.default_coordinate)
            .finish()
    }
}

/// A successful resolution and how it was reached.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved location
    pub candidate: LocationCandidate,
    /// Provider that produced it
    pub provider: &'static str,
    /// Providers that failed before it, in order
    pub failed: Vec<FailedAttempt>,
}

/// Anything that can produce the traveller's current location.
#[async_trait]
pub trait CurrentLocation: Send + Sync {
    async fn resolve_current_location(&self) -> Result<LocationCandidate, LocationError>;
}

/// Tries providers in priority order until one succeeds.
///
/// Providers run one at a time, each under its own timeout. The first
/// success wins and later providers are never called.
pub struct LocationResolver {
    providers: Vec<Box<dyn LocationProvider>>,
}

impl LocationResolver {
    /// Create a resolver over an explicit provider chain.
    pub fn new(providers: Vec<Box<dyn LocationProvider>>) -> Self {
        Self { providers }
    }

    /// Build the standard chain: precise (if available), IP A, IP B, default.
    pub fn standard(config: ResolverConfig) -> Result<Self, LocationError> {
        let mut providers: Vec<Box<dyn LocationProvider>> = Vec::with_capacity(4);

        if let Some(locator) = config.platform_locator {
            providers.push(Box::new(PreciseLocationProvider::new(locator)));
        }
        providers.push(Box::new(IpApiProvider::with_url(config.ip_api_url)?));
        providers.push(Box::new(IpInfoProvider::with_url(config.ip_info_url)?));
        providers.push(Box::new(FixedLocationProvider::new(
            config.default_coordinate,
        )));

        Ok(Self::new(providers))
    }

    /// Names of the providers, in the order they are tried.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve the current location, reporting which provider answered.
    pub async fn resolve(&self) -> Result<Resolution, LocationError> {
        let mut failed = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            let budget = provider.timeout();

            let outcome = match tokio::time::timeout(budget, provider.locate()).await {
                Ok(result) => result,
                Err(_) => Err(ProviderFailure::TimedOut(budget)),
            };

            match outcome {
                Ok(candidate) => {
                    info!(provider = name, location = %candidate, "resolved current location");
                    return Ok(Resolution {
                        candidate,
                        provider: name,
                        failed,
                    });
                }
                Err(e) => {
                    debug!(provider = name, error = %e, "location provider failed");
                    failed.push(FailedAttempt {
                        provider: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        warn!(attempts = failed.len(), "all location providers failed");
        Err(LocationError::AllProvidersFailed { attempts: failed })
    }
}

#[async_trait]
impl CurrentLocation for LocationResolver {
    async fn resolve_current_location(&self) -> Result<LocationCandidate, LocationError> {
        self.resolve().await.map(|r| r.candidate)
    }
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("providers", &self.provider_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted provider that counts its calls.
    struct Scripted {
        name: &'static str,
        reply: Option<&'static str>,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn ok(name: &'static str, loc: &'static str) -> Self {
            Self {
                name,
                reply: Some(loc),
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                reply: None,
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl LocationProvider for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(50)
        }

        async fn locate(&self) -> Result<LocationCandidate, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.reply {
                Some(loc) => Ok(LocationCandidate::new(loc).unwrap()),
                None => Err(ProviderFailure::Rejected(format!("{} down", self.name))),
            }
        }
    }

    #[tokio::test]
    async fn first_success_wins_and_later_providers_are_not_called() {
        let third = Scripted::ok("third", "47.61,-122.33");
        let fourth = Scripted::ok("fourth", "0,0");
        let fourth_calls = fourth.calls.clone();

        let resolver = LocationResolver::new(vec![
            Box::new(Scripted::failing("first")),
            Box::new(Scripted::failing("second")),
            Box::new(third),
            Box::new(fourth),
        ]);

        let resolution = resolver.resolve().await.unwrap();

        assert_eq!(resolution.candidate.as_str(), "47.61,-122.33");
        assert_eq!(resolution.provider, "third");
        assert_eq!(resolution.failed.len(), 2);
        assert_eq!(resolution.failed[0].provider, "first");
        assert_eq!(fourth_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn priority_order_beats_availability() {
        let resolver = LocationResolver::new(vec![
            Box::new(Scripted::ok("first", "1,1")),
            Box::new(Scripted::ok("second", "2,2")),
        ]);

        let loc = resolver.resolve_current_location().await.unwrap();
        assert_eq!(loc.as_str(), "1,1");
    }

    #[tokio::test]
    async fn all_failing_reports_last_reason() {
        let resolver = LocationResolver::new(vec![
            Box::new(Scripted::failing("first")),
            Box::new(Scripted::failing("second")),
        ]);

        let err = resolver.resolve().await.unwrap_err();
        let last = err.last_reason().unwrap();
        assert_eq!(last.provider, "second");
        assert!(last.reason.contains("second down"));
        assert!(matches!(
            err,
            LocationError::AllProvidersFailed { ref attempts } if attempts.len() == 2
        ));
    }

    #[tokio::test]
    async fn timed_out_provider_is_skipped() {
        let resolver = LocationResolver::new(vec![
            Box::new(Scripted::ok("slow", "1,1").slow(Duration::from_secs(5))),
            Box::new(Scripted::ok("fast", "2,2")),
        ]);

        let resolution = resolver.resolve().await.unwrap();
        assert_eq!(resolution.provider, "fast");
        assert!(resolution.failed[0].reason.starts_with("timed out"));
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let resolver = LocationResolver::new(vec![]);
        assert!(matches!(
            resolver.resolve().await,
            Err(LocationError::AllProvidersFailed { .. })
        ));
    }

    #[test]
    fn standard_chain_order() {
        let resolver = LocationResolver::standard(ResolverConfig::new()).unwrap();
        assert_eq!(
            resolver.provider_names(),
            vec!["ip-api", "ipinfo", "default"]
        );
    }
}

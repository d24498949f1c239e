//! Current-location resolution.
//!
//! Resolves where the traveller is by asking an ordered chain of providers:
//! the platform's precise location service (when there is one), two
//! IP-geolocation endpoints, then a fixed default coordinate. The first
//! provider to answer wins; failures just move on to the next.

mod error;
mod ip;
mod precise;
mod provider;
mod resolver;

pub use error::{FailedAttempt, LocationError, ProviderFailure};
pub use ip::{IP_API_URL, IP_INFO_URL, IpApiProvider, IpInfoProvider};
pub use precise::{PlatformLocationError, PlatformLocator, PreciseLocationProvider, platform_locator};
pub use provider::{DEFAULT_COORDINATE, DEFAULT_PROVIDER_TIMEOUT, FixedLocationProvider, LocationProvider};
pub use resolver::{CurrentLocation, LocationResolver, Resolution, ResolverConfig};

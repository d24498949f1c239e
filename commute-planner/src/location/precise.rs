//! Platform precise-location provider.
//!
//! Some platforms offer a native location service (GPS/Wi-Fi). Access goes
//! through the `PlatformLocator` trait so that the native binding is an
//! ordinary value: the session is opened lazily on first use, at most
//! once, and closed when the provider is dropped. Platforms without a
//! native service simply leave this provider out of the chain.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Coordinate, LocationCandidate};

use super::error::ProviderFailure;
use super::provider::LocationProvider;

/// Failures reported by a platform location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlatformLocationError {
    #[error("location manager not initialized")]
    NotInitialized,

    #[error("location permission denied; allow location access for this app in system settings")]
    PermissionDenied,

    #[error("location services disabled; enable them in system settings")]
    ServicesDisabled,

    #[error("failed to get location (GPS/Wi-Fi issue)")]
    Unavailable,

    #[error("location request timed out")]
    TimedOut,

    #[error("unknown location error ({0})")]
    Unknown(i32),
}

impl PlatformLocationError {
    /// Map a native status code to an error; `0` means success.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_planner::location::PlatformLocationError;
    ///
    /// assert_eq!(PlatformLocationError::from_code(0), None);
    /// assert_eq!(
    ///     PlatformLocationError::from_code(-2),
    ///     Some(PlatformLocationError::PermissionDenied)
    /// );
    /// assert_eq!(
    ///     PlatformLocationError::from_code(-9),
    ///     Some(PlatformLocationError::Unknown(-9))
    /// );
    /// ```
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => None,
            -1 => Some(Self::NotInitialized),
            -2 => Some(Self::PermissionDenied),
            -3 => Some(Self::ServicesDisabled),
            -4 => Some(Self::Unavailable),
            -5 => Some(Self::TimedOut),
            other => Some(Self::Unknown(other)),
        }
    }
}

/// Binding to a native location service.
#[async_trait]
pub trait PlatformLocator: Send + Sync {
    /// Acquire the native session. Called at most once per locator.
    fn initialize(&self) -> Result<(), PlatformLocationError>;

    /// Ask for the current position.
    async fn request_location(&self) -> Result<Coordinate, PlatformLocationError>;

    /// Release the native session.
    fn shutdown(&self) {}
}

/// The native locator available in this build, if any.
///
/// No native binding ships with this crate, so this is `None` and the
/// precise provider is left out of the default chain. Embedders with a
/// binding pass their own locator to `ResolverConfig::with_platform_locator`.
pub fn platform_locator() -> Option<Box<dyn PlatformLocator>> {
    None
}

/// Location provider backed by a `PlatformLocator`.
pub struct PreciseLocationProvider {
    locator: Box<dyn PlatformLocator>,
    session: OnceLock<Result<(), PlatformLocationError>>,
    timeout: Duration,
}

impl PreciseLocationProvider {
    pub fn new(locator: Box<dyn PlatformLocator>) -> Self {
        Self {
            locator,
            session: OnceLock::new(),
            timeout: super::provider::DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    fn ensure_session(&self) -> Result<(), PlatformLocationError> {
        *self.session.get_or_init(|| {
            let result = self.locator.initialize();
            debug!(ok = result.is_ok(), "platform location session");
            result
        })
    }
}

impl std::fmt::Debug for PreciseLocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreciseLocationProvider")
            .field("session", &self.session.get())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Drop for PreciseLocationProvider {
    fn drop(&mut self) {
        if let Some(Ok(())) = self.session.get() {
            self.locator.shutdown();
        }
    }
}

#[async_trait]
impl LocationProvider for PreciseLocationProvider {
    fn name(&self) -> &'static str {
        "precise"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn locate(&self) -> Result<LocationCandidate, ProviderFailure> {
        self.ensure_session()?;
        let coordinate = self.locator.request_location().await?;
        Ok(coordinate.into())
    }
}

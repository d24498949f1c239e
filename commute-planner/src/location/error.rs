//! Location error types.

use std::time::Duration;

use super::precise::PlatformLocationError;

/// Why a single provider attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderFailure {
    /// HTTP request failed (network error, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code
    #[error("status: {0}")]
    Status(u16),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {0}")]
    Json(String),

    /// Payload reported failure (e.g. a non-"success" status field)
    #[error("provider rejected request: {0}")]
    Rejected(String),

    /// Payload was well-formed JSON but carried no usable location
    #[error("malformed location: {0}")]
    Malformed(String),

    /// Platform location subsystem failed
    #[error(transparent)]
    Platform(#[from] PlatformLocationError),

    /// Attempt exceeded its time budget
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// One failed provider attempt, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// Provider name
    pub provider: &'static str,
    /// Rendered failure reason
    pub reason: String,
}

/// Errors from current-location resolution.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// Every provider in the chain failed
    #[error("all location providers failed{}", describe_last(.attempts))]
    AllProvidersFailed { attempts: Vec<FailedAttempt> },

    /// Could not build a provider
    #[error("failed to create location provider: {0}")]
    Setup(#[from] reqwest::Error),
}

impl LocationError {
    /// The reason given by the last provider tried, if any.
    pub fn last_reason(&self) -> Option<&FailedAttempt> {
        match self {
            LocationError::AllProvidersFailed { attempts } => attempts.last(),
            LocationError::Setup(_) => None,
        }
    }
}

fn describe_last(attempts: &[FailedAttempt]) -> String {
    match attempts.last() {
        Some(last) => format!(" (last: {}: {})", last.provider, last.reason),
        None => " (no providers configured)".to_string(),
    }
}

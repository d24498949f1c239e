//! Directions HTTP client.
//!
//! Provides an async client for a Google-Directions-shaped JSON API.
//! Handles authentication, status mapping and response parsing; conversion
//! to domain types lives in `convert`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::domain::LocationCandidate;

use super::error::DirectionsError;
use super::types::DirectionsResponse;

/// Default base URL for the directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Travel mode to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Walking,
    Transit,
}

impl RequestMode {
    fn as_param(&self) -> &'static str {
        match self {
            RequestMode::Walking => "walking",
            RequestMode::Transit => "transit",
        }
    }
}

/// When the trip should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartAt {
    /// Leave right away; the provider uses its own clock.
    Now,
    /// Leave at an explicit time.
    At(DateTime<Utc>),
}

impl DepartAt {
    /// Value of the `departure_time` query parameter.
    pub fn as_param(&self) -> String {
        match self {
            DepartAt::Now => "now".to_string(),
            DepartAt::At(t) => t.timestamp().to_string(),
        }
    }
}

/// A single directions query.
///
/// Distances are always requested in imperial units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsRequest {
    pub origin: LocationCandidate,
    pub destination: LocationCandidate,
    pub mode: RequestMode,
    /// `None` leaves the departure time to the provider.
    pub departure: Option<DepartAt>,
    /// Ask for alternative routes rather than just the best one.
    pub alternatives: bool,
}

impl DirectionsRequest {
    /// A walking request with no departure time and no alternatives.
    pub fn walking(origin: LocationCandidate, destination: LocationCandidate) -> Self {
        Self {
            origin,
            destination,
            mode: RequestMode::Walking,
            departure: None,
            alternatives: false,
        }
    }

    /// A transit request departing at `depart_at`.
    pub fn transit(
        origin: LocationCandidate,
        destination: LocationCandidate,
        depart_at: DepartAt,
        alternatives: bool,
    ) -> Self {
        Self {
            origin,
            destination,
            mode: RequestMode::Transit,
            departure: Some(depart_at),
            alternatives,
        }
    }

    /// Query parameters for this request, excluding the API key.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", self.origin.as_str().to_string()),
            ("destination", self.destination.as_str().to_string()),
            ("mode", self.mode.as_param().to_string()),
            ("units", "imperial".to_string()),
        ];
        if let Some(departure) = self.departure {
            params.push(("departure_time", departure.as_param()));
        }
        if self.alternatives {
            params.push(("alternatives", "true".to_string()));
        }
        params
    }
}

/// A source of raw directions responses.
///
/// This abstraction allows the route query and proximity layers to be
/// tested against canned responses.
#[async_trait]
pub trait DirectionsApi: Send + Sync {
    /// Run one directions query.
    ///
    /// Implementations return `Ok` only for an "OK" payload status; any
    /// other status is mapped through `DirectionsError::from_status`.
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError>;
}

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        if config.api_key.trim().is_empty() {
            return Err(DirectionsError::Unauthorized);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl DirectionsApi for DirectionsClient {
    #[instrument(skip(self, request), fields(mode = ?request.mode, departure = ?request.departure))]
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let url = format!("{}/directions/json", self.base_url);

        let mut params = request.query_params();
        params.push(("key", self.api_key.clone()));

        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DirectionsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        debug!(
            status = %parsed.status,
            routes = parsed.routes.len(),
            "directions response"
        );

        if parsed.status != "OK" {
            return Err(DirectionsError::from_status(
                &parsed.status,
                parsed.error_message.as_deref(),
            ));
        }

        Ok(parsed)
    }
}

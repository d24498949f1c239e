//! IP-based geolocation providers.
//!
//! Two independent JSON endpoints. Neither is precise, but both work on
//! any platform with network access.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinate, LocationCandidate};

use super::error::ProviderFailure;
use super::provider::{DEFAULT_PROVIDER_TIMEOUT, LocationProvider};

/// Default URL for the ip-api.com style endpoint.
pub const IP_API_URL: &str = "https://ip-api.com/json/";

/// Default URL for the ipinfo.io style endpoint.
pub const IP_INFO_URL: &str = "https://ipinfo.io/json";

/// Response from the ip-api.com endpoint.
///
/// Only the fields used for location are kept.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Response from the ipinfo.io endpoint.
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    /// Combined "lat,lon" string.
    #[serde(default)]
    loc: String,
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

async fn fetch_json<T: for<'de> Deserialize<'de>>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, ProviderFailure> {
    let response = http.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(ProviderFailure::Status(status.as_u16()));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderFailure::Json(e.to_string()))
}

/// Geolocation via an ip-api.com style endpoint (`{status, lat, lon}`).
#[derive(Debug, Clone)]
pub struct IpApiProvider {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl IpApiProvider {
    /// Create a provider for the public endpoint.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_url(IP_API_URL)
    }

    /// Create a provider for a custom endpoint (for testing).
    pub fn with_url(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: http_client(DEFAULT_PROVIDER_TIMEOUT)?,
            url: url.into(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        })
    }
}

#[async_trait]
impl LocationProvider for IpApiProvider {
    fn name(&self) -> &'static str {
        "ip-api"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn locate(&self) -> Result<LocationCandidate, ProviderFailure> {
        let body: IpApiResponse = fetch_json(&self.http, &self.url).await?;

        if body.status != "success" {
            return Err(ProviderFailure::Rejected(body.message));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(ProviderFailure::Malformed("missing lat/lon".to_string()));
        };

        let coordinate =
            Coordinate::new(lat, lon).map_err(|e| ProviderFailure::Malformed(e.to_string()))?;
        debug!(%coordinate, "ip-api location");
        Ok(coordinate.into())
    }
}

/// Geolocation via an ipinfo.io style endpoint (`{loc: "lat,lon"}`).
#[derive(Debug, Clone)]
pub struct IpInfoProvider {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl IpInfoProvider {
    /// Create a provider for the public endpoint.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_url(IP_INFO_URL)
    }

    /// Create a provider for a custom endpoint (for testing).
    pub fn with_url(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: http_client(DEFAULT_PROVIDER_TIMEOUT)?,
            url: url.into(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        })
    }
}

#[async_trait]
impl LocationProvider for IpInfoProvider {
    fn name(&self) -> &'static str {
        "ipinfo"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn locate(&self) -> Result<LocationCandidate, ProviderFailure> {
        let body: IpInfoResponse = fetch_json(&self.http, &self.url).await?;

        if body.loc.trim().is_empty() {
            return Err(ProviderFailure::Malformed("no location data".to_string()));
        }

        // Validate, but pass the provider's own text through unchanged.
        Coordinate::parse(&body.loc).map_err(|e| ProviderFailure::Malformed(e.to_string()))?;
        debug!(loc = %body.loc, "ipinfo location");
        LocationCandidate::new(body.loc).map_err(|e| ProviderFailure::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_api_payload_parses() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{"status":"success","country":"United States","city":"Seattle","lat":47.6034,"lon":-122.3414,"query":"1.2.3.4"}"#,
        )
        .unwrap();
        assert_eq!(body.status, "success");
        assert_eq!(body.lat, Some(47.6034));
    }

    #[test]
    fn ip_api_failure_payload_parses() {
        let body: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"reserved range"}"#).unwrap();
        assert_eq!(body.status, "fail");
        assert_eq!(body.message, "reserved range");
        assert!(body.lat.is_none());
    }

    #[test]
    fn ipinfo_payload_without_loc_parses() {
        let body: IpInfoResponse = serde_json::from_str(r#"{"ip":"1.2.3.4"}"#).unwrap();
        assert!(body.loc.is_empty());
    }

    #[test]
    fn providers_build() {
        assert!(IpApiProvider::new().is_ok());
        assert!(IpInfoProvider::new().is_ok());
    }
}

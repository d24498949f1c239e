//! Directions client error types.

/// Errors from the directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// API answered but reported a non-OK status in the payload
    #[error("directions status {status}: {message}")]
    Status { status: String, message: String },

    /// The API found no route between the two points
    #[error("no routes found (ZERO_RESULTS)")]
    ZeroResults,

    /// Rate limited by the API
    #[error("rate limited by directions API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}

impl DirectionsError {
    /// Map a payload status other than "OK" to an error.
    pub fn from_status(status: &str, message: Option<&str>) -> Self {
        let message = message.unwrap_or_default().to_string();
        match status {
            "ZERO_RESULTS" | "NOT_FOUND" => DirectionsError::ZeroResults,
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => DirectionsError::RateLimited,
            "REQUEST_DENIED" => DirectionsError::Unauthorized,
            other => DirectionsError::Status {
                status: other.to_string(),
                message,
            },
        }
    }
}

//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

use chrono::{DateTime, Utc};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// An itinerary claimed to arrive before it departed
    #[error("itinerary arrives at {arrival} before it departs at {departure}")]
    ArrivesBeforeDeparture {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },
}

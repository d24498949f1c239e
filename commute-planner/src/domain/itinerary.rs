//! Itinerary and step types.
//!
//! An `Itinerary` is one candidate way of getting from origin to
//! destination on transit, built from the first leg of a provider route.
//! Itineraries are constructed fresh per query and never mutated.

use chrono::{DateTime, Duration, Utc};

use super::DomainError;

/// How a single step of an itinerary is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    /// On foot
    Walking,
    /// On a bus, train, tram, ferry, ...
    Transit,
    /// Anything else the provider reports (driving, bicycling, ...)
    Other,
}

impl TravelMode {
    /// Parse the provider's travel mode string.
    ///
    /// Unknown modes map to `Other` rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_planner::domain::TravelMode;
    ///
    /// assert_eq!(TravelMode::from_provider("TRANSIT"), TravelMode::Transit);
    /// assert_eq!(TravelMode::from_provider("walking"), TravelMode::Walking);
    /// assert_eq!(TravelMode::from_provider("DRIVING"), TravelMode::Other);
    /// ```
    pub fn from_provider(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "WALKING" => TravelMode::Walking,
            "TRANSIT" => TravelMode::Transit,
            _ => TravelMode::Other,
        }
    }

    /// Returns true for transit steps.
    pub fn is_transit(&self) -> bool {
        matches!(self, TravelMode::Transit)
    }
}

/// One step of an itinerary, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Plain-text instructions (markup already stripped)
    pub instructions: String,
    /// Time spent on this step
    pub duration: Duration,
    /// How this step is travelled
    pub mode: TravelMode,
    /// Vehicle type and short name, or full line name; empty if non-transit
    pub line_info: String,
    /// Vehicle departure time (transit steps only)
    pub depart_time: Option<DateTime<Utc>>,
    /// Vehicle arrival time (transit steps only)
    pub arrive_time: Option<DateTime<Utc>>,
}

impl Step {
    /// Creates a non-transit step.
    pub fn new(instructions: impl Into<String>, duration: Duration, mode: TravelMode) -> Self {
        Self {
            instructions: instructions.into(),
            duration,
            mode,
            line_info: String::new(),
            depart_time: None,
            arrive_time: None,
        }
    }

    /// Creates a transit step riding `line_info` between the given times.
    pub fn transit(
        instructions: impl Into<String>,
        duration: Duration,
        line_info: impl Into<String>,
        depart_time: Option<DateTime<Utc>>,
        arrive_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            duration,
            mode: TravelMode::Transit,
            line_info: line_info.into(),
            depart_time,
            arrive_time,
        }
    }
}

/// A complete transit itinerary between two points.
///
/// # Invariants
///
/// - `arrival_time >= departure_time`
/// - `steps` are in traversal order along the leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    summary: String,
    total_duration: Duration,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    distance_label: String,
    steps: Vec<Step>,
}

impl Itinerary {
    /// Construct an itinerary, checking that it does not arrive before it departs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ArrivesBeforeDeparture` if `arrival_time` is
    /// earlier than `departure_time`.
    pub fn new(
        summary: impl Into<String>,
        total_duration: Duration,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        distance_label: impl Into<String>,
        steps: Vec<Step>,
    ) -> Result<Self, DomainError> {
        if arrival_time < departure_time {
            return Err(DomainError::ArrivesBeforeDeparture {
                departure: departure_time,
                arrival: arrival_time,
            });
        }

        Ok(Self {
            summary: summary.into(),
            total_duration,
            departure_time,
            arrival_time,
            distance_label: distance_label.into(),
            steps,
        })
    }

    /// Route summary as reported by the provider (e.g. "Route 40").
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Total travel time of the leg.
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }

    /// Human-readable distance (e.g. "4.2 mi").
    pub fn distance_label(&self) -> &str {
        &self.distance_label
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns only the transit steps, in order.
    pub fn transit_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.mode.is_transit())
    }

    /// Key used to recognise the same itinerary returned by separate queries.
    ///
    /// Two itineraries are the same trip when they share a summary and
    /// depart and arrive in the same minute.
    pub fn dedup_key(&self) -> (String, i64, i64) {
        (
            self.summary.clone(),
            self.departure_time.timestamp().div_euclid(60),
            self.arrival_time.timestamp().div_euclid(60),
        )
    }
}

//! Conversion from directions DTOs to domain types.
//!
//! Only the first leg of each route is used; multi-leg (waypoint) routes
//! are not supported.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::{DomainError, Itinerary, Step, TravelMode};

use super::types::{LegStep, Route, TextValue, TimeValue, TransitLine};

/// Markup fragments removed outright from step instructions.
const STRIPPED_FRAGMENTS: [&str; 4] = ["<b>", "</b>", "<div>", "</div>"];

/// Fragment that starts a secondary instruction line; kept as a separator.
const SECONDARY_LINE_FRAGMENT: &str = "<div style=\"font-size:0.9em\">";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Route has no legs
    #[error("route has no legs")]
    NoLegs,

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Timestamp out of range
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Converted itinerary violates a domain invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Strip the provider's instruction markup down to plain text.
///
/// # Examples
///
/// ```
/// use commute_planner::directions::sanitize_instructions;
///
/// let html = r#"Walk <b>north</b> on 5th<div style="font-size:0.9em">toward Pike St</div>"#;
/// assert_eq!(sanitize_instructions(html), "Walk north on 5th - toward Pike St");
/// ```
pub fn sanitize_instructions(html: &str) -> String {
    let mut text = html.to_string();
    for fragment in STRIPPED_FRAGMENTS {
        text = text.replace(fragment, "");
    }
    text.replace(SECONDARY_LINE_FRAGMENT, " - ")
}

/// Describe a transit line: "<vehicle> <short name>", else the full name.
pub fn line_info(line: &TransitLine) -> String {
    if !line.short_name.is_empty() {
        format!("{} {}", line.vehicle.name, line.short_name)
    } else {
        line.name.clone()
    }
}

/// Convert every route with at least one leg, skipping any that fail.
///
/// Order is preserved. Routes without legs are dropped silently; routes
/// with unusable data are logged and dropped so that one bad candidate
/// does not cost the whole response.
pub fn convert_routes(routes: &[Route]) -> Vec<Itinerary> {
    let mut results = Vec::with_capacity(routes.len());

    for route in routes {
        match convert_route(route) {
            Ok(itinerary) => results.push(itinerary),
            Err(ConversionError::NoLegs) => {}
            Err(e) => {
                warn!(summary = %route.summary, error = %e, "skipping route");
            }
        }
    }

    results
}

/// Convert the first leg of a route into an itinerary.
pub fn convert_route(route: &Route) -> Result<Itinerary, ConversionError> {
    let leg = route.legs.first().ok_or(ConversionError::NoLegs)?;

    let departure = leg
        .departure_time
        .as_ref()
        .ok_or(ConversionError::MissingField("departure_time"))?;
    let arrival = leg
        .arrival_time
        .as_ref()
        .ok_or(ConversionError::MissingField("arrival_time"))?;

    let steps = leg
        .steps
        .iter()
        .map(convert_step)
        .collect::<Result<Vec<_>, _>>()?;

    let itinerary = Itinerary::new(
        route.summary.clone(),
        seconds(leg.duration.as_ref()),
        timestamp(departure)?,
        timestamp(arrival)?,
        leg.distance
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_default(),
        steps,
    )?;

    Ok(itinerary)
}

fn convert_step(step: &LegStep) -> Result<Step, ConversionError> {
    let instructions = sanitize_instructions(&step.html_instructions);
    let duration = seconds(step.duration.as_ref());
    let mode = TravelMode::from_provider(&step.travel_mode);

    let Some(details) = &step.transit_details else {
        return Ok(Step::new(instructions, duration, mode));
    };

    let depart_time = details.departure_time.as_ref().map(timestamp).transpose()?;
    let arrive_time = details.arrival_time.as_ref().map(timestamp).transpose()?;

    Ok(Step {
        instructions,
        duration,
        mode,
        line_info: line_info(&details.line),
        depart_time,
        arrive_time,
    })
}

fn seconds(value: Option<&TextValue>) -> Duration {
    value
        .map(|v| Duration::seconds(v.value))
        .unwrap_or_else(Duration::zero)
}

fn timestamp(value: &TimeValue) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::from_timestamp(value.value, 0).ok_or(ConversionError::InvalidTimestamp(value.value))
}

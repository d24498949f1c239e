//! Directions API response DTOs.
//!
//! These types map directly to the Google Directions JSON API responses.
//! They use `Option` liberally because the API omits fields rather than
//! sending null values (walking legs have no departure/arrival times,
//! non-transit steps have no transit details, and so on).

use serde::{Deserialize, Serialize};

/// Top-level response from the `directions/json` endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectionsResponse {
    /// Request status: "OK", "ZERO_RESULTS", "REQUEST_DENIED", ...
    pub status: String,

    /// Human-readable detail accompanying a non-OK status.
    pub error_message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One candidate route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Route {
    /// Short description of the route (e.g. "I-5 N" or a transit line).
    #[serde(default)]
    pub summary: String,

    /// One leg per waypoint pair; without waypoints there is exactly one.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// A leg of a route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Leg {
    pub duration: Option<TextValue>,

    pub distance: Option<TextValue>,

    /// Only present for transit routes.
    pub departure_time: Option<TimeValue>,

    /// Only present for transit routes.
    pub arrival_time: Option<TimeValue>,

    #[serde(default)]
    pub steps: Vec<LegStep>,
}

/// A step within a leg.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegStep {
    /// Instructions with embedded HTML markup.
    #[serde(default)]
    pub html_instructions: String,

    pub duration: Option<TextValue>,

    /// "WALKING", "TRANSIT", "DRIVING", ...
    #[serde(default)]
    pub travel_mode: String,

    pub transit_details: Option<TransitDetails>,
}

/// Transit-specific information for a step.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransitDetails {
    pub departure_time: Option<TimeValue>,

    pub arrival_time: Option<TimeValue>,

    #[serde(default)]
    pub line: TransitLine,
}

/// The transit line a step rides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransitLine {
    /// Full line name (e.g. "Link light rail").
    #[serde(default)]
    pub name: String,

    /// Short name (e.g. "40", "1 Line").
    #[serde(default)]
    pub short_name: String,

    #[serde(default)]
    pub vehicle: Vehicle,
}

/// The vehicle type serving a line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Vehicle {
    /// Display name (e.g. "Bus", "Light rail").
    #[serde(default)]
    pub name: String,

    /// Machine type (e.g. "BUS", "TRAM").
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
}

/// A quantity with its display text (`value` is seconds or metres).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: i64,
}

/// A point in time as epoch seconds plus display text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimeValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time_zone: String,
    /// Seconds since the Unix epoch.
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transit_response() {
        let json = r#"{
            "status": "OK",
            "routes": [{
                "summary": "",
                "legs": [{
                    "duration": { "text": "24 mins", "value": 1440 },
                    "distance": { "text": "3.9 mi", "value": 6300 },
                    "departure_time": { "text": "5:31 PM", "time_zone": "America/Los_Angeles", "value": 1772501460 },
                    "arrival_time": { "text": "5:55 PM", "time_zone": "America/Los_Angeles", "value": 1772502900 },
                    "steps": [
                        {
                            "html_instructions": "Walk to <b>3rd Ave &amp; Pike St</b>",
                            "duration": { "text": "4 mins", "value": 240 },
                            "travel_mode": "WALKING"
                        },
                        {
                            "html_instructions": "Bus towards Northgate",
                            "duration": { "text": "18 mins", "value": 1080 },
                            "travel_mode": "TRANSIT",
                            "transit_details": {
                                "departure_time": { "text": "5:35 PM", "value": 1772501700 },
                                "arrival_time": { "text": "5:53 PM", "value": 1772502780 },
                                "line": {
                                    "name": "Downtown Seattle - Northgate",
                                    "short_name": "40",
                                    "vehicle": { "name": "Bus", "type": "BUS" }
                                }
                            }
                        }
                    ]
                }]
            }]
        }"#;

        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "OK");
        assert_eq!(resp.routes.len(), 1);

        let leg = &resp.routes[0].legs[0];
        assert_eq!(leg.steps.len(), 2);
        assert!(leg.steps[0].transit_details.is_none());

        let details = leg.steps[1].transit_details.as_ref().unwrap();
        assert_eq!(details.line.short_name, "40");
        assert_eq!(details.line.vehicle.name, "Bus");
        assert_eq!(details.line.vehicle.vehicle_type, "BUS");
    }

    #[test]
    fn parses_error_status_without_routes() {
        let json = r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#;

        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "REQUEST_DENIED");
        assert!(resp.routes.is_empty());
        assert_eq!(
            resp.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
    }
}

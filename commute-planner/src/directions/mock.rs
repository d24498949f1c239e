//! Mock directions API for testing without network access.
//!
//! Serves queued responses in order, one per request, and records every
//! request it sees so tests can assert on what was asked.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::client::{DirectionsApi, DirectionsRequest, RequestMode};
use super::error::DirectionsError;
use super::types::DirectionsResponse;

type Reply = Result<DirectionsResponse, DirectionsError>;

#[derive(Default)]
struct MockState {
    walking: VecDeque<Reply>,
    transit: VecDeque<Reply>,
    requests: Vec<DirectionsRequest>,
}

/// Mock directions API that serves queued responses.
///
/// Walking and transit requests have separate queues. Once a queue is
/// exhausted every further request of that mode answers `ZeroResults`.
/// Clones share state.
#[derive(Clone, Default)]
pub struct MockDirections {
    state: Arc<Mutex<MockState>>,
}

impl MockDirections {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue the reply to the next walking request.
    pub fn push_walking(&self, reply: Reply) {
        self.state().walking.push_back(reply);
    }

    /// Queue the reply to the next transit request.
    pub fn push_transit(&self, reply: Reply) {
        self.state().transit.push_back(reply);
    }

    /// Queue a transit reply parsed from a raw JSON body.
    pub fn push_transit_json(&self, json: &str) -> Result<(), DirectionsError> {
        let response: DirectionsResponse =
            serde_json::from_str(json).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: None,
            })?;
        self.push_transit(Ok(response));
        Ok(())
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.state().requests.clone()
    }

    /// Transit requests seen so far, in order.
    pub fn transit_requests(&self) -> Vec<DirectionsRequest> {
        self.requests_for(RequestMode::Transit)
    }

    /// Walking requests seen so far, in order.
    pub fn walking_requests(&self) -> Vec<DirectionsRequest> {
        self.requests_for(RequestMode::Walking)
    }

    fn requests_for(&self, mode: RequestMode) -> Vec<DirectionsRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.mode == mode)
            .cloned()
            .collect()
    }

    fn next_reply(&self, request: &DirectionsRequest) -> Reply {
        let mut state = self.state();
        state.requests.push(request.clone());

        let queue = match request.mode {
            RequestMode::Walking => &mut state.walking,
            RequestMode::Transit => &mut state.transit,
        };

        queue.pop_front().unwrap_or(Err(DirectionsError::ZeroResults))
    }
}

#[async_trait]
impl DirectionsApi for MockDirections {
    async fn directions(&self, request: &DirectionsRequest) -> Reply {
        self.next_reply(request)
    }
}

/// Builders for directions DTOs used in tests.
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::directions::types::{
        DirectionsResponse, Leg, LegStep, Route, TextValue, TimeValue, TransitDetails,
        TransitLine, Vehicle,
    };

    fn text_value(text: String, value: i64) -> Option<TextValue> {
        Some(TextValue { text, value })
    }

    fn time_value(t: DateTime<Utc>) -> Option<TimeValue> {
        Some(TimeValue {
            text: t.format("%-I:%M %p").to_string(),
            time_zone: "America/Los_Angeles".to_string(),
            value: t.timestamp(),
        })
    }

    /// An "OK" response carrying `routes`.
    pub fn response(routes: Vec<Route>) -> DirectionsResponse {
        DirectionsResponse {
            status: "OK".to_string(),
            error_message: None,
            routes,
        }
    }

    /// A route with no legs.
    pub fn legless_route(summary: &str) -> Route {
        Route {
            summary: summary.to_string(),
            legs: vec![],
        }
    }

    /// A one-leg transit route: a short walk, then a bus ride.
    pub fn transit_route(summary: &str, depart: DateTime<Utc>, duration: Duration) -> Route {
        let walk = Duration::minutes(3).min(duration);
        let ride = duration - walk;

        Route {
            summary: summary.to_string(),
            legs: vec![Leg {
                duration: text_value(
                    format!("{} mins", duration.num_minutes()),
                    duration.num_seconds(),
                ),
                distance: text_value("3.9 mi".to_string(), 6300),
                departure_time: time_value(depart),
                arrival_time: time_value(depart + duration),
                steps: vec![
                    LegStep {
                        html_instructions: "Walk to <b>3rd Ave &amp; Pike St</b>".to_string(),
                        duration: text_value(format!("{} mins", walk.num_minutes()), walk.num_seconds()),
                        travel_mode: "WALKING".to_string(),
                        transit_details: None,
                    },
                    LegStep {
                        html_instructions: format!("Bus towards {summary}"),
                        duration: text_value(format!("{} mins", ride.num_minutes()), ride.num_seconds()),
                        travel_mode: "TRANSIT".to_string(),
                        transit_details: Some(TransitDetails {
                            departure_time: time_value(depart + walk),
                            arrival_time: time_value(depart + duration),
                            line: TransitLine {
                                name: summary.to_string(),
                                short_name: "40".to_string(),
                                vehicle: Vehicle {
                                    name: "Bus".to_string(),
                                    vehicle_type: "BUS".to_string(),
                                },
                            },
                        }),
                    },
                ],
            }],
        }
    }

    /// A walking route taking `duration` over `distance_text`.
    pub fn walking_route(duration: Duration, distance_text: &str) -> Route {
        Route {
            summary: "Pine St".to_string(),
            legs: vec![Leg {
                duration: text_value(
                    format!("{} mins", duration.num_minutes()),
                    duration.num_seconds(),
                ),
                distance: text_value(distance_text.to_string(), 0),
                departure_time: None,
                arrival_time: None,
                steps: vec![LegStep {
                    html_instructions: "Head <b>east</b> on Pine St".to_string(),
                    duration: text_value(
                        format!("{} mins", duration.num_minutes()),
                        duration.num_seconds(),
                    ),
                    travel_mode: "WALKING".to_string(),
                    transit_details: None,
                }],
            }],
        }
    }
}

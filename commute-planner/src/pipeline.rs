//! The end-to-end routing decision.
//!
//! Resolves where the traveller is, checks whether the destination is close
//! enough to walk, and otherwise gathers upcoming transit departures and
//! annotates the ones worth showing.

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::directions::{DirectionsApi, RouteQueryError, RouteSource};
use crate::domain::{Clock, Itinerary, LocationCandidate};
use crate::location::{CurrentLocation, LocationError};
use crate::planner::{PlannerConfig, RouteAggregator};
use crate::walkable::ProximityChecker;

/// Error from the routing pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The current location could not be determined
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The primary transit query failed
    #[error(transparent)]
    Routes(#[from] RouteQueryError),
}

/// How urgently the traveller needs to leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Departing within the "leaving soon" window.
    LeavingSoon,
    /// Departing soon enough to be a good pick.
    GoodTiming,
}

/// A departure chosen for presentation.
#[derive(Debug, Clone)]
pub struct Departure {
    /// 1-based position among the candidate itineraries.
    pub position: usize,
    pub itinerary: Itinerary,
    /// Time from now until departure; never negative.
    pub until: Duration,
    pub urgency: Option<Urgency>,
}

/// What the traveller should do.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Origin and destination are effectively the same place.
    AlreadyThere,
    /// Close enough that transit is not worth it.
    WalkInstead {
        walk_duration: Duration,
        walk_distance_label: String,
    },
    /// Upcoming departures, earliest first.
    Departures(Vec<Departure>),
    /// Every query ran but nothing leaves in time.
    NoEligibleRoutes,
}

/// A finished plan and the origin it was computed from.
#[derive(Debug, Clone)]
pub struct Plan {
    pub origin: LocationCandidate,
    pub outcome: Outcome,
}

/// The routing pipeline.
///
/// `L` resolves the current location, `A` answers walking queries, `R`
/// answers transit queries and `C` tells the time. The clock is shared with
/// the aggregator so both judge staleness against the same "now".
pub struct Pipeline<L, A, R, C> {
    location: L,
    proximity: ProximityChecker<A>,
    aggregator: RouteAggregator<R, C>,
    clock: C,
    config: PlannerConfig,
}

impl<L, A, R, C> Pipeline<L, A, R, C>
where
    L: CurrentLocation,
    A: DirectionsApi,
    R: RouteSource,
    C: Clock + Clone,
{
    pub fn new(location: L, walking: A, routes: R, clock: C, config: PlannerConfig) -> Self {
        let proximity = ProximityChecker::new(walking).with_threshold(config.walk_threshold());
        let aggregator = RouteAggregator::new(routes, clock.clone(), config.clone());
        Self {
            location,
            proximity,
            aggregator,
            clock,
            config,
        }
    }

    /// Plan a trip to `destination`.
    ///
    /// With no `origin` the current location is resolved first. A failed
    /// walking check is not fatal; the pipeline goes on to transit routing.
    pub async fn plan(
        &self,
        origin: Option<LocationCandidate>,
        destination: &LocationCandidate,
    ) -> Result<Plan, PipelineError> {
        let origin = match origin {
            Some(origin) => origin,
            None => self.location.resolve_current_location().await?,
        };
        info!(%origin, %destination, "planning trip");

        match self.proximity.check_walkable(&origin, destination).await {
            Ok(walk) if walk.is_walkable => {
                let outcome = if walk.walk_duration <= self.config.already_there() {
                    Outcome::AlreadyThere
                } else {
                    Outcome::WalkInstead {
                        walk_duration: walk.walk_duration,
                        walk_distance_label: walk.walk_distance_label,
                    }
                };
                return Ok(Plan { origin, outcome });
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "walking check failed, continuing with transit"),
        }

        let itineraries = self
            .aggregator
            .get_next_departures(&origin, destination, self.config.lookahead_hours)
            .await?;

        let departures = self.present(itineraries);
        let outcome = if departures.is_empty() {
            Outcome::NoEligibleRoutes
        } else {
            Outcome::Departures(departures)
        };
        Ok(Plan { origin, outcome })
    }

    /// Take the first few itineraries and annotate the ones still to come.
    fn present(&self, itineraries: Vec<Itinerary>) -> Vec<Departure> {
        let now = self.clock.now();
        let considered = itineraries.len().min(self.config.max_presented);

        let departures: Vec<Departure> = itineraries
            .into_iter()
            .take(self.config.max_presented)
            .enumerate()
            .filter_map(|(i, itinerary)| {
                let until = itinerary.departure_time() - now;
                if until < Duration::zero() {
                    return None;
                }
                Some(Departure {
                    position: i + 1,
                    urgency: urgency(until, &self.config),
                    until,
                    itinerary,
                })
            })
            .collect();

        debug!(considered, shown = departures.len(), "presented departures");
        departures
    }
}

impl<L, A, R, C> std::fmt::Debug for Pipeline<L, A, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Annotation for a departure `until` from now.
pub fn urgency(until: Duration, config: &PlannerConfig) -> Option<Urgency> {
    if until < config.leaving_soon() {
        Some(Urgency::LeavingSoon)
    } else if until < config.good_timing() {
        Some(Urgency::GoodTiming)
    } else {
        None
    }
}

//! Walking-distance checks between two points.
//!
//! Some trips are short enough that transit is pointless. This module asks
//! the directions provider for a walking estimate and classifies the trip
//! against a fixed threshold.

use chrono::Duration;
use tracing::debug;

use crate::directions::{DirectionsApi, DirectionsError, DirectionsRequest};
use crate::domain::LocationCandidate;

/// Default walking threshold: 15 minutes.
pub const DEFAULT_WALK_THRESHOLD_MINS: i64 = 15;

/// Error from a walking-distance lookup.
#[derive(Debug, thiserror::Error)]
pub enum ProximityError {
    /// The provider request failed
    #[error("walking directions failed: {0}")]
    Provider(#[from] DirectionsError),

    /// The provider answered but had no walking route
    #[error("no walking route found")]
    NoWalkingRoute,
}

/// Result of a walkability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkability {
    /// True when the walk is within the threshold.
    pub is_walkable: bool,
    /// Estimated walking time.
    pub walk_duration: Duration,
    /// Human-readable walking distance (e.g. "0.4 mi").
    pub walk_distance_label: String,
}

/// Classifies origin/destination pairs as walkable or not.
///
/// No retries: a failed lookup fails the check, and callers decide what
/// that means (the pipeline carries on to transit routing).
#[derive(Debug, Clone)]
pub struct ProximityChecker<A> {
    api: A,
    threshold: Duration,
}

impl<A: DirectionsApi> ProximityChecker<A> {
    /// Create a checker with the default 15 minute threshold.
    pub fn new(api: A) -> Self {
        Self {
            api,
            threshold: Duration::minutes(DEFAULT_WALK_THRESHOLD_MINS),
        }
    }

    /// Use a custom walking threshold.
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    /// Access the underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Walking time and distance from `origin` to `destination`.
    pub async fn walking_distance(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
    ) -> Result<(Duration, String), ProximityError> {
        let request = DirectionsRequest::walking(origin.clone(), destination.clone());
        let response = self.api.directions(&request).await?;

        let leg = response
            .routes
            .first()
            .and_then(|r| r.legs.first())
            .ok_or(ProximityError::NoWalkingRoute)?;

        let duration = leg
            .duration
            .as_ref()
            .map(|d| Duration::seconds(d.value))
            .ok_or(ProximityError::NoWalkingRoute)?;
        let distance = leg
            .distance
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_default();

        Ok((duration, distance))
    }

    /// Check whether `destination` is within walking distance of `origin`.
    pub async fn check_walkable(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
    ) -> Result<Walkability, ProximityError> {
        let (walk_duration, walk_distance_label) =
            self.walking_distance(origin, destination).await?;

        let walkability = classify(walk_duration, walk_distance_label, self.threshold);
        debug!(
            walk_secs = walkability.walk_duration.num_seconds(),
            walkable = walkability.is_walkable,
            "walkability"
        );
        Ok(walkability)
    }
}

/// Pure threshold decision: walkable iff `walk_duration <= threshold`.
pub fn classify(
    walk_duration: Duration,
    walk_distance_label: String,
    threshold: Duration,
) -> Walkability {
    Walkability {
        is_walkable: walk_duration <= threshold,
        walk_duration,
        walk_distance_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::mock::{MockDirections, fixtures};
    use proptest::prelude::*;

    fn loc(s: &str) -> LocationCandidate {
        LocationCandidate::new(s).unwrap()
    }

    fn checker_walking(duration: Duration) -> ProximityChecker<MockDirections> {
        let api = MockDirections::new();
        api.push_walking(Ok(fixtures::response(vec![fixtures::walking_route(
            duration, "0.7 mi",
        )])));
        ProximityChecker::new(api)
    }

    #[tokio::test]
    async fn boundary_14_59_is_walkable() {
        let checker = checker_walking(Duration::seconds(14 * 60 + 59));
        let w = checker.check_walkable(&loc("A"), &loc("B")).await.unwrap();
        assert!(w.is_walkable);
        assert_eq!(w.walk_distance_label, "0.7 mi");
    }

    #[tokio::test]
    async fn boundary_15_00_is_walkable() {
        let checker = checker_walking(Duration::minutes(15));
        let w = checker.check_walkable(&loc("A"), &loc("B")).await.unwrap();
        assert!(w.is_walkable);
    }

    #[tokio::test]
    async fn boundary_15_01_is_not_walkable() {
        let checker = checker_walking(Duration::seconds(15 * 60 + 1));
        let w = checker.check_walkable(&loc("A"), &loc("B")).await.unwrap();
        assert!(!w.is_walkable);
        assert_eq!(w.walk_duration, Duration::seconds(901));
    }

    #[tokio::test]
    async fn sends_walking_request() {
        let checker = checker_walking(Duration::minutes(4));
        checker.check_walkable(&loc("A"), &loc("B")).await.unwrap();

        let requests = checker.api().walking_requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].alternatives);
        assert!(requests[0].departure.is_none());
    }

    #[tokio::test]
    async fn provider_failure_fails_the_check() {
        let api = MockDirections::new();
        api.push_walking(Err(DirectionsError::RateLimited));
        let checker = ProximityChecker::new(api);

        let result = checker.check_walkable(&loc("A"), &loc("B")).await;
        assert!(matches!(
            result,
            Err(ProximityError::Provider(DirectionsError::RateLimited))
        ));
    }

    #[tokio::test]
    async fn route_without_legs_fails_the_check() {
        let api = MockDirections::new();
        api.push_walking(Ok(fixtures::response(vec![fixtures::legless_route("x")])));
        let checker = ProximityChecker::new(api);

        let result = checker.check_walkable(&loc("A"), &loc("B")).await;
        assert!(matches!(result, Err(ProximityError::NoWalkingRoute)));
    }

    #[tokio::test]
    async fn custom_threshold() {
        let checker = checker_walking(Duration::minutes(8)).with_threshold(Duration::minutes(5));
        let w = checker.check_walkable(&loc("A"), &loc("B")).await.unwrap();
        assert!(!w.is_walkable);
    }

    proptest! {
        #[test]
        fn walkable_iff_within_threshold(secs in 0i64..7200) {
            let threshold = Duration::minutes(DEFAULT_WALK_THRESHOLD_MINS);
            let w = classify(Duration::seconds(secs), String::new(), threshold);
            prop_assert_eq!(w.is_walkable, secs <= 900);
        }
    }
}

//! Configuration for the departure planner.

use chrono::Duration;

/// Tuning parameters for route aggregation and presentation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How far in the past a departure may be before it is dropped (minutes).
    /// Covers clock skew between us and the provider.
    pub stale_tolerance_mins: i64,

    /// Offsets from now at which fallback queries are made (minutes).
    pub fallback_offsets_mins: Vec<i64>,

    /// How far ahead to look for departures (hours). Passed through to the
    /// aggregator; the fallback offsets are not bounded by it.
    pub lookahead_hours: i64,

    /// Walks at or under this are "walk instead" (minutes).
    pub walk_threshold_mins: i64,

    /// Walks at or under this mean "already there" (minutes).
    pub already_there_mins: i64,

    /// Maximum number of departures to present.
    pub max_presented: usize,

    /// Departures sooner than this are "leaving soon" (minutes).
    pub leaving_soon_mins: i64,

    /// Departures sooner than this are "good timing" (minutes).
    pub good_timing_mins: i64,
}

impl PlannerConfig {
    /// Returns the stale tolerance as a Duration.
    pub fn stale_tolerance(&self) -> Duration {
        Duration::minutes(self.stale_tolerance_mins)
    }

    /// Returns the fallback offsets as Durations.
    pub fn fallback_offsets(&self) -> Vec<Duration> {
        self.fallback_offsets_mins
            .iter()
            .map(|m| Duration::minutes(*m))
            .collect()
    }

    pub fn walk_threshold(&self) -> Duration {
        Duration::minutes(self.walk_threshold_mins)
    }

    pub fn already_there(&self) -> Duration {
        Duration::minutes(self.already_there_mins)
    }

    pub fn leaving_soon(&self) -> Duration {
        Duration::minutes(self.leaving_soon_mins)
    }

    pub fn good_timing(&self) -> Duration {
        Duration::minutes(self.good_timing_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            stale_tolerance_mins: 5,
            fallback_offsets_mins: vec![0, 20, 40],
            lookahead_hours: 2,
            walk_threshold_mins: 15,
            already_there_mins: 2,
            max_presented: 5,
            leaving_soon_mins: 5,
            good_timing_mins: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.stale_tolerance_mins, 5);
        assert_eq!(config.fallback_offsets_mins, vec![0, 20, 40]);
        assert_eq!(config.lookahead_hours, 2);
        assert_eq!(config.walk_threshold_mins, 15);
        assert_eq!(config.already_there_mins, 2);
        assert_eq!(config.max_presented, 5);
        assert_eq!(config.leaving_soon_mins, 5);
        assert_eq!(config.good_timing_mins, 15);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.stale_tolerance(), Duration::minutes(5));
        assert_eq!(
            config.fallback_offsets(),
            vec![Duration::zero(), Duration::minutes(20), Duration::minutes(40)]
        );
        assert_eq!(config.walk_threshold(), Duration::minutes(15));
        assert_eq!(config.already_there(), Duration::minutes(2));
        assert_eq!(config.leaving_soon(), Duration::minutes(5));
        assert_eq!(config.good_timing(), Duration::minutes(15));
    }
}

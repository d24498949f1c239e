//! Filtering, deduplication and ordering of itineraries.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::domain::Itinerary;

/// Sort itineraries by departure time, earliest first.
///
/// The sort is stable, so itineraries leaving together keep their
/// original relative order.
pub fn sort_by_departure(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by_key(|i| i.departure_time());
    itineraries
}

/// Drop itineraries that departed more than `tolerance` before `now`.
///
/// An itinerary departing exactly `tolerance` ago is kept.
pub fn drop_stale(
    itineraries: Vec<Itinerary>,
    now: DateTime<Utc>,
    tolerance: Duration,
) -> Vec<Itinerary> {
    let cutoff = now - tolerance;
    itineraries
        .into_iter()
        .filter(|i| i.departure_time() >= cutoff)
        .collect()
}

/// Remove repeated itineraries, keeping the first of each.
///
/// Two itineraries are the same when their summary, departure minute and
/// arrival minute all match (see `Itinerary::dedup_key`). Encounter order
/// is preserved.
pub fn deduplicate(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    let mut seen = HashSet::with_capacity(itineraries.len());
    itineraries
        .into_iter()
        .filter(|i| seen.insert(i.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 1, 30, 0).unwrap()
    }

    fn make_itinerary(summary: &str, depart: DateTime<Utc>, mins: i64) -> Itinerary {
        Itinerary::new(
            summary,
            Duration::minutes(mins),
            depart,
            depart + Duration::minutes(mins),
            "3.9 mi",
            vec![],
        )
        .unwrap()
    }

    fn summaries(itineraries: &[Itinerary]) -> Vec<&str> {
        itineraries.iter().map(|i| i.summary()).collect()
    }

    #[test]
    fn sort_orders_by_departure() {
        let sorted = sort_by_departure(vec![
            make_itinerary("c", now() + Duration::minutes(30), 20),
            make_itinerary("a", now() + Duration::minutes(5), 20),
            make_itinerary("b", now() + Duration::minutes(10), 20),
        ]);
        assert_eq!(summaries(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_is_stable_for_equal_departures() {
        let t = now() + Duration::minutes(5);
        let sorted = sort_by_departure(vec![
            make_itinerary("first", t, 30),
            make_itinerary("second", t, 20),
        ]);
        assert_eq!(summaries(&sorted), vec!["first", "second"]);
    }

    #[test]
    fn stale_cutoff_is_inclusive() {
        let kept = drop_stale(
            vec![
                make_itinerary("older", now() - Duration::seconds(301), 20),
                make_itinerary("edge", now() - Duration::minutes(5), 20),
                make_itinerary("recent", now() - Duration::minutes(3), 20),
                make_itinerary("future", now() + Duration::minutes(5), 20),
            ],
            now(),
            Duration::minutes(5),
        );
        assert_eq!(summaries(&kept), vec!["edge", "recent", "future"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let t = now() + Duration::minutes(10);
        let unique = deduplicate(vec![
            make_itinerary("Route 40", t, 20),
            make_itinerary("Route 44", t, 20),
            make_itinerary("Route 40", t + Duration::seconds(30), 20),
        ]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].departure_time(), t);
        assert_eq!(summaries(&unique), vec!["Route 40", "Route 44"]);
    }

    #[test]
    fn dedup_distinguishes_arrival_minute() {
        let t = now() + Duration::minutes(10);
        let unique = deduplicate(vec![
            make_itinerary("Route 40", t, 20),
            make_itinerary("Route 40", t, 21),
        ]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn empty_inputs() {
        assert!(sort_by_departure(vec![]).is_empty());
        assert!(deduplicate(vec![]).is_empty());
        assert!(drop_stale(vec![], now(), Duration::minutes(5)).is_empty());
    }
}

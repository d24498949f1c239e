//! Console rendering of trips and plans.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone};

use crate::domain::Itinerary;
use crate::location::LocationError;
use crate::pipeline::{Departure, Outcome, PipelineError, Urgency};
use crate::trip::{OriginSource, Trip};

/// Compact duration: "now", "12m", "2h" or "1h5m".
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use commute_planner::report::format_duration;
///
/// assert_eq!(format_duration(Duration::seconds(59)), "now");
/// assert_eq!(format_duration(Duration::minutes(12)), "12m");
/// assert_eq!(format_duration(Duration::minutes(120)), "2h");
/// assert_eq!(format_duration(Duration::minutes(65)), "1h5m");
/// ```
pub fn format_duration(d: Duration) -> String {
    if d < Duration::minutes(1) {
        return "now".to_string();
    }
    let minutes = d.num_minutes();
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h{rest}m")
    }
}

/// Clock time like "3:04 PM".
pub fn format_clock<Tz: TimeZone>(t: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.format("%-I:%M %p").to_string()
}

/// One line describing where the trip starts.
pub fn trip_intro(trip: &Trip) -> String {
    match &trip.origin_source {
        OriginSource::Given => format!(
            "📍 Route from {} to {}",
            trip.origin.as_ref().map(|o| o.as_str()).unwrap_or_default(),
            trip.destination
        ),
        OriginSource::AssumedHome => "📍 Going to work (assuming you're at home)".to_string(),
        OriginSource::AssumedWork => "📍 Going home (assuming you're at work)".to_string(),
        OriginSource::Detect => "📍 Going home from your current location".to_string(),
        OriginSource::OverrideHome => "📍 Override: using home as current location".to_string(),
        OriginSource::OverrideWork => "📍 Override: using work as current location".to_string(),
        OriginSource::OverrideFrom => format!(
            "📍 Override: using specified location: {}",
            trip.origin.as_ref().map(|o| o.as_str()).unwrap_or_default()
        ),
    }
}

fn annotation(urgency: Option<Urgency>) -> &'static str {
    match urgency {
        Some(Urgency::LeavingSoon) => " 🏃‍♂️ LEAVING SOON",
        Some(Urgency::GoodTiming) => " ⚡ GOOD TIMING",
        None => "",
    }
}

/// Transit lines of an itinerary, joined with arrows.
pub fn line_chain(itinerary: &Itinerary) -> String {
    itinerary
        .transit_steps()
        .map(|s| s.line_info.as_str())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// A single departure block.
pub fn render_departure<Tz: TimeZone>(departure: &Departure, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let itinerary = &departure.itinerary;
    let mut out = format!(
        "\n{}. Depart: {} ({}){}\n   Arrive: {} (Travel: {})\n   Distance: {}\n",
        departure.position,
        format_clock(itinerary.departure_time().with_timezone(tz)),
        format_duration(departure.until),
        annotation(departure.urgency),
        format_clock(itinerary.arrival_time().with_timezone(tz)),
        format_duration(itinerary.total_duration()),
        itinerary.distance_label(),
    );
    if itinerary.transit_steps().next().is_some() {
        out.push_str(&format!("   🚌 {}\n", line_chain(itinerary)));
    }
    out
}

/// Render a pipeline outcome for `trip`, with times in `tz`.
pub fn render_outcome<Tz: TimeZone>(trip: &Trip, outcome: &Outcome, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let label = &trip.label;

    match outcome {
        Outcome::AlreadyThere => format!(
            "\n🏠 You're already at {label}!\n📍 Current location matches your {label} address\n"
        ),
        Outcome::WalkInstead {
            walk_duration,
            walk_distance_label,
        } => format!(
            "\n🚶‍♂️ You're already close to {label}!\nWalking time: {} ({})\n💡 No transit needed - just walk!\n",
            format_duration(*walk_duration),
            walk_distance_label
        ),
        Outcome::NoEligibleRoutes => [
            "\n❌ No transit routes found. This could mean:",
            "   • No transit service at this time",
            "   • Your location is too far from transit",
            "   • Try running 'commute init' to update your addresses",
        ]
        .iter()
        .map(|line| format!("{line}\n"))
        .collect(),
        Outcome::Departures(departures) => {
            let destination = trip.destination.as_str();
            let mut out = format!(
                "\n🏠 Routes to {destination} ({label})\n{}\n",
                "=".repeat(destination.chars().count() + 13)
            );
            for departure in departures {
                out.push_str(&render_departure(departure, tz));
            }
            out
        }
    }
}

/// Error text with a hint on what to try next.
pub fn render_error(err: &PipelineError) -> String {
    match err {
        PipelineError::Location(e @ LocationError::AllProvidersFailed { .. }) => format!(
            "automatic location detection failed: {e}\n\n💡 Try: 'commute --from \"your current address\"'"
        ),
        PipelineError::Location(e) => format!("location error: {e}"),
        PipelineError::Routes(e) => format!("❌ Transit service error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationCandidate, Step, TravelMode};
    use crate::trip::Destination;
    use chrono::{FixedOffset, Utc};

    fn pacific() -> FixedOffset {
        FixedOffset::west_opt(8 * 3600).unwrap()
    }

    fn trip(label: Destination) -> Trip {
        Trip {
            origin: Some(LocationCandidate::new("Work Ave").unwrap()),
            origin_source: OriginSource::AssumedWork,
            destination: LocationCandidate::new("Home St").unwrap(),
            label,
        }
    }

    fn itinerary() -> Itinerary {
        let depart = Utc.with_ymd_and_hms(2026, 3, 2, 23, 4, 0).unwrap();
        let arrive = depart + Duration::minutes(65);
        Itinerary::new(
            "Route 40",
            Duration::minutes(65),
            depart,
            arrive,
            "3.9 mi",
            vec![
                Step::new("Walk to 3rd Ave", Duration::minutes(3), TravelMode::Walking),
                Step::transit("Bus towards Ballard", Duration::minutes(30), "Bus 40", None, None),
                Step::transit("Light rail", Duration::minutes(20), "Link 1 Line", None, None),
                Step::transit("Streetcar", Duration::minutes(10), "", None, None),
            ],
        )
        .unwrap()
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::zero()), "now");
        assert_eq!(format_duration(Duration::seconds(-30)), "now");
        assert_eq!(format_duration(Duration::seconds(60)), "1m");
        assert_eq!(format_duration(Duration::seconds(3599)), "59m");
        assert_eq!(format_duration(Duration::minutes(60)), "1h");
        assert_eq!(format_duration(Duration::minutes(135)), "2h15m");
    }

    #[test]
    fn clock_is_twelve_hour() {
        let t = Utc.with_ymd_and_hms(2026, 3, 2, 23, 4, 0).unwrap();
        assert_eq!(format_clock(t.with_timezone(&pacific())), "3:04 PM");
        assert_eq!(format_clock(t), "11:04 PM");
    }

    #[test]
    fn lines_are_chained_skipping_blanks() {
        assert_eq!(line_chain(&itinerary()), "Bus 40 → Link 1 Line");
    }

    #[test]
    fn departure_block() {
        let departure = Departure {
            position: 2,
            itinerary: itinerary(),
            until: Duration::minutes(4),
            urgency: Some(Urgency::LeavingSoon),
        };
        let out = render_departure(&departure, &pacific());

        assert_eq!(
            out,
            "\n2. Depart: 3:04 PM (4m) 🏃‍♂️ LEAVING SOON\n   Arrive: 4:09 PM (Travel: 1h5m)\n   Distance: 3.9 mi\n   🚌 Bus 40 → Link 1 Line\n"
        );
    }

    #[test]
    fn departures_have_header() {
        let outcome = Outcome::Departures(vec![Departure {
            position: 1,
            itinerary: itinerary(),
            until: Duration::minutes(10),
            urgency: Some(Urgency::GoodTiming),
        }]);
        let out = render_outcome(&trip(Destination::Home), &outcome, &pacific());

        assert!(out.starts_with("\n🏠 Routes to Home St (home)\n====================\n"));
        assert!(out.contains("(10m) ⚡ GOOD TIMING"));
    }

    #[test]
    fn walk_and_arrival_messages() {
        let walk = Outcome::WalkInstead {
            walk_duration: Duration::minutes(12),
            walk_distance_label: "0.6 mi".to_string(),
        };
        let out = render_outcome(&trip(Destination::Work), &walk, &Utc);
        assert!(out.contains("You're already close to work!"));
        assert!(out.contains("Walking time: 12m (0.6 mi)"));

        let here = render_outcome(&trip(Destination::Home), &Outcome::AlreadyThere, &Utc);
        assert!(here.contains("You're already at home!"));
    }

    #[test]
    fn no_routes_lists_likely_causes() {
        let out = render_outcome(&trip(Destination::Home), &Outcome::NoEligibleRoutes, &Utc);
        assert_eq!(
            out,
            "\n❌ No transit routes found. This could mean:\n   • No transit service at this time\n   • Your location is too far from transit\n   • Try running 'commute init' to update your addresses\n"
        );
    }

    #[test]
    fn intro_lines() {
        assert_eq!(
            trip_intro(&trip(Destination::Home)),
            "📍 Going home (assuming you're at work)"
        );
        let given = Trip {
            origin_source: OriginSource::Given,
            ..trip(Destination::Other("Home St".to_string()))
        };
        assert_eq!(trip_intro(&given), "📍 Route from Work Ave to Home St");
    }

    #[test]
    fn location_failure_suggests_from_flag() {
        let err = PipelineError::Location(LocationError::AllProvidersFailed { attempts: vec![] });
        assert!(render_error(&err).contains("commute --from"));
    }
}

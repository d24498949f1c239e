//! Choosing where a trip starts and ends.
//!
//! Three routing modes: an arbitrary trip between two given places, a trip
//! to work (assumed to start at home), and the default trip home (assumed
//! to start at work, or wherever the traveller is when no work address is
//! saved). In the home/work modes the assumed start can be overridden.

use std::fmt;

use crate::config::CommuteConfig;
use crate::domain::{InvalidLocation, LocationCandidate};

/// Error choosing a trip.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error("please provide both from and to locations, or no arguments for home/work routing")]
    Usage,

    #[error("configuration not found; run 'commute init' to set up")]
    NotConfigured,

    #[error("work address not configured; run 'commute init --work <address>' to set it")]
    NoWorkAddress,

    #[error("no API key configured; run 'commute init --api-key <key>' or set GOOGLE_MAPS_API_KEY")]
    NoApiKey,

    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocation),
}

/// Command-line routing choices.
#[derive(Debug, Clone, Default)]
pub struct TripRequest {
    /// Positional `[from] [to]` arguments.
    pub places: Vec<String>,
    /// Route to work instead of home.
    pub to_work: bool,
    /// Explicit current location.
    pub from: Option<String>,
    pub at_home: bool,
    pub at_work: bool,
}

/// Which destination the trip is heading to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Home,
    Work,
    Other(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Home => write!(f, "home"),
            Destination::Work => write!(f, "work"),
            Destination::Other(to) => write!(f, "destination ({to})"),
        }
    }
}

/// How the starting point was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginSource {
    /// Both ends given on the command line.
    Given,
    /// Assumed to be at home.
    AssumedHome,
    /// Assumed to be at work.
    AssumedWork,
    /// Detect the current location.
    Detect,
    /// `--at-home`.
    OverrideHome,
    /// `--at-work`.
    OverrideWork,
    /// `--from <address>`.
    OverrideFrom,
}

/// A chosen trip.
#[derive(Debug, Clone)]
pub struct Trip {
    /// `None` means the current location must be detected.
    pub origin: Option<LocationCandidate>,
    pub origin_source: OriginSource,
    pub destination: LocationCandidate,
    pub label: Destination,
}

/// Decide the trip for `request` given the saved `config`.
pub fn select_trip(request: &TripRequest, config: &CommuteConfig) -> Result<Trip, TripError> {
    match request.places.as_slice() {
        [from, to] => {
            if config.google_api_key.is_empty() {
                return Err(TripError::NoApiKey);
            }
            Ok(Trip {
                origin: Some(LocationCandidate::new(from.as_str())?),
                origin_source: OriginSource::Given,
                destination: LocationCandidate::new(to.as_str())?,
                label: Destination::Other(to.clone()),
            })
        }
        [] => commute_trip(request, config),
        _ => Err(TripError::Usage),
    }
}

fn commute_trip(request: &TripRequest, config: &CommuteConfig) -> Result<Trip, TripError> {
    if !config.is_valid() {
        return Err(TripError::NotConfigured);
    }

    let (destination, label, mut origin, mut origin_source) = if request.to_work {
        if !config.has_work() {
            return Err(TripError::NoWorkAddress);
        }
        (
            config.work_address.as_str(),
            Destination::Work,
            Some(config.home_address.as_str()),
            OriginSource::AssumedHome,
        )
    } else if config.has_work() {
        (
            config.home_address.as_str(),
            Destination::Home,
            Some(config.work_address.as_str()),
            OriginSource::AssumedWork,
        )
    } else {
        (
            config.home_address.as_str(),
            Destination::Home,
            None,
            OriginSource::Detect,
        )
    };

    if request.at_home {
        origin = Some(config.home_address.as_str());
        origin_source = OriginSource::OverrideHome;
    } else if request.at_work && config.has_work() {
        origin = Some(config.work_address.as_str());
        origin_source = OriginSource::OverrideWork;
    } else if let Some(from) = request.from.as_deref().filter(|f| !f.trim().is_empty()) {
        origin = Some(from);
        origin_source = OriginSource::OverrideFrom;
    }

    Ok(Trip {
        origin: origin.map(LocationCandidate::new).transpose()?,
        origin_source,
        destination: LocationCandidate::new(destination)?,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(work: &str) -> CommuteConfig {
        CommuteConfig {
            home_address: "Home St".to_string(),
            work_address: work.to_string(),
            google_api_key: "key".to_string(),
        }
    }

    fn request() -> TripRequest {
        TripRequest::default()
    }

    #[test]
    fn two_places_route_between_them() {
        let req = TripRequest {
            places: vec!["U District Station".to_string(), "Capitol Hill".to_string()],
            ..request()
        };
        let config = CommuteConfig {
            google_api_key: "key".to_string(),
            ..CommuteConfig::default()
        };

        let trip = select_trip(&req, &config).unwrap();

        assert_eq!(trip.origin.unwrap().as_str(), "U District Station");
        assert_eq!(trip.destination.as_str(), "Capitol Hill");
        assert_eq!(trip.label.to_string(), "destination (Capitol Hill)");
    }

    #[test]
    fn two_places_still_need_a_key() {
        let req = TripRequest {
            places: vec!["a".to_string(), "b".to_string()],
            ..request()
        };
        assert!(matches!(
            select_trip(&req, &CommuteConfig::default()),
            Err(TripError::NoApiKey)
        ));
    }

    #[test]
    fn one_place_is_usage_error() {
        let req = TripRequest {
            places: vec!["Capitol Hill".to_string()],
            ..request()
        };
        assert!(matches!(select_trip(&req, &config("")), Err(TripError::Usage)));
    }

    #[test]
    fn commute_modes_need_config() {
        assert!(matches!(
            select_trip(&request(), &CommuteConfig::default()),
            Err(TripError::NotConfigured)
        ));
    }

    #[test]
    fn default_goes_home_from_work() {
        let trip = select_trip(&request(), &config("Work Ave")).unwrap();

        assert_eq!(trip.destination.as_str(), "Home St");
        assert_eq!(trip.origin.unwrap().as_str(), "Work Ave");
        assert_eq!(trip.origin_source, OriginSource::AssumedWork);
        assert_eq!(trip.label, Destination::Home);
    }

    #[test]
    fn default_without_work_detects_location() {
        let trip = select_trip(&request(), &config("")).unwrap();

        assert!(trip.origin.is_none());
        assert_eq!(trip.origin_source, OriginSource::Detect);
    }

    #[test]
    fn work_flag_goes_to_work_from_home() {
        let req = TripRequest {
            to_work: true,
            ..request()
        };
        let trip = select_trip(&req, &config("Work Ave")).unwrap();

        assert_eq!(trip.destination.as_str(), "Work Ave");
        assert_eq!(trip.origin.unwrap().as_str(), "Home St");
        assert_eq!(trip.label.to_string(), "work");
    }

    #[test]
    fn work_flag_without_work_address_fails() {
        let req = TripRequest {
            to_work: true,
            ..request()
        };
        assert!(matches!(
            select_trip(&req, &config("")),
            Err(TripError::NoWorkAddress)
        ));
    }

    #[test]
    fn at_home_beats_other_overrides() {
        let req = TripRequest {
            at_home: true,
            at_work: true,
            from: Some("Pike Place".to_string()),
            ..request()
        };
        let trip = select_trip(&req, &config("Work Ave")).unwrap();

        assert_eq!(trip.origin.unwrap().as_str(), "Home St");
        assert_eq!(trip.origin_source, OriginSource::OverrideHome);
    }

    #[test]
    fn at_work_is_ignored_without_work_address() {
        let req = TripRequest {
            at_work: true,
            from: Some("Pike Place".to_string()),
            ..request()
        };
        let trip = select_trip(&req, &config("")).unwrap();

        assert_eq!(trip.origin.unwrap().as_str(), "Pike Place");
        assert_eq!(trip.origin_source, OriginSource::OverrideFrom);
    }

    #[test]
    fn from_replaces_detection() {
        let req = TripRequest {
            from: Some("Pike Place".to_string()),
            ..request()
        };
        let trip = select_trip(&req, &config("")).unwrap();

        assert_eq!(trip.origin.unwrap().as_str(), "Pike Place");
    }

    #[test]
    fn blank_places_are_rejected() {
        let req = TripRequest {
            places: vec!["  ".to_string(), "Capitol Hill".to_string()],
            ..request()
        };
        assert!(matches!(
            select_trip(&req, &config("")),
            Err(TripError::InvalidLocation(_))
        ));
    }
}

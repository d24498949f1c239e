//! Location types.

use std::fmt;

/// Error returned when a location string is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidLocation> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidLocation {
                reason: "coordinates must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidLocation {
                reason: "latitude must be between -90 and 90",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidLocation {
                reason: "longitude must be between -180 and 180",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a `"lat,lon"` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_planner::domain::Coordinate;
    ///
    /// let c = Coordinate::parse("47.6062,-122.3321").unwrap();
    /// assert_eq!(c.lat, 47.6062);
    /// assert_eq!(c.lon, -122.3321);
    ///
    /// assert!(Coordinate::parse("47.6062").is_err());
    /// assert!(Coordinate::parse("north,west").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidLocation {
            reason: "expected \"lat,lon\"",
        })?;
        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidLocation {
            reason: "latitude is not a number",
        })?;
        let lon = lon.trim().parse::<f64>().map_err(|_| InvalidLocation {
            reason: "longitude is not a number",
        })?;
        Self::new(lat, lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Where the traveller is (or is going): a `"lat,lon"` pair or a free-form address.
///
/// The only invariant is that the string is not blank. Providers hand these
/// straight to the directions API, which accepts either form.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocationCandidate(String);

impl LocationCandidate {
    /// Wrap a location string, rejecting blank input.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidLocation> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "location must not be empty",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Coordinate> for LocationCandidate {
    fn from(c: Coordinate) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Debug for LocationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationCandidate({})", self.0)
    }
}

impl fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

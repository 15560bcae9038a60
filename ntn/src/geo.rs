//! Location parsing and great-circle radius checks.
//!
//! Distances are geodesic on the WGS-84 ellipsoid (Karney's algorithm), not
//! a spherical or flat-earth approximation, and are reported in statute
//! miles.

use std::sync::LazyLock;

use geo::{GeodesicDistance, Point};
use regex::Regex;
use serde::Serialize;

/// Largest radius accepted by radius queries, in miles.
pub const MAX_RADIUS_MILES: f64 = 3958.8;

const METERS_PER_MILE: f64 = 1609.344;

/// `(lat,lon)` or `(lat, lon)`; up to 10 fractional digits; 90 and 180 only
/// with an all-zero fraction.
static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\(",
        r"(?P<lat>-?(?:[1-8]?[0-9](?:\.[0-9]{1,10})?|90(?:\.0{1,10})?))",
        r", ?",
        r"(?P<lon>-?(?:(?:[1-9]?[0-9]|1[0-7][0-9])(?:\.[0-9]{1,10})?|180(?:\.0{1,10})?))",
        r"\)$",
    ))
    .expect("location pattern compiles")
});

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    /// Latitude, -90 to 90.
    pub lat: f64,
    /// Longitude, -180 to 180.
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse a `(lat,lon)` string.
    ///
    /// Returns `None` for anything that does not match the accepted format,
    /// including out-of-range magnitudes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ntn::geo::Location;
    ///
    /// assert_eq!(
    ///     Location::parse("(42.4944, -108.8320)"),
    ///     Some(Location::new(42.4944, -108.832))
    /// );
    /// assert_eq!(Location::parse("42.4944,-108.8320"), None);
    /// assert_eq!(Location::parse("(90.0000000001,0)"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let caps = LOCATION_PATTERN.captures(text)?;
        let lat = caps["lat"].parse().ok()?;
        let lon = caps["lon"].parse().ok()?;
        Some(Self { lat, lon })
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Geodesic distance between two points, in miles.
pub fn distance_miles(a: Location, b: Location) -> f64 {
    if a == b {
        return 0.0;
    }
    a.to_point().geodesic_distance(&b.to_point()) / METERS_PER_MILE
}

/// Whether `candidate` lies within `radius_miles` of `origin` (inclusive).
pub fn point_within_radius(origin: Location, candidate: Location, radius_miles: f64) -> bool {
    distance_miles(origin, candidate) <= radius_miles
}

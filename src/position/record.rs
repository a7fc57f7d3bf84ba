use chrono::DateTime;
use chrono::Utc;

/// A decoded fix.  Lives for one report cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionRecord {
    pub timestamp: DateTime<Utc>,
    pub fix_number: u32,
    /// Degrees on the WGS-84 ellipsoid
    pub latitude: Option<f64>,
    /// Degrees on the WGS-84 ellipsoid
    pub longitude: Option<f64>,
    /// Meters
    pub altitude: Option<i32>,
    /// Degrees from true north
    pub heading: Option<f64>,
    /// Meters per second
    pub horizontal_velocity: Option<f64>,
    /// Meters per second
    pub vertical_velocity: Option<f64>,
}

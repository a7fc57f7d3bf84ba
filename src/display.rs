use crate::position::PositionRecord;
use crate::report::local_time;
use crate::report::UTC_OFFSET_HOURS;

use chrono::DateTime;
use chrono::Utc;

use tracing::info;

/// A line-oriented status screen.  Rendering is best effort.
pub trait StatusDisplay {
    fn print(&mut self, line: usize, column: usize, text: &str);

    fn clear(&mut self) {}
}

/// Renders status lines as tracing events.
#[derive(Clone, Debug, Default)]
pub struct TracingDisplay {}

impl StatusDisplay for TracingDisplay {
    fn print(&mut self, line: usize, column: usize, text: &str) {
        info!(line, column, "{}", text);
    }
}

/// Request and response counters, the first lines of every status screen.
pub fn counters(requests: u32, responses: u32) -> Vec<String> {
    vec![
        format!("req : {}", requests),
        format!("resp : {}", responses),
    ]
}

pub fn time_line(timestamp: DateTime<Utc>) -> String {
    format!(
        "Time = {} GMT+{}",
        local_time(timestamp).format("%Y-%m-%d %H:%M:%S"),
        UTC_OFFSET_HOURS
    )
}

/// The status screen shown after a usable fix: counters, fix time, then one line per reported
/// field.
pub fn summary(record: &PositionRecord, requests: u32, responses: u32) -> Vec<String> {
    let mut lines = counters(requests, responses);

    lines.push(time_line(record.timestamp));

    if let Some(v) = record.latitude {
        lines.push(format!("Latitude = {:.6} d", v));
    }
    if let Some(v) = record.longitude {
        lines.push(format!("Longitude = {:.6} d", v));
    }
    if let Some(v) = record.altitude {
        lines.push(format!("Altitude = {} m", v));
    }
    if let Some(v) = record.heading {
        lines.push(format!("Heading = {:.6} d", v));
    }
    if let Some(v) = record.horizontal_velocity {
        lines.push(format!("HorVelocity = {:.6} m/s", v));
    }
    if let Some(v) = record.vertical_velocity {
        lines.push(format!("VerVelocity = {:.6} m/s", v));
    }

    lines
}

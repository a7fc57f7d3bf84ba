use crate::position::PositionRecord;
use crate::report::ReportLine;
use crate::report::REPORT_LINE_CAPACITY;

use chrono::DateTime;
use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::Utc;

use std::fmt::Write;

use tracing::warn;

/// Reports are stamped in this fixed zone regardless of where the terminal is.
pub const UTC_OFFSET_HOURS: i64 = 8;

const HEADER: &str = "EHL,A,02";
const TRAILER: &str = "EHL";

/// Per-terminal fields of a report that do not come from the fix.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TerminalMetadata {
    pub terminal_id: String,
    pub mileage: String,
    pub status: String,
    pub alarm: String,
    pub satellites: String,
    pub operator_id: String,
}

/// Builds report lines of the form
///
/// ```text
/// {EHL,A,02,<terminal>,<YYYY-MM-DD HH:MM:SS>,<lat>,<lon>,<alt>,<velocity>,<heading>,<mileage>,<status>,<alarm>,<satellites>,<operator>,EHL}
/// ```
///
/// Absent fix fields leave their slot empty.
#[derive(Clone, Debug)]
pub struct ReportEncoder {
    metadata: TerminalMetadata,
    capacity: usize,
}

impl ReportEncoder {
    pub fn new(metadata: TerminalMetadata) -> Self {
        ReportEncoder::with_capacity(metadata, REPORT_LINE_CAPACITY)
    }

    pub fn with_capacity(metadata: TerminalMetadata, capacity: usize) -> Self {
        ReportEncoder { metadata, capacity }
    }

    pub fn metadata(&self) -> &TerminalMetadata {
        &self.metadata
    }

    pub fn encode(&self, record: &PositionRecord) -> ReportLine {
        let mut line = ReportLine::with_capacity(self.capacity);
        let m = &self.metadata;

        let _ = write!(
            line,
            "{{{},{},{},",
            HEADER,
            m.terminal_id,
            local_time(record.timestamp).format("%Y-%m-%d %H:%M:%S")
        );

        decimal(&mut line, record.latitude);
        decimal(&mut line, record.longitude);

        if let Some(altitude) = record.altitude {
            let _ = write!(line, "{}", altitude);
        }
        line.push_str(",");

        decimal(&mut line, record.horizontal_velocity);
        decimal(&mut line, record.heading);

        let _ = write!(
            line,
            "{},{},{},{},{},{}}}",
            m.mileage, m.status, m.alarm, m.satellites, m.operator_id, TRAILER
        );

        if line.is_truncated() {
            warn!(
                "report for fix {} truncated to {} bytes",
                record.fix_number,
                line.capacity()
            );
        }

        line
    }
}

/// The fix time in the report zone.  Hours past midnight carry into the next calendar day.
///
/// A timestamp too close to the end of the calendar to shift is returned as UTC.
pub fn local_time(timestamp: DateTime<Utc>) -> NaiveDateTime {
    let utc = timestamp.naive_utc();

    match utc.checked_add_signed(Duration::hours(UTC_OFFSET_HOURS)) {
        Some(local) => local,
        None => {
            warn!("unable to shift {} to the report zone, using UTC", utc);

            utc
        }
    }
}

fn decimal(line: &mut ReportLine, value: Option<f64>) {
    if let Some(v) = value {
        let _ = write!(line, "{:.6}", v);
    }

    line.push_str(",");
}

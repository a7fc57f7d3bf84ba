mod encoder;
mod report_line;

pub use encoder::local_time;
pub use encoder::ReportEncoder;
pub use encoder::TerminalMetadata;
pub use encoder::UTC_OFFSET_HOURS;
pub use report_line::ReportLine;
pub use report_line::REPORT_LINE_CAPACITY;

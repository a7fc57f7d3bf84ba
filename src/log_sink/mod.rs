mod codec;
mod log_write_error;
mod sink;

pub use codec::ReportCodec;
pub use codec::NEWLINE;
pub use log_write_error::LogWriteError;
pub use sink::write_frame;
pub use sink::LogSink;

use crate::log_sink::LogWriteError;
use crate::log_sink::ReportCodec;
use crate::log_sink::NEWLINE;
use crate::report::ReportLine;
use crate::scheduler::ReportSink;

use bytes::BytesMut;

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tokio_util::codec::Encoder;

use tracing::debug;
use tracing::warn;

/// Append-only report log.
///
/// The file is opened on first use and kept open for the life of the sink.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: Option<File>,
    codec: ReportCodec,
}

impl LogSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        LogSink {
            path: path.as_ref().to_path_buf(),
            file: None,
            codec: ReportCodec::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the log for appending, creating it if needed.  Later calls return the same handle.
    pub fn ensure_open(&mut self) -> Result<&mut File, LogWriteError> {
        let file = match self.file.take() {
            Some(f) => f,
            None => {
                let f = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| LogWriteError::Unavailable(self.path.display().to_string(), e))?;

                debug!("opened report log {}", self.path.display());

                f
            }
        };

        Ok(self.file.insert(file))
    }

    /// Write `line` and its line terminator.
    pub fn append(&mut self, line: &ReportLine) -> Result<(), LogWriteError> {
        let mut frame = BytesMut::new();
        self.codec.encode(line, &mut frame)?;

        let file = self.ensure_open()?;

        write_frame(file, &frame)
    }

    /// Separate this run's reports from earlier ones with an empty line.
    pub fn mark_session(&mut self) -> Result<(), LogWriteError> {
        let file = self.ensure_open()?;

        write_frame(file, NEWLINE)
    }
}

/// Write `frame` in a single call.  Anything less than the whole frame is an error.
///
/// A fragment left by a short write is terminated so the next frame starts on its own line.
pub fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<(), LogWriteError> {
    let written = writer.write(frame)?;

    if written != frame.len() {
        if written > 0 {
            let terminator = if frame[..written].ends_with(b"\r") {
                &NEWLINE[1..]
            } else {
                NEWLINE
            };

            if let Err(e) = writer.write_all(terminator).and_then(|_| writer.flush()) {
                warn!("unable to terminate partial report: {}", e);
            }
        }

        return Err(LogWriteError::PartialWrite {
            written,
            expected: frame.len(),
        });
    }

    writer.flush()?;

    Ok(())
}

impl ReportSink for LogSink {
    fn append(&mut self, line: &ReportLine) -> Result<(), LogWriteError> {
        LogSink::append(self, line)
    }
}

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogWriteError {
    #[error("short write to log, {written} of {expected} bytes")]
    PartialWrite { written: usize, expected: usize },
    #[error("log file {0} is unavailable: {1}")]
    Unavailable(String, #[source] io::Error),
    #[error("unable to write log: {0}")]
    Io(#[from] io::Error),
}

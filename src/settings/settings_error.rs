use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings document {0} does not exist")]
    NotFound(String),
    #[error("unable to read settings document {0}: {1}")]
    Unreadable(String, #[source] io::Error),
    #[error("unable to write settings document {0}: {1}")]
    Unwritable(String, #[source] io::Error),
    #[error("invalid settings: {0}")]
    InvalidFormat(String),
    #[error("server address {0} is not a dotted-quad address")]
    InvalidAddress(String),
}

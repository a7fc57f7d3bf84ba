use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("interval {0} must be at least one second")]
    InvalidInterval(u64),
    #[error("log filter {0} is invalid: {1}")]
    InvalidLogFilter(String, tracing_subscriber::filter::ParseError),
    #[error("invalid configuration file: {0}")]
    De(#[from] toml::de::Error),
    #[error("unable to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

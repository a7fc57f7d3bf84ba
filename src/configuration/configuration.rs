use crate::configuration::ConfigurationError;
use crate::configuration::ReplayConfig;
use crate::configuration::TerminalConfig;

use serde::Deserialize;

use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::filter::EnvFilter;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Configuration {
    pub log_filter: Option<String>,
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Seconds between fix requests when repeating
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default)]
    pub terminal: TerminalConfig,
    pub replay: ReplayConfig,
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("posdet.cfg")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("posdet.log")
}

fn default_interval() -> u64 {
    5
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigurationError> {
        let source = fs::read_to_string(path)?;

        parse(source)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

fn parse(source: String) -> Result<Configuration, ConfigurationError> {
    let configuration: Configuration = toml::from_str(&source)?;

    if configuration.interval == 0 {
        return Err(ConfigurationError::InvalidInterval(configuration.interval));
    }

    Ok(configuration)
}

impl TryFrom<Configuration> for EnvFilter {
    type Error = ConfigurationError;

    fn try_from(configuration: Configuration) -> Result<EnvFilter, ConfigurationError> {
        match configuration.log_filter {
            Some(f) => match EnvFilter::try_new(f.clone()) {
                Ok(f) => Ok(f),
                Err(e) => Err(ConfigurationError::InvalidLogFilter(f, e)),
            },
            None => Ok(EnvFilter::new("info")),
        }
    }
}

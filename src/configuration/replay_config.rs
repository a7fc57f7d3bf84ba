use serde::Deserialize;

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ReplayConfig {
    pub track: PathBuf,
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    500
}

impl ReplayConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

use crate::report::TerminalMetadata;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct TerminalConfig {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub alarm: String,
    #[serde(default)]
    pub satellites: String,
    #[serde(default)]
    pub operator: String,
}

fn default_id() -> String {
    "0000".to_string()
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            id: default_id(),
            mileage: String::new(),
            status: String::new(),
            alarm: String::new(),
            satellites: String::new(),
            operator: String::new(),
        }
    }
}

impl From<TerminalConfig> for TerminalMetadata {
    fn from(terminal: TerminalConfig) -> TerminalMetadata {
        TerminalMetadata {
            terminal_id: terminal.id,
            mileage: terminal.mileage,
            status: terminal.status,
            alarm: terminal.alarm,
            satellites: terminal.satellites,
            operator_id: terminal.operator,
        }
    }
}

mod configuration;
mod configuration_error;
mod replay_config;
mod terminal_config;

pub use configuration::Configuration;
pub use configuration_error::ConfigurationError;
pub use replay_config::ReplayConfig;
pub use terminal_config::TerminalConfig;

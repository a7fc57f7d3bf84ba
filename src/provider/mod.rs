mod provider;
mod replay;

pub use provider::Accuracy;
pub use provider::ConfigError;
pub use provider::FieldMask;
pub use provider::Provider;
pub use provider::RequestError;
pub use provider::TrackingConfig;
pub use provider::TrackingMode;
pub use replay::parse_track;
pub use replay::ReplayError;
pub use replay::ReplayProvider;

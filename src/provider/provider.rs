use crate::event::Ticket;
use crate::settings::OptimizationMode;
use crate::settings::QualityOfService;
use crate::settings::ServerDescriptor;
use crate::settings::Settings;

use std::time::Duration;

use thiserror::Error;

bitflags! {
    /// Fields requested from the provider
    pub struct FieldMask: u32 {
        const LOCATION = 0x01;
        const ALTITUDE = 0x02;
        const VELOCITY = 0x04;
    }
}

/// Requested accuracy tier.  `Level1` is the coarsest and fastest, `Level6` the most precise.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Accuracy {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Level6,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TrackingMode {
    Default,
    TrackLocal,
    TrackNetwork,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrackingConfig {
    pub mode: TrackingMode,
    /// Fixes in the tracking session, 0 for unlimited
    pub fix_count: u32,
    pub interval: Duration,
    pub optimization: OptimizationMode,
    pub qos: QualityOfService,
    pub server: ServerDescriptor,
}

impl TrackingConfig {
    /// Configuration for one-off fixes using the stored settings.
    pub fn single(settings: &Settings) -> Self {
        TrackingConfig {
            mode: TrackingMode::Default,
            fix_count: 1,
            interval: Duration::from_secs(0),
            optimization: settings.optimization,
            qos: settings.qos,
            server: settings.server,
        }
    }

    /// Configuration for network-assisted tracking at `interval`.
    pub fn network(settings: &Settings, interval: Duration) -> Self {
        TrackingConfig {
            mode: TrackingMode::TrackNetwork,
            fix_count: 0,
            interval,
            optimization: OptimizationMode::Speed,
            qos: settings.qos,
            server: ServerDescriptor::Default,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("tracking interval must not be zero")]
    InvalidInterval,
    #[error("configuration rejected: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RequestError {
    #[error("fix request isn't supported")]
    Unsupported,
    #[error("fix request failed: {0}")]
    TransientFailure(String),
}

/// A source of position fixes.
///
/// A provider answers each accepted `request_fix` exactly once by delivering an
/// [`Event::Fix`](crate::event::Event::Fix) carrying the request's ticket.
pub trait Provider {
    fn configure(&mut self, config: &TrackingConfig) -> Result<(), ConfigError>;

    fn request_fix(
        &mut self,
        fields: FieldMask,
        accuracy: Accuracy,
        ticket: Ticket,
    ) -> Result<(), RequestError>;

    /// Drop the pending response for `ticket`, if any.
    fn cancel(&mut self, ticket: Ticket);
}

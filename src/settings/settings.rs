use crate::settings::SettingsError;

use std::convert::TryFrom;
use std::net::Ipv4Addr;

/// What the provider should favor when computing a fix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OptimizationMode {
    Default,
    Speed,
    Accuracy,
    Payload,
}

impl OptimizationMode {
    pub fn code(&self) -> u32 {
        match self {
            OptimizationMode::Default => 0,
            OptimizationMode::Speed => 1,
            OptimizationMode::Accuracy => 2,
            OptimizationMode::Payload => 3,
        }
    }
}

impl TryFrom<u32> for OptimizationMode {
    type Error = SettingsError;

    fn try_from(code: u32) -> Result<Self, SettingsError> {
        match code {
            0 => Ok(OptimizationMode::Default),
            1 => Ok(OptimizationMode::Speed),
            2 => Ok(OptimizationMode::Accuracy),
            3 => Ok(OptimizationMode::Payload),
            c => Err(SettingsError::InvalidFormat(format!(
                "unknown optimization mode {}",
                c
            ))),
        }
    }
}

impl Default for OptimizationMode {
    fn default() -> Self {
        OptimizationMode::Default
    }
}

/// Provider accuracy/latency tuning.  Larger values allow the provider more effort.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QualityOfService(pub u8);

impl QualityOfService {
    pub const DEFAULT: QualityOfService = QualityOfService(127);
}

impl Default for QualityOfService {
    fn default() -> Self {
        QualityOfService::DEFAULT
    }
}

/// Where the provider gets assistance data from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ServerDescriptor {
    Default,
    Ip { address: Ipv4Addr, port: u16 },
}

impl ServerDescriptor {
    pub const DEFAULT_CODE: u32 = 0;
    pub const IP_CODE: u32 = 1;

    pub fn code(&self) -> u32 {
        match self {
            ServerDescriptor::Default => ServerDescriptor::DEFAULT_CODE,
            ServerDescriptor::Ip { .. } => ServerDescriptor::IP_CODE,
        }
    }

    /// Port in network byte order, as the provider expects it.
    pub fn wire_port(&self) -> Option<u16> {
        match self {
            ServerDescriptor::Default => None,
            ServerDescriptor::Ip { port, .. } => Some(port.to_be()),
        }
    }
}

impl Default for ServerDescriptor {
    fn default() -> Self {
        ServerDescriptor::Default
    }
}

/// Whether to take one fix and finish, or keep requesting fixes on an interval.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RequestType {
    Single,
    Repeating,
}

impl RequestType {
    pub fn code(&self) -> u32 {
        match self {
            RequestType::Single => 0,
            RequestType::Repeating => 1,
        }
    }
}

impl TryFrom<u32> for RequestType {
    type Error = SettingsError;

    fn try_from(code: u32) -> Result<Self, SettingsError> {
        match code {
            0 => Ok(RequestType::Single),
            1 => Ok(RequestType::Repeating),
            c => Err(SettingsError::InvalidFormat(format!(
                "unknown request type {}",
                c
            ))),
        }
    }
}

impl Default for RequestType {
    fn default() -> Self {
        RequestType::Repeating
    }
}

/// Acquisition settings persisted between runs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Settings {
    pub optimization: OptimizationMode,
    pub qos: QualityOfService,
    pub server: ServerDescriptor,
    pub request_type: RequestType,
}

use chrono::DateTime;
use chrono::Utc;

use serde::Deserialize;

/// Result of asking the provider to extract position information from a fix.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    Success,
    PermissionDenied,
    InvalidArgument,
    Unsupported,
    Failed,
}

impl Default for ResultCode {
    fn default() -> Self {
        ResultCode::Success
    }
}

/// Status the provider attaches to a fix response.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(from = "u32")]
pub enum FixStatus {
    NoError,
    GeneralFailure,
    Timeout,
    AccuracyUnavailable,
    InfoUnavailable,
    Other(u32),
}

impl FixStatus {
    pub fn code(&self) -> u32 {
        match self {
            FixStatus::NoError => 0,
            FixStatus::GeneralFailure => 1,
            FixStatus::Timeout => 2,
            FixStatus::AccuracyUnavailable => 3,
            FixStatus::InfoUnavailable => 4,
            FixStatus::Other(c) => *c,
        }
    }
}

impl From<u32> for FixStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => FixStatus::NoError,
            1 => FixStatus::GeneralFailure,
            2 => FixStatus::Timeout,
            3 => FixStatus::AccuracyUnavailable,
            4 => FixStatus::InfoUnavailable,
            c => FixStatus::Other(c),
        }
    }
}

impl Default for FixStatus {
    fn default() -> Self {
        FixStatus::NoError
    }
}

/// A raw fix response from the provider.
///
/// Every measurement is optional; a `None` means the provider did not report that field for this
/// fix.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FixResult {
    #[serde(default)]
    pub code: ResultCode,
    #[serde(default)]
    pub status: FixStatus,
    /// Set by the provider when the position fields can be used even though `status` reports a
    /// problem.
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub fix_number: u32,
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<i32>,
    pub heading: Option<f64>,
    pub horizontal_velocity: Option<f64>,
    pub vertical_velocity: Option<f64>,
}

fn default_valid() -> bool {
    true
}

impl FixResult {
    /// A response carrying no position at all.
    pub fn unavailable(timestamp: DateTime<Utc>) -> Self {
        FixResult {
            code: ResultCode::Success,
            status: FixStatus::InfoUnavailable,
            valid: false,
            fix_number: 0,
            timestamp,
            latitude: None,
            longitude: None,
            altitude: None,
            heading: None,
            horizontal_velocity: None,
            vertical_velocity: None,
        }
    }

    /// True when the fix should be reported: either no error, or a degraded fix the provider
    /// still marks valid.
    pub fn is_usable(&self) -> bool {
        match self.status {
            FixStatus::NoError => true,
            FixStatus::InfoUnavailable => self.valid,
            _ => false,
        }
    }
}

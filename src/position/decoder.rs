use crate::position::FixResult;
use crate::position::PositionRecord;
use crate::position::ResultCode;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    #[error("not permitted to read position information")]
    PermissionDenied,
    #[error("invalid argument to position extraction")]
    InvalidArgument,
    #[error("position extraction is not supported by this device")]
    Unsupported,
    #[error("position extraction failed")]
    Failed,
}

/// Convert a provider fix into a position record.
///
/// Fields the provider did not report stay absent.
pub fn decode(result: &FixResult) -> Result<PositionRecord, DecodeError> {
    match result.code {
        ResultCode::Success => (),
        ResultCode::PermissionDenied => return Err(DecodeError::PermissionDenied),
        ResultCode::InvalidArgument => return Err(DecodeError::InvalidArgument),
        ResultCode::Unsupported => return Err(DecodeError::Unsupported),
        ResultCode::Failed => return Err(DecodeError::Failed),
    }

    Ok(PositionRecord {
        timestamp: result.timestamp,
        fix_number: result.fix_number,
        latitude: result.latitude,
        longitude: result.longitude,
        altitude: result.altitude,
        heading: result.heading,
        horizontal_velocity: result.horizontal_velocity,
        vertical_velocity: result.vertical_velocity,
    })
}

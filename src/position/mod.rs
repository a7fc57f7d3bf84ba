mod decoder;
mod fix;
mod record;

pub use decoder::decode;
pub use decoder::DecodeError;
pub use fix::FixResult;
pub use fix::FixStatus;
pub use fix::ResultCode;
pub use record::PositionRecord;

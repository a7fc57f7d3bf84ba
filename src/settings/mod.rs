mod parser;
mod settings;
mod settings_error;
mod store;

pub use parser::directives;
pub use parser::parse_settings;
pub use parser::to_document;
pub use settings::OptimizationMode;
pub use settings::QualityOfService;
pub use settings::RequestType;
pub use settings::ServerDescriptor;
pub use settings::Settings;
pub use settings_error::SettingsError;
pub use store::Document;
pub use store::FileDocument;
pub use store::SettingsStore;

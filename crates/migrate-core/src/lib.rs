pub mod config;
pub mod credentials;
pub mod error;
pub mod result;

pub use config::{AppConfig, DestinationConfig, SourceConfig, UploadConfig};
pub use credentials::{DestinationCredentials, SourceCredentials};
pub use error::MigrateError;
pub use result::MigrateResult;

//! Shared configuration and data model for the product link-preview service.

pub mod app_config;
pub mod config;
pub mod product;
pub mod settings;
pub mod slug;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Price, ProductPreview};
pub use settings::{
    resolve_backend_origin, BackendOrigin, EnvSettings, OriginSource, SettingsSource,
};
pub use slug::encode_slug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

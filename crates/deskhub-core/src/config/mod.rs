//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod backend;
pub mod cache;
pub mod logging;
pub mod notifications;
pub mod presence;

use serde::{Deserialize, Serialize};

pub use self::backend::BackendConfig;
pub use self::cache::CacheConfig;
pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;
pub use self::presence::PresenceConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Idle detection and status confirmation settings.
    #[serde(default)]
    pub presence: PresenceConfig,
    /// Chat polling and alert repetition settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Query cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Navigation menu settings.
    #[serde(default)]
    pub menu: MenuConfig,
    /// Signed-in user settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Navigation menu configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Path to a JSON menu tree. The bundled tree is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

/// Signed-in user configuration for the headless console.
///
/// The starting presence is not configured; it is read back from the
/// presence backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The viewer's user id.
    #[serde(default)]
    pub user_id: String,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `DESKHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DESKHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML string (used by tests and tooling).
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

//! Configuration loading via figment.
//!
//! # Sources (lowest to highest priority)
//!
//! 1. Built-in defaults
//! 2. TOML file (`driftbottle.toml`, or the path given on the command line)
//! 3. Environment variables (`DRIFTBOTTLE_*`, `__` as section separator)
//!
//! # Example
//!
//! ```toml
//! [gateway]
//! address = "napcat"
//! port = 3000
//!
//! [storage]
//! db_path = "bottles.db"
//!
//! [commands]
//! throw_prefix = "扔漂流瓶"
//! pick_command = "捡漂流瓶"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 9000
//! path = "/onebot"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! `DRIFTBOTTLE_GATEWAY__ADDRESS=10.0.0.5` overrides `gateway.address`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file searched in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "driftbottle.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Extraction or file parsing failed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BotConfig {
    /// OneBot gateway connection settings.
    pub gateway: GatewayConfig,
    /// Bottle store settings.
    pub storage: StorageConfig,
    /// Command match patterns.
    pub commands: CommandConfig,
    /// Webhook server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl BotConfig {
    /// Loads configuration from defaults, a TOML file, and the environment.
    ///
    /// With an explicit `path` the file must exist; otherwise the default
    /// file is optional and a missing one yields a fully defaulted config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path {
            Some(p) => figment.merge(Toml::file_exact(p)),
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };
        Ok(figment
            .merge(Env::prefixed("DRIFTBOTTLE_").split("__"))
            .extract()?)
    }
}

/// OneBot gateway connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway host name or address.
    pub address: String,
    /// Gateway HTTP port.
    pub port: u16,
    /// Optional bearer token for the gateway API.
    pub access_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: "napcat".to_string(),
            port: 3000,
            access_token: None,
        }
    }
}

/// Bottle store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("bottles.db"),
        }
    }
}

/// Command match patterns. Pure routing detail; the core never sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Messages starting with this prefix throw a bottle; the remainder is
    /// the content.
    pub throw_prefix: String,
    /// Messages exactly equal to this pick a bottle.
    pub pick_command: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            throw_prefix: "扔漂流瓶".to_string(),
            pick_command: "捡漂流瓶".to_string(),
        }
    }
}

/// Webhook server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Path the gateway POSTs events to.
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            path: "/onebot".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error). `RUST_LOG`
    /// overrides this when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.gateway.address, "napcat");
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.gateway.access_token, None);
        assert_eq!(config.storage.db_path, PathBuf::from("bottles.db"));
        assert_eq!(config.commands.throw_prefix, "扔漂流瓶");
        assert_eq!(config.commands.pick_command, "捡漂流瓶");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let toml = r#"
[gateway]
address = "10.0.0.5"
port = 3100
access_token = "secret"

[storage]
db_path = "/var/lib/driftbottle/bottles.db"

[server]
port = 9100
"#;

        let config: BotConfig = Figment::from(Serialized::defaults(BotConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .unwrap();

        assert_eq!(config.gateway.address, "10.0.0.5");
        assert_eq!(config.gateway.port, 3100);
        assert_eq!(config.gateway.access_token, Some("secret".to_string()));
        assert_eq!(
            config.storage.db_path,
            PathBuf::from("/var/lib/driftbottle/bottles.db")
        );
        assert_eq!(config.server.port, 9100);
        // Untouched sections keep their defaults.
        assert_eq!(config.commands.pick_command, "捡漂流瓶");
    }
}

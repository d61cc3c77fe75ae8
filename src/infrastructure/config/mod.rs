//! Configuration management

use crate::application::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub line: LineConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// LINE platform credentials. Both values must be present for the
/// webhook adapter to run; otherwise the bot falls back to console mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineConfig {
    pub channel_secret: Option<String>,
    pub channel_access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub path: PathBuf,
}

/// Resolved LINE credentials
#[derive(Debug, Clone)]
pub struct LineCredentials {
    pub channel_secret: String,
    pub channel_access_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "fridge-bot".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5001,
            },
            line: LineConfig {
                channel_secret: None,
                channel_access_token: None,
            },
            storage: StorageConfig {
                path: PathBuf::from("fridge.json"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Build a config from environment variables on top of the defaults.
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(secret) = std::env::var("LINE_CHANNEL_SECRET") {
            config.line.channel_secret = Some(secret);
        }

        if let Ok(token) = std::env::var("LINE_CHANNEL_ACCESS_TOKEN") {
            config.line.channel_access_token = Some(token);
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => config.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Ok(path) = std::env::var("FRIDGE_FILE") {
            config.storage.path = PathBuf::from(path);
        }

        config
    }

    /// LINE credentials, if both secret and access token are configured.
    pub fn line_credentials(&self) -> Option<LineCredentials> {
        match (&self.line.channel_secret, &self.line.channel_access_token) {
            (Some(secret), Some(token)) => Some(LineCredentials {
                channel_secret: secret.clone(),
                channel_access_token: token.clone(),
            }),
            _ => None,
        }
    }
}

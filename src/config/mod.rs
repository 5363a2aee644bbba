//! # Configuration Management Module
//!
//! Central configuration for the SwiftFood terminal game: type-safe TOML
//! sections with defaults and validation, loaded and saved asynchronously.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! name = "SwiftFood"
//! welcome_message = "Welcome to SwiftFood! Cook your way to the top."
//! autosave_interval_secs = 30
//! login_delay_ms = 1500
//!
//! [storage]
//! data_dir = "data"
//!
//! [logging]
//! level = "info"
//! # file = "swiftfood.log"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swiftfood::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Game: {}", config.game.name);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub welcome_message: String,
    /// Seconds between fire-and-forget snapshot writes during play.
    pub autosave_interval_secs: u64,
    /// Simulated latency applied at the login gate, in milliseconds.
    /// Presentation timing only; the progression core never sees it.
    pub login_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace.
    pub level: String,
    /// Optional log file; when set, records are appended here and echoed to
    /// the console only when stdout is a TTY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                name: "SwiftFood".to_string(),
                welcome_message: "Welcome to SwiftFood! Cook your way to the top.".to_string(),
                autosave_interval_secs: 30,
                login_delay_ms: 1500,
            },
            storage: StorageConfig {
                data_dir: "data".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Persist this configuration to a TOML file.
    pub async fn save(&self, path: &str) -> Result<()> {
        let serialized = toml::to_string_pretty(self)?;
        fs::write(path, serialized).await?;
        Ok(())
    }

    /// Write the default configuration to `path` and return it.
    pub async fn create_default(path: &str) -> Result<Config> {
        let config = Config::default();
        config.save(path).await?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.name.trim().is_empty() {
            return Err(anyhow!("game.name cannot be empty"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir cannot be empty"));
        }
        if self.game.autosave_interval_secs == 0 {
            return Err(anyhow!("game.autosave_interval_secs must be at least 1"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(anyhow!("unknown logging.level: {}", other)),
        }
        Ok(())
    }
}

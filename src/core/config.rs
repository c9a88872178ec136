//! Configuration for the process monitor

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "memrank";

/// Levels accepted by `log_level`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Upper bound for `cooldown_ms`
pub const MAX_COOLDOWN_MS: u64 = 60_000;

/// Main monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pause after a terminate request or an invalid option (milliseconds)
    pub cooldown_ms: u64,

    /// Clear the console before every redraw
    pub clear_screen: bool,

    /// Send SIGKILL instead of SIGTERM (Linux only)
    pub force_kill: bool,

    /// Log level used when no `-v` flag is given
    pub log_level: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 3000,
            clear_screen: true,
            force_kill: false,
            log_level: "warn".into(),
        }
    }
}

impl MonitorConfig {
    /// Load config from TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `explicit` if given, else the per-user file if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/memrank/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cooldown_ms > MAX_COOLDOWN_MS {
            return Err(format!(
                "cooldown_ms ({}) exceeds maximum of {}",
                self.cooldown_ms, MAX_COOLDOWN_MS
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!("unknown log_level '{}'", self.log_level));
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

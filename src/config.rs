use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BruhBotConfig {
    pub bot: BotConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BotConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Flat CSV file holding every quote record.
    pub quotes_path: String,
    /// Root of the per-author meme directory tree.
    pub memes_dir: String,
    /// Sidecar file the CLI uses to carry rotation state between runs.
    pub state_path: String,
}

impl Default for BruhBotConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let dir = default_bruhbot_dir();
        Self {
            quotes_path: dir.join("quotes.csv").to_string_lossy().into_owned(),
            memes_dir: dir.join("memes").to_string_lossy().into_owned(),
            state_path: dir.join("rotation.json").to_string_lossy().into_owned(),
        }
    }
}

/// Returns `~/.bruhbot/`
pub fn default_bruhbot_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".bruhbot")
}

/// Returns the default config file path: `~/.bruhbot/config.toml`
pub fn default_config_path() -> PathBuf {
    default_bruhbot_dir().join("config.toml")
}

impl BruhBotConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BruhBotConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (BRUHBOT_QUOTES, BRUHBOT_MEMES,
    /// BRUHBOT_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BRUHBOT_QUOTES") {
            self.storage.quotes_path = val;
        }
        if let Ok(val) = std::env::var("BRUHBOT_MEMES") {
            self.storage.memes_dir = val;
        }
        if let Ok(val) = std::env::var("BRUHBOT_LOG_LEVEL") {
            self.bot.log_level = val;
        }
    }

    /// Resolve the quotes file path, expanding `~` if needed.
    pub fn resolved_quotes_path(&self) -> PathBuf {
        expand_tilde(&self.storage.quotes_path)
    }

    /// Resolve the meme tree root, expanding `~` if needed.
    pub fn resolved_memes_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.memes_dir)
    }

    /// Resolve the rotation-state sidecar path, expanding `~` if needed.
    pub fn resolved_state_path(&self) -> PathBuf {
        expand_tilde(&self.storage.state_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

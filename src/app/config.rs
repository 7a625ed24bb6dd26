//! Configuration for the editor

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_GROWTH_INCREMENT, DEFAULT_INITIAL_GAP, DEFAULT_RESERVED_ROWS};
use crate::input::Keymap;
use crate::term::WindowSize;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes added to the buffer each time its gap runs out
    pub growth_increment: usize,
    /// Gap reserved in front of the loaded document
    pub initial_gap: usize,
    /// Terminal rows kept free below the text
    pub reserved_rows: usize,
    /// Control-key bindings
    pub keys: KeyConfig,
    /// Fallback window settings
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            initial_gap: DEFAULT_INITIAL_GAP,
            reserved_rows: DEFAULT_RESERVED_ROWS,
            keys: KeyConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

/// Control-key bindings, given as the letter pressed together with Ctrl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub quit: char,
    pub debug_dump: char,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            debug_dump: 'w',
        }
    }
}

/// Window size used when the terminal cannot be queried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub columns: u16,
    pub rows: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
        }
    }
}

impl WindowConfig {
    pub fn size(&self) -> WindowSize {
        WindowSize::new(self.columns, self.rows)
    }
}

/// Ctrl+letter combinations the terminal already uses for Tab and Enter
const RESERVED_KEYS: [char; 3] = ['i', 'j', 'm'];

impl Config {
    /// Load configuration from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/mochi-edit/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(
                        "Ignoring config at {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }
        Self::default()
    }

    /// Check values that would leave the editor unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_increment == 0 {
            return Err(ConfigError::Invalid(
                "growth_increment must be at least 1".to_string(),
            ));
        }
        for (name, key) in [("quit", self.keys.quit), ("debug_dump", self.keys.debug_dump)] {
            if !key.is_ascii_alphabetic() {
                return Err(ConfigError::Invalid(format!(
                    "keys.{} must be an ASCII letter, got {:?}",
                    name, key
                )));
            }
            if RESERVED_KEYS.contains(&key.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "keys.{}: Ctrl-{} is indistinguishable from Tab/Enter",
                    name, key
                )));
            }
        }
        if self.keys.quit.eq_ignore_ascii_case(&self.keys.debug_dump) {
            return Err(ConfigError::Invalid(
                "keys.quit and keys.debug_dump must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the decoder keymap from the configured letters
    pub fn keymap(&self) -> Keymap {
        Keymap::new(self.keys.quit as u8, self.keys.debug_dump as u8)
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<std::path::PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| std::path::PathBuf::from(home).join(".config").join("mochi-edit"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

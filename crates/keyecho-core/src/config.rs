use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KeyechoError, Result};
use crate::types::{Annotation, TypingEcho};

/// Top-level configuration for keyecho.
///
/// Loaded from `~/.keyecho/config.toml` by default. Every section is
/// optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyechoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub echo: EchoConfig,
    #[serde(default)]
    pub messages: MessageConfig,
}

impl KeyechoConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KeyechoConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KeyechoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Typing echo and change description settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Initial typing echo mode.
    pub typing_echo: TypingEcho,
    /// New values up to this many UTF-16 units are spoken whole when no
    /// caret-based explanation of the change fits.
    pub max_short_phrase_len: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            typing_echo: TypingEcho::Character,
            max_short_phrase_len: 60,
        }
    }
}

/// Spoken labels, so hosts can localize them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub selected: String,
    pub added_to_selection: String,
    pub removed_from_selection: String,
    pub deleted: String,
    pub end_of_text: String,
    /// Spoken for every change in a password field.
    pub password_char: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            selected: "selected".to_string(),
            added_to_selection: "added to selection".to_string(),
            removed_from_selection: "removed from selection".to_string(),
            deleted: "deleted".to_string(),
            end_of_text: "End of text".to_string(),
            password_char: "dot".to_string(),
        }
    }
}

impl MessageConfig {
    /// The label spoken after text carrying `annotation`.
    pub fn label(&self, annotation: Annotation) -> &str {
        match annotation {
            Annotation::Selected => &self.selected,
            Annotation::AddedToSelection => &self.added_to_selection,
            Annotation::RemovedFromSelection => &self.removed_from_selection,
            Annotation::Deleted => &self.deleted,
        }
    }
}

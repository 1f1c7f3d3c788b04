//! CLI argument definitions for the keyecho binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use keyecho_core::types::TypingEcho;

/// keyecho - describe text-field edits the way a screen reader speaks them.
#[derive(Parser, Debug)]
#[command(name = "keyecho", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a JSON-lines script of field snapshots and print what would be
    /// spoken and shown in braille.
    Replay {
        /// Script file, one JSON object per line.
        script: PathBuf,

        /// Typing echo mode (character, word, character_and_word, none).
        #[arg(short = 'e', long = "echo")]
        echo: Option<TypingEcho>,

        /// Treat the field as a multiline text area.
        #[arg(long = "multiline")]
        multiline: bool,

        /// Treat the field as a password field.
        #[arg(long = "password")]
        password: bool,
    },

    /// Print the common-affix diff between two strings.
    Diff { old: String, new: String },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > KEYECHO_CONFIG env var > platform default (~/.keyecho/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("KEYECHO_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".keyecho").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".keyecho").join("config.toml");
    }
    PathBuf::from("config.toml")
}

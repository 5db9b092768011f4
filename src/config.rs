use crate::commands::DEFAULT_TOP_COMMANDS;
use crate::loader::DEFAULT_ZSH_SESSION_MIN_BYTES;
use crate::models::Shell;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration settings for cli-wrapped
///
/// Stores user preferences that persist between runs, including:
/// - Shell dialect and history file location overrides
/// - Number of top commands to report
/// - Default output format (enhanced/json)
/// - Zsh session merge threshold and log format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shell to analyse instead of the one named by $SHELL
    pub default_shell: Option<Shell>,
    /// Custom history file path
    pub history_path: Option<PathBuf>,
    /// How many entries the top-commands list holds
    pub top_commands_limit: usize,
    /// Default output format for reports
    pub output_format: OutputFormat,
    /// Zsh history smaller than this many bytes is merged with ~/.zsh_sessions
    pub zsh_session_min_bytes: u64,
    pub log_format: LogFormat,
}

/// Output format options for reports
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Cards, bars and tables (default)
    Enhanced,
    /// JSON for scripting and automation
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_shell: None,
            history_path: None,
            top_commands_limit: DEFAULT_TOP_COMMANDS,
            output_format: OutputFormat::Enhanced,
            zsh_session_min_bytes: DEFAULT_ZSH_SESSION_MIN_BYTES,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("cli-wrapped").join("config.yaml"))
    }

    pub fn set_default_shell(&mut self, shell: Shell) {
        self.default_shell = Some(shell);
    }

    pub fn set_history_path(&mut self, path: PathBuf) {
        self.history_path = Some(path);
    }
}

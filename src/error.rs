use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating and reading shell history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No history file exists at any of the probed locations
    #[error("Could not find shell history file. Tried: {}", join_paths(.tried))]
    HistoryNotFound { tried: Vec<PathBuf> },
    /// An explicitly selected history file could not be read
    #[error("Failed to read history file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
    /// Year argument outside the representable range
    #[error("Invalid year: '{input}' (expected a four digit year such as 2024)")]
    InvalidYear { input: String },
}

pub type Result<T> = std::result::Result<T, HistoryError>;

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl HistoryError {
    pub fn history_not_found(tried: Vec<PathBuf>) -> Self {
        Self::HistoryNotFound { tried }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(message: &str) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    pub fn invalid_year(input: &str) -> Self {
        Self::InvalidYear {
            input: input.to_string(),
        }
    }

    /// Multi-line explanation for the command line
    pub fn detailed_message(&self) -> String {
        match self {
            HistoryError::HistoryNotFound { tried } => format!(
                "No shell history found. Looked in:\n{}\nHint: pass --file <PATH> together with --shell <zsh|bash|fish> if your history lives elsewhere.",
                tried
                    .iter()
                    .map(|p| format!("  - {}", p.display()))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            HistoryError::Io { path, source } => format!(
                "Failed to read '{}'\nError: {}\nCheck that the file exists and is readable by the current user.",
                path.display(),
                source
            ),
            _ => self.to_string(),
        }
    }
}

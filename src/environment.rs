use crate::models::Shell;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Process-level inputs the loader depends on, captured once so the loader
/// itself never reads the environment
#[derive(Debug, Clone)]
pub struct Environment {
    /// Value of `$SHELL`
    pub shell_var: Option<String>,
    pub platform: Platform,
    pub home: PathBuf,
}

impl Environment {
    pub fn from_process() -> Self {
        Self::new(
            std::env::var("SHELL").ok().as_deref(),
            Platform::current(),
            dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        )
    }

    pub fn new(shell_var: Option<&str>, platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self {
            shell_var: shell_var.map(str::to_string),
            platform,
            home: home.into(),
        }
    }

    /// Shell named by `$SHELL`, else the platform default
    pub fn detect_shell(&self) -> Shell {
        let shell = self.shell_var.as_deref().unwrap_or("");
        if shell.contains("zsh") {
            Shell::Zsh
        } else if shell.contains("fish") {
            Shell::Fish
        } else if shell.contains("bash") {
            Shell::Bash
        } else {
            match self.platform {
                Platform::MacOs => Shell::Zsh,
                Platform::Other => Shell::Bash,
            }
        }
    }

    /// Directory where macOS Terminal keeps per-session zsh history
    pub fn zsh_sessions_dir(&self) -> PathBuf {
        self.home.join(".zsh_sessions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_shell_from_variable() {
        let env = Environment::new(Some("/usr/bin/zsh"), Platform::Other, "/home/u");
        assert_eq!(env.detect_shell(), Shell::Zsh);
        let env = Environment::new(Some("/opt/homebrew/bin/fish"), Platform::MacOs, "/home/u");
        assert_eq!(env.detect_shell(), Shell::Fish);
        let env = Environment::new(Some("/bin/bash"), Platform::MacOs, "/home/u");
        assert_eq!(env.detect_shell(), Shell::Bash);
    }

    #[test]
    fn test_detect_shell_platform_fallback() {
        let env = Environment::new(None, Platform::MacOs, "/home/u");
        assert_eq!(env.detect_shell(), Shell::Zsh);
        let env = Environment::new(Some("/bin/sh"), Platform::Other, "/home/u");
        assert_eq!(env.detect_shell(), Shell::Bash);
    }
}

use crate::bash_parser::BashParser;
use crate::fish_parser::FishParser;
use crate::models::{HistoryEntry, Shell};
use crate::zsh_parser::ZshParser;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Turns the text of one history file into ordered entries.
///
/// Parsing never fails: lines that match no rule of the dialect are dropped.
pub trait HistoryParser {
    fn parse(&self, content: &str) -> Vec<HistoryEntry>;

    /// Location of the history file relative to a home directory
    fn default_path(&self, home: &Path) -> PathBuf;
}

impl Shell {
    pub fn parser(&self) -> &'static dyn HistoryParser {
        match self {
            Shell::Zsh => &ZshParser,
            Shell::Bash => &BashParser,
            Shell::Fish => &FishParser,
        }
    }

    pub fn parse(&self, content: &str) -> Vec<HistoryEntry> {
        self.parser().parse(content)
    }

    pub fn default_path(&self, home: &Path) -> PathBuf {
        self.parser().default_path(home)
    }
}

/// Convert a string of unix seconds; out-of-range values yield `None`
pub fn parse_unix_seconds(digits: &str) -> Option<DateTime<Utc>> {
    digits
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unix_seconds() {
        let ts = parse_unix_seconds("1704067200").unwrap();
        assert_eq!(ts.timestamp(), 1704067200);
        assert!(parse_unix_seconds("99999999999999999999999").is_none());
        assert!(parse_unix_seconds("").is_none());
    }

    #[test]
    fn test_default_paths() {
        let home = Path::new("/home/alice");
        assert_eq!(
            Shell::Zsh.default_path(home),
            PathBuf::from("/home/alice/.zsh_history")
        );
        assert_eq!(
            Shell::Bash.default_path(home),
            PathBuf::from("/home/alice/.bash_history")
        );
        assert_eq!(
            Shell::Fish.default_path(home),
            PathBuf::from("/home/alice/.local/share/fish/fish_history")
        );
    }

    #[test]
    fn test_dispatch_by_shell() {
        let content = "#1704067200\nls";
        assert_eq!(Shell::Bash.parse(content).len(), 1);
        // bare marker lines are plain commands in zsh
        assert_eq!(Shell::Zsh.parse(content).len(), 2);
        assert!(Shell::Fish.parse(content).is_empty());
    }
}

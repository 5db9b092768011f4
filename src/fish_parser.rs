//! Fish history, a YAML-like block format:
//!
//! ```text
//! - cmd: cargo build
//!   when: 1735247578
//!   paths:
//!     - Cargo.toml
//! ```

use crate::models::HistoryEntry;
use crate::parser::{HistoryParser, parse_unix_seconds};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static CMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^- cmd: (.*)$").expect("valid fish cmd regex"));
static WHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+when: (\d+)$").expect("valid fish when regex"));
static PATHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+paths:").expect("valid fish paths regex"));
static PATH_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+- ").expect("valid fish path item regex"));

pub struct FishParser;

impl HistoryParser for FishParser {
    fn parse(&self, content: &str) -> Vec<HistoryEntry> {
        let mut scan = FishScan::default();
        for line in content.split('\n') {
            scan.feed(line);
        }
        scan.finish()
    }

    fn default_path(&self, home: &Path) -> PathBuf {
        home.join(".local").join("share").join("fish").join("fish_history")
    }
}

#[derive(Debug)]
struct PendingCommand {
    command: String,
    timestamp: Option<DateTime<Utc>>,
    raw_lines: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FishScan {
    entries: Vec<HistoryEntry>,
    current: Option<PendingCommand>,
}

impl FishScan {
    pub fn feed(&mut self, line: &str) {
        if let Some(caps) = CMD.captures(line) {
            self.flush();
            self.current = Some(PendingCommand {
                command: caps[1].to_string(),
                timestamp: None,
                raw_lines: vec![line.to_string()],
            });
            return;
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };

        if let Some(caps) = WHEN.captures(line) {
            current.timestamp = parse_unix_seconds(&caps[1]);
            current.raw_lines.push(line.to_string());
        } else if PATHS.is_match(line) || PATH_ITEM.is_match(line) {
            current.raw_lines.push(line.to_string());
        }
    }

    fn flush(&mut self) {
        if let Some(done) = self.current.take() {
            if !done.command.is_empty() {
                self.entries.push(HistoryEntry::new(
                    done.command,
                    done.timestamp,
                    done.raw_lines.join("\n"),
                ));
            }
        }
    }

    pub fn finish(mut self) -> Vec<HistoryEntry> {
        self.flush();
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_cmd_and_when() {
        let content = "- cmd: git status\n  when: 1704067200\n- cmd: ls -la\n  when: 1704067260\n";
        let entries = FishParser.parse(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command, "git status");
        assert_eq!(entries[0].timestamp.unwrap().timestamp(), 1704067200);
        assert_eq!(entries[1].command, "ls -la");
        assert_eq!(entries[1].timestamp.unwrap().timestamp(), 1704067260);
    }

    #[test]
    fn test_paths_block_is_ignored() {
        let content = "- cmd: vim notes.md\n  when: 1704067200\n  paths:\n    - notes.md\n    - other.md";
        let entries = FishParser.parse(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "vim notes.md");
        assert!(!entries[0].command.contains("other.md"));
        assert_eq!(entries[0].raw_line.lines().count(), 5);
    }

    #[test]
    fn test_missing_when_leaves_timestamp_empty() {
        let entries = FishParser.parse("- cmd: echo hi\n- cmd: pwd\n  when: 1704067200");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].timestamp.is_none());
        assert!(entries[1].timestamp.is_some());
    }

    #[test]
    fn test_last_entry_flushed_at_end_of_input() {
        let mut scan = FishScan::default();
        scan.feed("- cmd: cargo test");
        scan.feed("  when: 1704067200");
        let entries = scan.finish();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "cargo test");
    }

    #[test]
    fn test_stray_lines_are_dropped() {
        let content = "  when: 1704067100\ngarbage\n- cmd: ls\nnot indented";
        let entries = FishParser.parse(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "ls");
        assert!(entries[0].timestamp.is_none());
        assert_eq!(entries[0].raw_line, "- cmd: ls");
    }
}

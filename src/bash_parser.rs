use crate::models::HistoryEntry;
use crate::parser::{HistoryParser, parse_unix_seconds};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

// Written by bash when HISTTIMEFORMAT is set
static TIMESTAMP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(\d+)$").expect("valid bash timestamp regex"));

/// Bash history: one command per line, optionally preceded by `#<epoch>`
pub struct BashParser;

impl HistoryParser for BashParser {
    fn parse(&self, content: &str) -> Vec<HistoryEntry> {
        let mut scan = BashScan::default();
        for line in content.split('\n') {
            scan.feed(line);
        }
        scan.finish()
    }

    fn default_path(&self, home: &Path) -> PathBuf {
        home.join(".bash_history")
    }
}

#[derive(Debug, Default)]
pub struct BashScan {
    entries: Vec<HistoryEntry>,
    /// Set by a marker line, consumed by the next command
    pending: Option<(String, Option<DateTime<Utc>>)>,
}

impl BashScan {
    pub fn feed(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if let Some(caps) = TIMESTAMP_MARKER.captures(line) {
            self.pending = Some((line.to_string(), parse_unix_seconds(&caps[1])));
            return;
        }

        let entry = match self.pending.take() {
            Some((marker, timestamp)) => {
                HistoryEntry::new(line, timestamp, format!("{}\n{}", marker, line))
            }
            None => HistoryEntry::new(line, None, line),
        };
        self.entries.push(entry);
    }

    /// A marker with no following command is dropped
    pub fn finish(self) -> Vec<HistoryEntry> {
        self.entries
    }
}

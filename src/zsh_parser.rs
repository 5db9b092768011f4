//! Zsh extended history.
//!
//! Each entry starts with a `: <epoch>:<duration>;<command>` header. Lines
//! without a header continue the previous command (heredocs, trailing `\`).
//! Files written without `EXTENDED_HISTORY` have no headers at all, so bare
//! lines seen before any header are taken as one command each.

use crate::models::HistoryEntry;
use crate::parser::{HistoryParser, parse_unix_seconds};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^: (\d+):\d+;(.*)$").expect("valid zsh header regex"));

pub struct ZshParser;

impl HistoryParser for ZshParser {
    fn parse(&self, content: &str) -> Vec<HistoryEntry> {
        let mut scan = ZshScan::default();
        for line in content.split('\n') {
            scan.feed(line);
        }
        scan.finish()
    }

    fn default_path(&self, home: &Path) -> PathBuf {
        home.join(".zsh_history")
    }
}

/// Line scanner: idle until the first header, then building one entry
#[derive(Debug, Default)]
pub struct ZshScan {
    entries: Vec<HistoryEntry>,
    current: Option<HistoryEntry>,
}

impl ZshScan {
    pub fn feed(&mut self, line: &str) {
        if let Some(caps) = HEADER.captures(line) {
            if let Some(done) = self.current.take() {
                self.entries.push(done);
            }
            // an empty command after the header is kept; continuation lines may fill it
            self.current = Some(HistoryEntry::new(
                &caps[2],
                parse_unix_seconds(&caps[1]),
                line,
            ));
            return;
        }

        if line.is_empty() {
            return;
        }

        match self.current.as_mut() {
            Some(entry) => {
                entry.command.push('\n');
                entry.command.push_str(line);
                entry.raw_line.push('\n');
                entry.raw_line.push_str(line);
            }
            None => self.entries.push(HistoryEntry::new(line, None, line)),
        }
    }

    /// Flush the entry still being built
    pub fn finish(mut self) -> Vec<HistoryEntry> {
        if let Some(done) = self.current.take() {
            self.entries.push(done);
        }
        self.entries
    }
}

use crate::environment::Environment;
use crate::error::{HistoryError, Result};
use crate::models::{HistoryEntry, HistorySource, ParsedHistory, Shell};
use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Below this size the canonical zsh history is assumed to be a stub and
/// the per-session files are merged in
pub const DEFAULT_ZSH_SESSION_MIN_BYTES: u64 = 1024;

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub shell: Option<Shell>,
    pub file_path: Option<PathBuf>,
}

/// A history source found while probing default locations
#[derive(Debug, Clone, PartialEq, Eq)]
enum Located {
    File { shell: Shell, path: PathBuf },
    ZshSessions {
        canonical: Option<PathBuf>,
        sessions: Vec<PathBuf>,
    },
}

pub struct HistoryLoader {
    env: Environment,
    zsh_session_min_bytes: u64,
}

impl HistoryLoader {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            zsh_session_min_bytes: DEFAULT_ZSH_SESSION_MIN_BYTES,
        }
    }

    pub fn with_zsh_session_min_bytes(mut self, bytes: u64) -> Self {
        self.zsh_session_min_bytes = bytes;
        self
    }

    pub fn load(&self, options: &LoadOptions) -> Result<ParsedHistory> {
        if let Some(path) = &options.file_path {
            let shell = options
                .shell
                .or_else(|| Shell::from_file_name(path))
                .unwrap_or_else(|| self.env.detect_shell());
            return self.parse_file(path, shell);
        }

        let order = self.shell_order(options.shell);
        match self.find_history(&order) {
            Some(Located::File { shell, path }) => self.parse_file(&path, shell),
            Some(Located::ZshSessions {
                canonical,
                sessions,
            }) => Ok(self.merge_zsh_sessions(canonical.as_deref(), &sessions)),
            None => Err(HistoryError::history_not_found(self.candidate_paths(&order))),
        }
    }

    /// Preferred dialect first, then the rest in fixed order
    fn shell_order(&self, preferred: Option<Shell>) -> Vec<Shell> {
        let first = preferred.unwrap_or_else(|| self.env.detect_shell());
        std::iter::once(first)
            .chain(Shell::ALL.into_iter().filter(|s| *s != first))
            .collect()
    }

    fn candidate_paths(&self, order: &[Shell]) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for shell in order {
            paths.push(shell.default_path(&self.env.home));
            if *shell == Shell::Zsh {
                paths.push(self.env.zsh_sessions_dir());
            }
        }
        paths
    }

    fn find_history(&self, order: &[Shell]) -> Option<Located> {
        for &shell in order {
            let path = shell.default_path(&self.env.home);
            if shell != Shell::Zsh {
                if path.is_file() {
                    return Some(Located::File { shell, path });
                }
                continue;
            }

            let size = fs::metadata(&path)
                .ok()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            if let Some(size) = size {
                if size >= self.zsh_session_min_bytes {
                    return Some(Located::File { shell, path });
                }
            }

            let sessions = self.find_session_files();
            if !sessions.is_empty() {
                debug!(
                    count = sessions.len(),
                    "zsh history missing or small, merging session files"
                );
                return Some(Located::ZshSessions {
                    canonical: size.map(|_| path),
                    sessions,
                });
            }
            if size.is_some() {
                return Some(Located::File { shell, path });
            }
        }
        None
    }

    fn find_session_files(&self) -> Vec<PathBuf> {
        let dir = self.env.zsh_sessions_dir();
        if !dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            // follows symlinks, unlike entry.file_type()
            .filter(|entry| entry.path().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == "history")
                    .unwrap_or(false)
            })
            .map(|entry| entry.path().to_path_buf())
            .collect()
    }

    pub fn parse_file(&self, path: &Path, shell: Shell) -> Result<ParsedHistory> {
        let content = read_history_text(path).map_err(|e| HistoryError::io(path, e))?;
        let entries = shell.parse(&content);
        info!(
            shell = %shell,
            path = %path.display(),
            entries = entries.len(),
            "loaded shell history"
        );

        Ok(ParsedHistory {
            entries,
            shell,
            source: HistorySource::File(path.to_path_buf()),
        })
    }

    fn merge_zsh_sessions(&self, canonical: Option<&Path>, sessions: &[PathBuf]) -> ParsedHistory {
        let mut files = Vec::new();
        let mut entries = Vec::new();

        for path in canonical.into_iter().chain(sessions.iter().map(PathBuf::as_path)) {
            match read_history_text(path) {
                Ok(content) => {
                    let parsed = Shell::Zsh.parse(&content);
                    debug!(path = %path.display(), entries = parsed.len(), "read session file");
                    entries.extend(parsed);
                    files.push(path.to_path_buf());
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable history file");
                }
            }
        }

        let entries = sort_and_dedupe(entries);
        info!(
            files = files.len(),
            entries = entries.len(),
            "merged zsh session history"
        );

        ParsedHistory {
            entries,
            shell: Shell::Zsh,
            source: HistorySource::Merged {
                dir: self.env.zsh_sessions_dir(),
                files,
            },
        }
    }
}

fn read_history_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Chronological order with undated entries last; keeps the first of any
/// identical `(timestamp, command)` pair
fn sort_and_dedupe(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.sort_by_key(|e| (e.timestamp.is_none(), e.timestamp));
    let mut seen: HashSet<(Option<DateTime<Utc>>, String)> = HashSet::new();
    entries.retain(|e| seen.insert((e.timestamp, e.command.clone())));
    entries
}

/// Keep only entries dated within `year` in local time. An empty result is
/// valid; callers decide whether to fall back to the full history.
pub fn filter_by_year(history: &ParsedHistory, year: i32) -> ParsedHistory {
    filter_by_year_in(history, year, &Local)
}

pub fn filter_by_year_in<Tz: TimeZone>(history: &ParsedHistory, year: i32, tz: &Tz) -> ParsedHistory {
    let entries = history
        .entries
        .iter()
        .filter(|entry| {
            entry
                .timestamp
                .map(|ts| ts.with_timezone(tz).year() == year)
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    ParsedHistory {
        entries,
        shell: history.shell,
        source: history.source.clone(),
    }
}

pub fn parse_year(input: &str) -> Result<i32> {
    let trimmed = input.trim();
    if trimmed.len() != 4 {
        return Err(HistoryError::invalid_year(input));
    }
    trimmed
        .parse::<i32>()
        .ok()
        .filter(|y| *y >= 1970)
        .ok_or_else(|| HistoryError::invalid_year(input))
}

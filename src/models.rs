use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One command the user issued, as read from a history file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Full command text, possibly spanning several physical lines
    pub command: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// Unparsed source text the entry was built from
    pub raw_line: String,
}

impl HistoryEntry {
    pub fn new(
        command: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        raw_line: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            timestamp,
            raw_line: raw_line.into(),
        }
    }
}

/// Supported shell history dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
}

impl Shell {
    /// Fixed probing order used when looking for a history file
    pub const ALL: [Shell; 3] = [Shell::Zsh, Shell::Bash, Shell::Fish];

    pub fn name(&self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Fish => "fish",
        }
    }

    /// Guess the dialect from a file name such as `.zsh_history`
    pub fn from_file_name(path: &std::path::Path) -> Option<Shell> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        Shell::ALL
            .into_iter()
            .find(|shell| name.contains(shell.name()))
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a parsed history came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    File(PathBuf),
    /// Several session files merged into one chronological history
    Merged { dir: PathBuf, files: Vec<PathBuf> },
}

impl fmt::Display for HistorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistorySource::File(path) => write!(f, "{}", path.display()),
            HistorySource::Merged { dir, files } => {
                write!(f, "{} ({} files merged)", dir.display(), files.len())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedHistory {
    pub entries: Vec<HistoryEntry>,
    pub shell: Shell,
    pub source: HistorySource,
}

impl ParsedHistory {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Analysis report types

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandCount {
    pub command: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimePattern {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPattern {
    /// 0 = Sunday .. 6 = Saturday
    pub day: u32,
    pub day_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub hour: u32,
    pub day: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StruggleKind {
    RageSudo,
    Typo,
    RepeatedFailure,
    ManPageCheck,
}

impl fmt::Display for StruggleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StruggleKind::RageSudo => "rage-sudo",
            StruggleKind::Typo => "typo",
            StruggleKind::RepeatedFailure => "repeated-failure",
            StruggleKind::ManPageCheck => "man-page-check",
        };
        write!(f, "{}", label)
    }
}

/// A detected sign of friction. Example commands are never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Struggle {
    pub kind: StruggleKind,
    pub description: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GitStats {
    pub total_commits: usize,
    pub total_pushes: usize,
    pub total_pulls: usize,
    pub branches: usize,
    pub merges: usize,
    pub rebases: usize,
    pub stashes: usize,
    pub most_used_git_command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageManagerStats {
    pub manager: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageManagerLoyalty {
    pub is_loyal: bool,
    pub manager: Option<String>,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDate {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn days(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }
}

/// Aggregate report over one history. Holds no references to the entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_commands: usize,
    pub unique_commands: usize,
    pub top_commands: Vec<CommandCount>,
    pub time_patterns: Vec<TimePattern>,
    pub day_patterns: Vec<DayPattern>,
    pub hourly_heatmap: Vec<HeatmapCell>,
    pub peak_hour: u32,
    pub peak_day: String,
    pub struggles: Vec<Struggle>,
    pub git_stats: Option<GitStats>,
    pub package_managers: Vec<PackageManagerStats>,
    pub longest_command_length: usize,
    pub most_active_date: Option<ActiveDate>,
    pub date_range: Option<DateRange>,
}

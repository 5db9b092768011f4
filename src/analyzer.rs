use crate::commands::{
    DEFAULT_TOP_COMMANDS, count_unique_commands, longest_command_length, top_commands,
};
use crate::git_stats::analyze_git_stats;
use crate::models::{AnalysisResult, HistoryEntry, PackageManagerLoyalty, ParsedHistory};
use crate::package_managers::{analyze_package_managers, detect_loyalty};
use crate::patterns::{
    analyze_day_patterns, analyze_time_patterns, find_date_range, find_most_active_date,
    find_peak_day, find_peak_hour, hourly_heatmap,
};
use crate::struggles::analyze_struggles;
use chrono::{Local, TimeZone};
use tracing::debug;

/// Runs every analyzer over the same entries and assembles the report.
///
/// Analyzers only see the entry slice, never each other's output, so the
/// result is a pure function of the entries (and the time zone used for
/// hour and weekday buckets).
pub struct HistoryAnalyzer {
    top_commands_limit: usize,
}

impl Default for HistoryAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_COMMANDS)
    }
}

impl HistoryAnalyzer {
    pub fn new(top_commands_limit: usize) -> Self {
        Self { top_commands_limit }
    }

    pub fn analyze(&self, history: &ParsedHistory) -> AnalysisResult {
        self.analyze_entries(&history.entries)
    }

    pub fn analyze_entries(&self, entries: &[HistoryEntry]) -> AnalysisResult {
        self.analyze_entries_in(entries, &Local)
    }

    pub fn analyze_entries_in<Tz: TimeZone>(&self, entries: &[HistoryEntry], tz: &Tz) -> AnalysisResult {
        let time_patterns = analyze_time_patterns(entries, tz);
        let day_patterns = analyze_day_patterns(entries, tz);
        let peak_hour = find_peak_hour(&time_patterns);
        let peak_day = find_peak_day(&day_patterns);

        let result = AnalysisResult {
            total_commands: entries.len(),
            unique_commands: count_unique_commands(entries),
            top_commands: top_commands(entries, self.top_commands_limit),
            hourly_heatmap: hourly_heatmap(entries, tz),
            time_patterns,
            day_patterns,
            peak_hour,
            peak_day,
            struggles: analyze_struggles(entries),
            git_stats: analyze_git_stats(entries),
            package_managers: analyze_package_managers(entries),
            longest_command_length: longest_command_length(entries),
            most_active_date: find_most_active_date(entries),
            date_range: find_date_range(entries),
        };

        debug!(
            total = result.total_commands,
            unique = result.unique_commands,
            struggles = result.struggles.len(),
            "analysis complete"
        );
        result
    }
}

impl AnalysisResult {
    pub fn package_manager_loyalty(&self) -> PackageManagerLoyalty {
        detect_loyalty(&self.package_managers)
    }

    pub fn has_timestamps(&self) -> bool {
        self.date_range.is_some()
    }
}

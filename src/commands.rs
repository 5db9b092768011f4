use crate::classifier::extract_base_command;
use crate::helpers::{OrderedTally, percentage};
use crate::models::{CommandCount, HistoryEntry};
use std::collections::HashSet;

pub const DEFAULT_TOP_COMMANDS: usize = 15;

/// Occurrences per base command, in first-seen order
pub fn count_commands(entries: &[HistoryEntry]) -> OrderedTally {
    let mut tally = OrderedTally::new();
    for entry in entries {
        let base = extract_base_command(&entry.command);
        if !base.is_empty() {
            tally.add(&base);
        }
    }
    tally
}

/// Most frequent base commands; percentages are against all entries
pub fn top_commands(entries: &[HistoryEntry], limit: usize) -> Vec<CommandCount> {
    let total = entries.len();
    count_commands(entries)
        .into_sorted()
        .into_iter()
        .take(limit)
        .map(|(command, count)| CommandCount {
            command,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Distinct trimmed command lines (not base commands)
pub fn count_unique_commands(entries: &[HistoryEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.command.trim())
        .collect::<HashSet<_>>()
        .len()
}

/// Only the length is reported so the command itself never leaves the scan
pub fn longest_command_length(entries: &[HistoryEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.command.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(commands: &[&str]) -> Vec<HistoryEntry> {
        commands
            .iter()
            .map(|c| HistoryEntry::new(*c, None, *c))
            .collect()
    }

    #[test]
    fn test_counts_command_frequency() {
        let list = entries(&["git status", "git log", "ls", "git push", "ls -la", "cd src"]);
        let top = top_commands(&list, 15);
        assert_eq!(top[0].command, "git");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].command, "ls");
        assert_eq!(top[1].count, 2);
        assert_eq!(top[2].command, "cd");
    }

    #[test]
    fn test_percentages_against_total() {
        let list = entries(&["ls", "ls", "ls", "pwd"]);
        let top = top_commands(&list, 15);
        assert_eq!(top[0].percentage, 75.0);
        assert_eq!(top[1].percentage, 25.0);
        let sum: usize = top.iter().map(|c| c.count).sum();
        assert!(sum <= list.len());
    }

    #[test]
    fn test_ties_keep_first_seen_order_and_limit() {
        let list = entries(&["b", "a", "c", "a", "b", "c", "d"]);
        let top = top_commands(&list, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].command, "b");
        assert_eq!(top[1].command, "a");
    }

    #[test]
    fn test_empty_commands_are_not_counted() {
        let list = entries(&["", "   ", "ls"]);
        let top = top_commands(&list, 15);
        assert_eq!(top.len(), 1);
        assert!((top[0].percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unique_uses_full_command_line() {
        let list = entries(&["git status", "git log", " git status ", "ls"]);
        assert_eq!(count_unique_commands(&list), 3);
        assert_eq!(count_commands(&list).into_sorted()[0], ("git".to_string(), 3));
    }

    #[test]
    fn test_longest_command_length() {
        let list = entries(&["ls", "echo hello", "pwd"]);
        assert_eq!(longest_command_length(&list), 10);
        assert_eq!(longest_command_length(&[]), 0);
    }

    #[test]
    fn test_longest_command_length_counts_chars() {
        // one char each, though the emoji is two UTF-16 units and four bytes
        let list = entries(&["echo 🚀", "héllo"]);
        assert_eq!(longest_command_length(&list), 6);
    }
}

use crate::helpers::OrderedTally;
use crate::models::{GitStats, HistoryEntry};
use once_cell::sync::Lazy;
use regex::Regex;

// oh-my-zsh style aliases and what they expand to
const GIT_ALIASES: &[(&str, &str)] = &[
    ("g", "git"),
    ("ga", "git add"),
    ("gaa", "git add --all"),
    ("gc", "git commit"),
    ("gcmsg", "git commit -m"),
    ("gco", "git checkout"),
    ("gsw", "git switch"),
    ("gp", "git push"),
    ("gl", "git pull"),
    ("gst", "git status"),
    ("gd", "git diff"),
    ("glog", "git log"),
    ("gb", "git branch"),
    ("gm", "git merge"),
    ("grb", "git rebase"),
    ("gsta", "git stash"),
    ("gstp", "git stash pop"),
];

struct GitPatterns {
    commit: Regex,
    push: Regex,
    pull: Regex,
    branch: Regex,
    merge: Regex,
    rebase: Regex,
    stash: Regex,
}

static PATTERNS: Lazy<GitPatterns> = Lazy::new(|| {
    let re = |pattern: &str| Regex::new(pattern).expect("valid git regex");
    GitPatterns {
        commit: re(r"^(git\s+commit|gc\s|gcmsg?\s)"),
        push: re(r"^(git\s+push|gp\s|gp$|ggpush)"),
        pull: re(r"^(git\s+pull|gl\s|gl$|ggpull|gup)"),
        branch: re(r"^(git\s+(branch|switch|checkout\s+-b)|gco\s+-b|gsw\s)"),
        merge: re(r"^(git\s+merge|gm\s)"),
        rebase: re(r"^(git\s+rebase|grb)"),
        stash: re(r"^(git\s+stash|gsta)"),
    }
});

pub fn expand_alias(alias: &str) -> Option<&'static str> {
    GIT_ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, expansion)| *expansion)
}

fn is_alias(word: &str) -> bool {
    expand_alias(word).is_some()
}

pub fn is_git_command(command: &str) -> bool {
    let trimmed = command.trim();
    if trimmed == "git" || trimmed.starts_with("git ") {
        return true;
    }
    trimmed
        .split_whitespace()
        .next()
        .map(is_alias)
        .unwrap_or(false)
}

/// Git habits, or `None` when the history has no git commands at all
pub fn analyze_git_stats(entries: &[HistoryEntry]) -> Option<GitStats> {
    let mut stats = GitStats::default();
    let mut subcommands = OrderedTally::new();
    let mut seen_git = false;

    for entry in entries.iter().filter(|e| is_git_command(&e.command)) {
        seen_git = true;
        let cmd = entry.command.trim();

        // categories are independent; one line may count in several
        if PATTERNS.commit.is_match(cmd) {
            stats.total_commits += 1;
        }
        if PATTERNS.push.is_match(cmd) {
            stats.total_pushes += 1;
        }
        if PATTERNS.pull.is_match(cmd) {
            stats.total_pulls += 1;
        }
        if PATTERNS.branch.is_match(cmd) {
            stats.branches += 1;
        }
        if PATTERNS.merge.is_match(cmd) {
            stats.merges += 1;
        }
        if PATTERNS.rebase.is_match(cmd) {
            stats.rebases += 1;
        }
        if PATTERNS.stash.is_match(cmd) {
            stats.stashes += 1;
        }

        let mut words = cmd.split_whitespace();
        match words.next() {
            Some("git") => subcommands.add(words.next().unwrap_or("unknown")),
            Some(alias) if is_alias(alias) => subcommands.add(alias),
            _ => {}
        }
    }

    if !seen_git {
        return None;
    }

    let mut most_used = "status";
    let mut most_used_count = 0;
    for (name, count) in subcommands.iter() {
        if count > most_used_count {
            most_used = name;
            most_used_count = count;
        }
    }
    stats.most_used_git_command = most_used.to_string();

    Some(stats)
}

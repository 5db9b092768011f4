//! Heuristics for moments of friction in a history: forgotten sudo, typos,
//! repeated manual lookups and the same command retried over and over.

use crate::helpers::{OrderedTally, pluralize};
use crate::models::{HistoryEntry, Struggle, StruggleKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Typo pattern and the command that was meant. Order matters: the first
/// matching rule claims the entry.
const TYPO_RULES: &[(&str, &str)] = &[
    // git
    (r"^gut\b", "git"),
    (r"^gti\b", "git"),
    (r"^got\s+(commit|push|pull|status|add|checkout)", "git"),
    (r"^giut\b", "git"),
    // ls
    (r"^sl\b", "ls"),
    // cd.. without the space
    (r"^cd\.\.", "cd .."),
    // cat
    (r"^cta\b", "cat"),
    (r"^act\b", "cat"),
    // npm
    (r"^nmp\b", "npm"),
    (r"^nppm\b", "npm"),
    (r"^nom\b", "npm"),
    // yarn
    (r"^yarrn\b", "yarn"),
    (r"^yran\b", "yarn"),
    // pnpm
    (r"^pnmp\b", "pnpm"),
    (r"^pnm\b", "pnpm"),
    // bun
    (r"^bnu\b", "bun"),
    (r"^ubn\b", "bun"),
    // python
    (r"^pythno\b", "python"),
    (r"^pyhton\b", "python"),
    (r"^pytohn\b", "python"),
    // docker
    (r"^dcoker\b", "docker"),
    (r"^dokcer\b", "docker"),
    (r"^docekr\b", "docker"),
    // kubectl
    (r"^kuebctl\b", "kubectl"),
    (r"^kubeclt\b", "kubectl"),
    (r"^kubetcl\b", "kubectl"),
    // clear
    (r"^claer\b", "clear"),
    (r"^cealr\b", "clear"),
    (r"^clera\b", "clear"),
    // exit
    (r"^eixt\b", "exit"),
    (r"^exti\b", "exit"),
    // grep
    (r"^grpe\b", "grep"),
    (r"^gerp\b", "grep"),
    // mkdir
    (r"^mkdri\b", "mkdir"),
    (r"^mdkir\b", "mkdir"),
    (r"^mkdor\b", "mkdir"),
    // editors
    (r"^ocde\b", "code"),
    (r"^cdoe\b", "code"),
    (r"^cusror\b", "cursor"),
    (r"^cursro\b", "cursor"),
];

static TYPO_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    TYPO_RULES
        .iter()
        .map(|(pattern, correct)| (Regex::new(pattern).expect("valid typo regex"), *correct))
        .collect()
});

static MAN_LOOKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^man\s+(\S+)").expect("valid man regex"));

/// Runs of this many identical commands count as one retry streak
const STREAK_LENGTH: usize = 3;

/// A command immediately retried with `sudo` in front
pub fn detect_rage_sudo(entries: &[HistoryEntry]) -> Option<Struggle> {
    let count = entries
        .windows(2)
        .filter(|pair| {
            let prev = pair[0].command.trim();
            pair[1]
                .command
                .trim()
                .strip_prefix("sudo ")
                .map(|rest| rest == prev)
                .unwrap_or(false)
        })
        .count();

    (count > 0).then(|| Struggle {
        kind: StruggleKind::RageSudo,
        description: format!("You forgot sudo {} and had to retry", pluralize(count, "time")),
        count,
    })
}

/// One finding per intended command mistyped at least twice
pub fn detect_typos(entries: &[HistoryEntry]) -> Vec<Struggle> {
    let mut tally = OrderedTally::new();
    for entry in entries {
        let command = entry.command.trim();
        if let Some((_, correct)) = TYPO_PATTERNS.iter().find(|(re, _)| re.is_match(command)) {
            tally.add(correct);
        }
    }

    tally
        .into_sorted()
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(correct, count)| Struggle {
            kind: StruggleKind::Typo,
            description: format!("You mistyped \"{}\" {}", correct, pluralize(count, "time")),
            count,
        })
        .collect()
}

/// Total lookups of manual pages that were opened more than once
pub fn detect_man_page_checks(entries: &[HistoryEntry]) -> Option<Struggle> {
    let mut tally = OrderedTally::new();
    for entry in entries {
        if let Some(caps) = MAN_LOOKUP.captures(&entry.command) {
            tally.add(&caps[1]);
        }
    }

    let total: usize = tally
        .iter()
        .map(|(_, count)| count)
        .filter(|count| *count >= 2)
        .sum();

    (total > 0).then(|| Struggle {
        kind: StruggleKind::ManPageCheck,
        description: format!(
            "You checked the manual {} for commands you've looked up before",
            pluralize(total, "time")
        ),
        count: total,
    })
}

/// Number of runs where one command was repeated three or more times in a row
pub fn detect_repeated_failures(entries: &[HistoryEntry]) -> Option<Struggle> {
    let mut streaks = 0;
    let mut run = 1;
    let mut prev = "";

    for entry in entries {
        let command = entry.command.trim();
        if !command.is_empty() && command == prev {
            run += 1;
            if run == STREAK_LENGTH {
                streaks += 1;
            }
        } else {
            run = 1;
        }
        prev = command;
    }

    (streaks > 0).then(|| Struggle {
        kind: StruggleKind::RepeatedFailure,
        description: format!(
            "You ran the same command 3+ times in a row {} (hoping for a different result?)",
            pluralize(streaks, "time")
        ),
        count: streaks,
    })
}

/// Every finding, most frequent first
pub fn analyze_struggles(entries: &[HistoryEntry]) -> Vec<Struggle> {
    let mut struggles = Vec::new();
    struggles.extend(detect_rage_sudo(entries));
    struggles.extend(detect_typos(entries));
    struggles.extend(detect_man_page_checks(entries));
    struggles.extend(detect_repeated_failures(entries));

    struggles.sort_by(|a, b| b.count.cmp(&a.count));
    struggles
}

use crate::helpers::{OrderedTally, percentage};
use crate::models::{HistoryEntry, PackageManagerLoyalty, PackageManagerStats};
use once_cell::sync::Lazy;
use regex::Regex;

/// Share of the top manager at which the user counts as loyal
pub const LOYALTY_THRESHOLD: f64 = 80.0;

/// Checked in order; the first manager with a matching prefix claims the entry
const PACKAGE_MANAGERS: &[(&str, &[&str])] = &[
    ("pnpm", &[r"^pnpm\b", r"^pnpx\b"]),
    ("npm", &[r"^npm\b", r"^npx\b"]),
    ("yarn", &[r"^yarn\b"]),
    ("bun", &[r"^bun\b", r"^bunx\b"]),
    ("deno", &[r"^deno\b"]),
    ("pip", &[r"^pip3?\b", r"^pipx\b"]),
    ("cargo", &[r"^cargo\b"]),
    ("go", &[r"^go\s+(get|install|mod)\b"]),
    ("brew", &[r"^brew\b"]),
    ("apt", &[r"^(sudo\s+)?apt(-get)?\b"]),
    ("composer", &[r"^composer\b"]),
    ("gem", &[r"^gem\b", r"^bundle\b"]),
];

struct ManagerPatterns {
    name: &'static str,
    patterns: Vec<Regex>,
}

static MANAGERS: Lazy<Vec<ManagerPatterns>> = Lazy::new(|| {
    PACKAGE_MANAGERS
        .iter()
        .map(|&(name, patterns)| ManagerPatterns {
            name,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid package manager regex"))
                .collect(),
        })
        .collect()
});

/// Which package manager a command line invokes, if any
pub fn detect_package_manager(command: &str) -> Option<&'static str> {
    let trimmed = command.trim();
    MANAGERS
        .iter()
        .find(|m| m.patterns.iter().any(|re| re.is_match(trimmed)))
        .map(|m| m.name)
}

/// Managers with at least one invocation, most used first. Percentages are
/// shares of package-manager invocations, not of the whole history.
pub fn analyze_package_managers(entries: &[HistoryEntry]) -> Vec<PackageManagerStats> {
    let mut tally = OrderedTally::new();
    let mut total = 0;
    for entry in entries {
        if let Some(manager) = detect_package_manager(&entry.command) {
            tally.add(manager);
            total += 1;
        }
    }

    tally
        .into_sorted()
        .into_iter()
        .map(|(manager, count)| PackageManagerStats {
            manager,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

pub fn primary_package_manager(stats: &[PackageManagerStats]) -> Option<&str> {
    stats.first().map(|s| s.manager.as_str())
}

pub fn detect_loyalty(stats: &[PackageManagerStats]) -> PackageManagerLoyalty {
    match stats.first() {
        Some(primary) => PackageManagerLoyalty {
            is_loyal: primary.percentage >= LOYALTY_THRESHOLD,
            manager: Some(primary.manager.clone()),
            percentage: primary.percentage,
        },
        None => PackageManagerLoyalty {
            is_loyal: false,
            manager: None,
            percentage: 0.0,
        },
    }
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
    fn test_counts_package_managers() {
        let list = entries(&["npm install", "npm run dev", "yarn add react", "yarn", "ls"]);
        let stats = analyze_package_managers(&list);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].manager, "npm");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].percentage, 50.0);
        assert_eq!(stats[1].manager, "yarn");
        assert_eq!(stats[1].percentage, 50.0);
    }

    #[test]
    fn test_invocation_names() {
        assert_eq!(detect_package_manager("npx create-react-app"), Some("npm"));
        assert_eq!(detect_package_manager("pnpx prisma"), Some("pnpm"));
        assert_eq!(detect_package_manager("pip3 install requests"), Some("pip"));
        assert_eq!(detect_package_manager("sudo apt-get update"), Some("apt"));
        assert_eq!(detect_package_manager("bundle exec rake"), Some("gem"));
        assert_eq!(detect_package_manager("go mod tidy"), Some("go"));
        assert_eq!(detect_package_manager("go build ./..."), None);
        assert_eq!(detect_package_manager("npmrc"), None);
        assert_eq!(detect_package_manager("  cargo build "), Some("cargo"));
    }

    #[test]
    fn test_percentages_against_matching_entries() {
        let list = entries(&["cargo build", "cargo test", "cargo run", "brew upgrade", "ls", "cd"]);
        let stats = analyze_package_managers(&list);
        assert_eq!(stats[0].percentage, 75.0);
        assert_eq!(stats[1].percentage, 25.0);
    }

    #[test]
    fn test_loyalty() {
        let list = entries(&["cargo build", "cargo test", "cargo run", "cargo fmt", "brew install jq"]);
        let stats = analyze_package_managers(&list);
        let loyalty = detect_loyalty(&stats);
        assert!(loyalty.is_loyal);
        assert_eq!(loyalty.manager.as_deref(), Some("cargo"));
        assert!((loyalty.percentage - 80.0).abs() < 1e-9);
        assert_eq!(primary_package_manager(&stats), Some("cargo"));

        let split = analyze_package_managers(&entries(&["npm i", "yarn"]));
        assert!(!detect_loyalty(&split).is_loyal);

        let empty = detect_loyalty(&[]);
        assert!(!empty.is_loyal);
        assert!(empty.manager.is_none());
        assert!(primary_package_manager(&[]).is_none());
    }
}

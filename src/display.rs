use crate::helpers::{format_hour, format_number};
use crate::models::{AnalysisResult, GitStats, Shell, StruggleKind};
use colored::*;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde::Serialize;

/// What was analysed, shown above the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub shell: Shell,
    pub source: String,
    /// `None` when the whole history was analysed
    pub year: Option<i32>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    context: &'a ReportContext,
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
}

const BAR_WIDTH: usize = 30;

pub fn display_report_enhanced(report: &AnalysisResult, context: &ReportContext) {
    let title = match context.year {
        Some(year) => format!("🐚 Your {} in the Terminal", year),
        None => "🐚 Your Terminal, All Time".to_string(),
    };
    println!("{}", "═".repeat(80).bright_black());
    println!(
        "{}  {}",
        title.bright_blue().bold(),
        format!("{} · {}", context.shell, context.source).dimmed()
    );
    println!("{}", "═".repeat(80).bright_black());
    println!();

    display_summary_card(report);
    println!();

    if !report.top_commands.is_empty() {
        section("🏆 Top Commands");
        display_top_commands_table(report);
        println!();
    }

    if report.has_timestamps() {
        section("🕐 When You Code");
        display_time_patterns(report);
        println!();
    }

    if !report.struggles.is_empty() {
        section("😅 Struggles");
        display_struggles(report);
        println!();
    }

    if let Some(git) = &report.git_stats {
        section("🌿 Git Habits");
        display_git_stats(git);
        println!();
    }

    if !report.package_managers.is_empty() {
        section("📦 Package Managers");
        display_package_managers(report);
        println!();
    }

    println!("{}", "═".repeat(80).bright_black());
}

pub fn display_report_json(report: &AnalysisResult, context: &ReportContext) {
    let json = JsonReport {
        context,
        analysis: report,
    };
    match serde_json::to_string_pretty(&json) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report to JSON: {}", e),
    }
}

fn section(title: &str) {
    println!("{}", "─".repeat(80).bright_black());
    println!("{}", title.bright_green().bold());
    println!("{}", "─".repeat(80).bright_black());
}

fn display_summary_card(report: &AnalysisResult) {
    println!("{}", "📊 SUMMARY".bright_yellow().bold());
    println!(
        "  ⌨️  Commands: {}  │  ✨ Unique: {}  │  📏 Longest: {} chars",
        format_number(report.total_commands).bright_magenta().bold(),
        format_number(report.unique_commands).bright_cyan().bold(),
        format_number(report.longest_command_length).bright_yellow()
    );

    match (&report.date_range, &report.most_active_date) {
        (Some(range), Some(active)) => {
            println!(
                "  📅 {} → {} ({} days)  │  🔥 Busiest day: {} ({} commands)",
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d"),
                range.days(),
                active.date.format("%Y-%m-%d").to_string().bright_green().bold(),
                format_number(active.count)
            );
            println!(
                "  ⏰ Peak hour: {}  │  📆 Peak day: {}",
                format_hour(report.peak_hour).bright_blue().bold(),
                report.peak_day.bright_blue().bold()
            );
        }
        _ => println!(
            "  {}",
            "No timestamps in this history, so time patterns are unavailable".dimmed()
        ),
    }
}

fn display_top_commands_table(report: &AnalysisResult) {
    let max = report.top_commands.first().map(|c| c.count).unwrap_or(0);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Command").fg(Color::Cyan),
            Cell::new("Count").fg(Color::Cyan),
            Cell::new("Share").fg(Color::Cyan),
            Cell::new("").fg(Color::Cyan),
        ]);

    for (i, command) in report.top_commands.iter().enumerate() {
        let name_color = if i == 0 { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&command.command).fg(name_color),
            Cell::new(format_number(command.count)).fg(Color::Magenta),
            Cell::new(format!("{:.1}%", command.percentage)).fg(Color::Yellow),
            Cell::new(render_bar(command.count, max, 20)).fg(Color::Blue),
        ]);
    }

    println!("{table}");
}

fn display_time_patterns(report: &AnalysisResult) {
    let max_hour = report.time_patterns.iter().map(|p| p.count).max().unwrap_or(0);
    for pattern in &report.time_patterns {
        let label = format!("{:>5}", format_hour(pattern.hour));
        let bar = render_bar(pattern.count, max_hour, BAR_WIDTH);
        let bar = if pattern.hour == report.peak_hour && pattern.count > 0 {
            bar.bright_green().bold()
        } else {
            bar.cyan()
        };
        println!("  {} {} {}", label.dimmed(), bar, pattern.count);
    }
    println!();

    let max_day = report.day_patterns.iter().map(|p| p.count).max().unwrap_or(0);
    for pattern in &report.day_patterns {
        let bar = render_bar(pattern.count, max_day, BAR_WIDTH);
        let bar = if pattern.day_name == report.peak_day && pattern.count > 0 {
            bar.bright_green().bold()
        } else {
            bar.magenta()
        };
        println!("  {:<9} {} {}", pattern.day_name.dimmed(), bar, pattern.count);
    }
}

fn display_struggles(report: &AnalysisResult) {
    for struggle in &report.struggles {
        let icon = match struggle.kind {
            StruggleKind::RageSudo => "🔒",
            StruggleKind::Typo => "⌨️ ",
            StruggleKind::RepeatedFailure => "🔁",
            StruggleKind::ManPageCheck => "📖",
        };
        println!("  {} {}", icon, struggle.description.bright_white());
    }
}

fn display_git_stats(git: &GitStats) {
    println!(
        "  ✅ Commits: {}  │  ⬆️  Pushes: {}  │  ⬇️  Pulls: {}",
        git.total_commits.to_string().bright_green().bold(),
        git.total_pushes.to_string().bright_blue().bold(),
        git.total_pulls.to_string().bright_cyan().bold()
    );
    println!(
        "  🌱 Branches: {}  │  🔀 Merges: {}  │  ♻️  Rebases: {}  │  📥 Stashes: {}",
        git.branches, git.merges, git.rebases, git.stashes
    );
    println!(
        "  ⭐ Favourite: {}",
        git.most_used_git_command.bright_yellow().bold()
    );
}

fn display_package_managers(report: &AnalysisResult) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Manager").fg(Color::Cyan),
            Cell::new("Count").fg(Color::Cyan),
            Cell::new("Share").fg(Color::Cyan),
        ]);

    for stats in &report.package_managers {
        table.add_row(vec![
            Cell::new(&stats.manager),
            Cell::new(format_number(stats.count)).fg(Color::Magenta),
            Cell::new(format!("{:.1}%", stats.percentage)).fg(Color::Yellow),
        ]);
    }
    println!("{table}");

    let loyalty = report.package_manager_loyalty();
    if let (true, Some(manager)) = (loyalty.is_loyal, loyalty.manager.as_deref()) {
        println!(
            "  💍 Loyal to {} ({:.0}% of installs)",
            manager.bright_green().bold(),
            loyalty.percentage
        );
    }
}

/// Horizontal bar scaled so that `max` fills `width` cells
pub fn render_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::HistoryAnalyzer;
    use crate::models::HistoryEntry;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(0, 10, 20), "");
        assert_eq!(render_bar(5, 0, 20), "");
        assert_eq!(render_bar(10, 10, 20).chars().count(), 20);
        assert_eq!(render_bar(5, 10, 20).chars().count(), 10);
        // tiny counts still show up
        assert_eq!(render_bar(1, 1000, 20).chars().count(), 1);
    }

    #[test]
    fn test_json_report_is_flat() {
        let entries = vec![HistoryEntry::new(
            "git push",
            DateTime::from_timestamp(1704067200, 0),
            "git push",
        )];
        let report = HistoryAnalyzer::default().analyze_entries_in(&entries, &Utc);
        let context = ReportContext {
            shell: Shell::Zsh,
            source: "/home/u/.zsh_history".to_string(),
            year: Some(2024),
        };
        let value = serde_json::to_value(JsonReport {
            context: &context,
            analysis: &report,
        })
        .unwrap();

        assert_eq!(value["shell"], "zsh");
        assert_eq!(value["year"], 2024);
        assert_eq!(value["total_commands"], 1);
        assert_eq!(value["git_stats"]["total_pushes"], 1);
        assert_eq!(value["most_active_date"]["date"], "2024-01-01");
        assert!(value.get("longest_command").is_none());
    }
}

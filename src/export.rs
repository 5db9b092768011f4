use crate::helpers::format_hour;
use crate::models::AnalysisResult;
use crate::package_managers::primary_package_manager;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn export_commands_to_csv(report: &AnalysisResult, path: &Path) -> Result<()> {
    write_commands(report, File::create(path)?)
}

pub fn export_summary_to_csv(report: &AnalysisResult, path: &Path) -> Result<()> {
    write_summary(report, File::create(path)?)
}

fn write_commands<W: Write>(report: &AnalysisResult, out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(["Rank", "Command", "Count", "Percentage"])?;

    for (i, command) in report.top_commands.iter().enumerate() {
        wtr.write_record(&[
            (i + 1).to_string(),
            command.command.clone(),
            command.count.to_string(),
            format!("{:.2}", command.percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_summary<W: Write>(report: &AnalysisResult, out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(["Metric", "Value"])?;

    wtr.write_record(["Total Commands", &report.total_commands.to_string()])?;
    wtr.write_record(["Unique Commands", &report.unique_commands.to_string()])?;
    wtr.write_record([
        "Longest Command Length",
        &report.longest_command_length.to_string(),
    ])?;
    wtr.write_record(["Peak Hour", &format_hour(report.peak_hour)])?;
    wtr.write_record(["Peak Day", &report.peak_day])?;

    if let Some(active) = &report.most_active_date {
        wtr.write_record(["Most Active Date", &active.date.to_string()])?;
        wtr.write_record(["Most Active Date Commands", &active.count.to_string()])?;
    }
    if let Some(range) = &report.date_range {
        wtr.write_record(["First Command", &range.start.to_rfc3339()])?;
        wtr.write_record(["Last Command", &range.end.to_rfc3339()])?;
    }

    // Git summary
    if let Some(git) = &report.git_stats {
        wtr.write_record(["Git Commits", &git.total_commits.to_string()])?;
        wtr.write_record(["Git Pushes", &git.total_pushes.to_string()])?;
        wtr.write_record(["Git Pulls", &git.total_pulls.to_string()])?;
        wtr.write_record(["Most Used Git Command", &git.most_used_git_command])?;
    }

    if let Some(primary) = primary_package_manager(&report.package_managers) {
        wtr.write_record(["Primary Package Manager", primary])?;
    }

    for struggle in &report.struggles {
        wtr.write_record([&format!("Struggle: {}", struggle.kind), &struggle.count.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

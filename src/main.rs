//! cli-wrapped - Your year in the terminal
//!
//! Parses zsh, bash or fish history and reports favourite commands, coding
//! hours, struggles, git habits and package manager loyalty.

// Module declarations
mod analyzer;
mod bash_parser;
mod classifier;
mod commands;
mod config;
mod display;
mod environment;
mod error;
mod export;
mod fish_parser;
mod git_stats;
mod helpers;
mod loader;
mod logging;
mod models;
mod package_managers;
mod parser;
mod patterns;
mod struggles;
mod zsh_parser;

use analyzer::HistoryAnalyzer;
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use config::{Config, OutputFormat};
use display::{
    ReportContext, display_report_enhanced, display_report_json, print_error, print_info,
    print_warning,
};
use environment::Environment;
use error::HistoryError;
use export::{export_commands_to_csv, export_summary_to_csv};
use loader::{HistoryLoader, LoadOptions, filter_by_year, parse_year};
use models::{AnalysisResult, Shell};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShellArg {
    /// Zsh extended history (~/.zsh_history)
    Zsh,
    /// Bash history (~/.bash_history)
    Bash,
    /// Fish history (~/.local/share/fish/fish_history)
    Fish,
}

#[derive(Parser)]
#[command(name = "cli-wrapped")]
#[command(about = "Your year in the terminal - stats and habits from your shell history")]
#[command(version)]
#[command(
    long_about = "cli-wrapped reads your shell history (zsh, bash or fish) and summarises a year of terminal use: top commands, busiest hours, typos and retries, git habits and package managers.

EXAMPLES:
  cli-wrapped                          # This year, auto-detected shell
  cli-wrapped --year 2024              # A specific year
  cli-wrapped --all-time --json        # Everything, as JSON
  cli-wrapped --shell fish             # Force a shell
  cli-wrapped --file ~/old.zsh_history # Analyse a specific file
  cli-wrapped export -o wrapped        # Write wrapped_commands.csv and wrapped_summary.csv
  cli-wrapped config --show            # View current configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(
        long,
        value_enum,
        help = "Shell whose history to read",
        long_help = "Shell whose history to read (zsh, bash or fish)\nDefault: detected from $SHELL, falling back to zsh on macOS and bash elsewhere"
    )]
    shell: Option<ShellArg>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Path to a history file",
        long_help = "Read this history file instead of the default location\nThe shell is inferred from the file name unless --shell is given"
    )]
    file: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "YYYY",
        help = "Year to analyse (default: current year)",
        long_help = "Only analyse commands from this calendar year (local time)\nIf nothing in the history is dated within the year, the whole history is used"
    )]
    year: Option<String>,

    #[arg(long, conflicts_with = "year", help = "Analyse the whole history")]
    all_time: bool,

    #[arg(short, long, help = "Output in JSON format")]
    json: bool,

    #[arg(long, value_name = "N", help = "Number of top commands to show")]
    top: Option<usize>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the report to CSV files
    Export {
        #[arg(short, long, default_value = "cli-wrapped", help = "Output file prefix")]
        output: String,
        #[arg(long, help = "Export top commands only")]
        commands: bool,
        #[arg(long, help = "Export summary only")]
        summary: bool,
    },
    /// Show or change configuration
    Config {
        #[arg(long, help = "Show current configuration")]
        show: bool,
        #[arg(long, help = "Reset configuration to defaults")]
        reset: bool,
        #[arg(long, value_enum, value_name = "SHELL", help = "Set the default shell")]
        set_shell: Option<ShellArg>,
        #[arg(long, value_name = "PATH", help = "Set a custom history file path")]
        set_path: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<HistoryError>() {
            Some(history_error) => print_error(&history_error.detailed_message()),
            None => print_error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

/// Main application logic
fn run() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init_logging(cli.verbose, config.log_format);
    if let Some(e) = config_error {
        print_warning(&format!("Ignoring unreadable config: {:#}", e));
    }

    // Handle configuration commands first
    if let Some(Commands::Config {
        show,
        reset,
        set_shell,
        set_path,
    }) = &cli.command
    {
        return handle_config_command(&mut config, *show, *reset, *set_shell, set_path.clone());
    }

    let env = Environment::from_process();
    let loader = HistoryLoader::new(env).with_zsh_session_min_bytes(config.zsh_session_min_bytes);
    let options = LoadOptions {
        shell: cli.shell.map(convert_shell).or(config.default_shell),
        file_path: cli.file.clone().or_else(|| config.history_path.clone()),
    };
    let history = loader.load(&options)?;

    if history.is_empty() {
        print_warning(&format!("No commands found in {}", history.source));
        return Ok(());
    }

    let year = if cli.all_time {
        None
    } else {
        match &cli.year {
            Some(input) => Some(parse_year(input)?),
            None => Some(Local::now().year()),
        }
    };

    let as_json = cli.json || config.output_format == OutputFormat::Json;
    let (target, year) = match year {
        Some(year) => {
            let filtered = filter_by_year(&history, year);
            if filtered.is_empty() {
                let note = format!("Using all history (no timestamps for {})", year);
                if as_json {
                    info!("{}", note);
                } else {
                    print_info(&note);
                }
                (history, None)
            } else {
                debug!(
                    kept = filtered.entries.len(),
                    total = history.entries.len(),
                    "filtered history by year"
                );
                (filtered, Some(year))
            }
        }
        None => (history, None),
    };

    let top = cli.top.unwrap_or(config.top_commands_limit);
    if top == 0 {
        return Err(HistoryError::config_error("the top commands limit must be at least 1").into());
    }
    let analyzer = HistoryAnalyzer::new(top);
    let report = analyzer.analyze(&target);
    let context = ReportContext {
        shell: target.shell,
        source: target.source.to_string(),
        year,
    };

    if let Some(Commands::Export {
        output,
        commands,
        summary,
    }) = &cli.command
    {
        return handle_export_command(&report, output, *commands, *summary);
    }

    if as_json {
        display_report_json(&report, &context);
    } else {
        display_report_enhanced(&report, &context);
    }

    Ok(())
}

fn convert_shell(shell: ShellArg) -> Shell {
    match shell {
        ShellArg::Zsh => Shell::Zsh,
        ShellArg::Bash => Shell::Bash,
        ShellArg::Fish => Shell::Fish,
    }
}

fn handle_config_command(
    config: &mut Config,
    show: bool,
    reset: bool,
    set_shell: Option<ShellArg>,
    set_path: Option<PathBuf>,
) -> Result<()> {
    if reset {
        *config = Config::default();
        config.save()?;
        print_info("Configuration reset to defaults");
        return Ok(());
    }

    let mut changed = false;
    if let Some(shell) = set_shell {
        config.set_default_shell(convert_shell(shell));
        changed = true;
    }
    if let Some(path) = set_path {
        if !path.is_file() {
            print_warning(&format!("{} does not exist yet", path.display()));
        }
        config.set_history_path(path);
        changed = true;
    }
    if changed {
        config.save()?;
        print_info(&format!("Configuration saved to {}", Config::config_path()?.display()));
    }

    if show || !changed {
        println!("Configuration file: {}", Config::config_path()?.display());
        print!("{}", serde_yaml::to_string(config)?);
    }

    Ok(())
}

fn handle_export_command(
    report: &AnalysisResult,
    output: &str,
    commands: bool,
    summary: bool,
) -> Result<()> {
    // neither flag means both files
    let (commands, summary) = if !commands && !summary {
        (true, true)
    } else {
        (commands, summary)
    };

    if commands {
        let path = PathBuf::from(format!("{}_commands.csv", output));
        export_commands_to_csv(report, &path)?;
        print_info(&format!("Top commands exported to {}", path.display()));
    }
    if summary {
        let path = PathBuf::from(format!("{}_summary.csv", output));
        export_summary_to_csv(report, &path)?;
        print_info(&format!("Summary exported to {}", path.display()));
    }

    Ok(())
}

mod plan;
#[cfg(feature = "tui")]
mod tui;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use daymark_core::{allocate, Clock, TimeWindow};
use time::OffsetDateTime;

use crate::plan::DisplayRow;

/// Spread commits across a working window, proportional to lines changed,
/// then rewrite history so they carry the new timestamps.
#[derive(Parser)]
#[command(
    name = "daymark",
    version,
    about = "Spread a day's git commits across a chosen time window"
)]
struct Cli {
    /// Rewrite every commit from this ancestor ref to HEAD instead of
    /// today's commits
    #[arg(long)]
    from: Option<String>,
    /// Window start (HH:MM); together with --end this skips the interactive
    /// form
    #[arg(long)]
    start: Option<String>,
    /// Window end (HH:MM)
    #[arg(long)]
    end: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
    /// Print the planned timeline and exit without rewriting
    #[arg(long)]
    dry_run: bool,
    /// Print the plan as JSON and exit without rewriting
    #[arg(long)]
    json: bool,
    /// Repository path (defaults to the current directory)
    #[arg(long)]
    repo: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let repo = match cli.repo.clone() {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    let commits = match &cli.from {
        Some(ancestor) => daymark_git::collect_from_ancestor(&repo, ancestor)?,
        None => daymark_git::collect_today(&repo, now)?,
    };
    if commits.is_empty() {
        println!("No commits found.");
        return Ok(());
    }

    let (rows, total_effort) = plan::display_rows(&commits);
    let Some((start_raw, end_raw)) = resolve_window_input(&cli, &rows, total_effort, now)? else {
        println!("Cancelled.");
        return Ok(());
    };
    let start = Clock::parse(&start_raw)?;
    let end = Clock::parse(&end_raw)?;
    let window = TimeWindow::for_day(now, start, end)?;

    let efforts: Vec<i64> = commits.iter().map(|c| c.effort).collect();
    let times = allocate(&window, &efforts)?;

    if cli.json {
        println!("{}", plan::to_json(&commits, &times, &window)?);
        return Ok(());
    }
    print!("{}", plan::preview(&commits, &times, window.start()));
    if cli.dry_run {
        return Ok(());
    }
    if !cli.yes && !prompt_confirm()? {
        println!("Cancelled.");
        return Ok(());
    }

    let hashes: Vec<String> = commits.iter().map(|c| c.hash.clone()).collect();
    daymark_git::rewrite_history(&repo, &hashes, &times)?;
    println!("Rebase completed.");
    Ok(())
}

/// Start/end clocks from the flags when both are present, otherwise from the
/// interactive review. `None` means the user cancelled.
fn resolve_window_input(
    cli: &Cli,
    rows: &[DisplayRow],
    total_effort: i64,
    now: OffsetDateTime,
) -> anyhow::Result<Option<(String, String)>> {
    if let (Some(start), Some(end)) = (&cli.start, &cli.end) {
        return Ok(Some((start.clone(), end.clone())));
    }

    #[cfg(feature = "tui")]
    {
        let start_default = cli.start.clone().unwrap_or_default();
        let end_default = cli.end.clone().unwrap_or_else(|| clock_stamp(now));
        match tui::review(rows, total_effort, start_default, end_default)? {
            Some(outcome) if outcome.confirm => Ok(Some((outcome.start, outcome.end))),
            _ => Ok(None),
        }
    }

    #[cfg(not(feature = "tui"))]
    {
        let _ = (rows, total_effort, now);
        anyhow::bail!("--start and --end are required (built without the tui feature)");
    }
}

#[cfg(feature = "tui")]
fn clock_stamp(now: OffsetDateTime) -> String {
    now.format(&time::macros::format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| String::from("17:00"))
}

fn prompt_confirm() -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    loop {
        print!("Rewrite git history with these times? [y/N]: ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            return Ok(false);
        }
        match input.trim().to_lowercase().as_str() {
            "" | "n" | "no" => return Ok(false),
            "y" | "yes" => return Ok(true),
            _ => {}
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("DAYMARK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

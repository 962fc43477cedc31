use std::path::{Path, PathBuf};

use colored::*;
use dirs::home_dir;
use ticketlens_core::serde_utils::to_pretty_json;
use ticketlens_core::{ConfigError, TicketLensError};
use ticketlens_engine::{
    AnalysisRun, CountEntry, EngineError, FetchError, HistoryEntry, PromptArtefacts,
    PromptResult, ReportError, ReportStatus, TicketSummary,
};
use ticketlens_filter::FilterSpec;
use ticketlens_protocol::ticket::TicketCollection;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] TicketLensError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("could not set up the ticket client: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not set up the report client: {0}")]
    Report(#[from] ReportError),
    #[error("could not locate the home directory; pass --history-file")]
    NoHomeDir,
}

/// `~/.ticketlens/history.json`
pub fn default_history_path() -> Result<PathBuf, CliError> {
    let mut path = home_dir().ok_or(CliError::NoHomeDir)?;
    path.push(".ticketlens");
    path.push("history.json");
    Ok(path)
}

pub fn print_dataset(run: &AnalysisRun) {
    match &run.dataset.fetch_error {
        Some(reason) => {
            println!(
                "{} {}",
                "✘ Ticket fetch failed:".red().bold(),
                reason
            );
            println!("  Continuing with an empty dataset.");
        }
        None => println!(
            "{} {} tickets",
            "✔ Dataset loaded:".green().bold(),
            run.dataset.tickets.len().to_string().bold()
        ),
    }
}

pub fn print_records(title: &str, tickets: &TicketCollection) -> Result<(), CliError> {
    println!("{}", title.bold());
    println!("{}", to_pretty_json(&tickets.records_json())?);
    Ok(())
}

pub fn print_spec(spec: &FilterSpec) -> Result<(), CliError> {
    println!("{}", to_pretty_json(spec)?);
    Ok(())
}

pub fn print_prompt_result(result: &PromptResult) {
    println!();
    println!(
        "{} {}",
        format!("▶ Prompt #{}:", result.number).cyan().bold(),
        result.prompt
    );
    println!("  Filters: {}", result.spec.describe());
    for warning in &result.outcome.warnings {
        println!("  {} {}", "⚠".yellow().bold(), warning);
    }
    println!(
        "  Matched: {} tickets",
        result.outcome.tickets.len().to_string().bold()
    );

    print_summary(&result.summary);
    print_report(&result.report);
}

fn print_summary(summary: &TicketSummary) {
    if summary.total == 0 {
        return;
    }
    if let Some(top) = summary.most_raised_category() {
        println!(
            "  Most raised category: {} ({} tickets)",
            top.label.bold(),
            top.count
        );
    }
    if let (Some(first), Some(last)) = (summary.daily.first(), summary.daily.last()) {
        println!(
            "  Period: {} to {} ({} days with tickets)",
            first.date,
            last.date,
            summary.daily.len()
        );
    }
    print_counts("Categories", &summary.by_category);
    print_counts("Status", &summary.by_status);
    print_counts("Priority", &summary.by_priority);
    print_counts("Top customers", &summary.top_customers);
}

fn print_counts(heading: &str, entries: &[CountEntry]) {
    if entries.is_empty() {
        return;
    }
    println!("  {}", heading.underline());
    let width = entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        println!("    {:<width$}  {:>5}", entry.label, entry.count, width = width);
    }
}

fn print_report(report: &ReportStatus) {
    match report {
        ReportStatus::Generated { text } => {
            println!("  {}", "Report".green().bold());
            for line in text.lines() {
                println!("    {line}");
            }
        }
        ReportStatus::Failed { reason } => {
            println!(
                "  {} {}",
                "✘ Report generation failed:".red().bold(),
                reason
            );
        }
    }
}

pub fn print_artefacts(artefacts: &PromptArtefacts) {
    for path in &artefacts.charts {
        print_path("Chart", path);
    }
    if let Some(path) = &artefacts.document {
        print_path("Report document", path);
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", format!("{label}:").dimmed(), path.display());
}

pub fn print_history(entries: &[(usize, &HistoryEntry)]) {
    if entries.is_empty() {
        println!("No prompts recorded yet.");
        return;
    }
    for (number, entry) in entries {
        let matched = entry
            .matched
            .map(|count| format!(" ({count} matched)"))
            .unwrap_or_default();
        println!(
            "{:>4}  {}  {}{}",
            number.to_string().bold(),
            entry.submitted_at.format("%Y-%m-%d %H:%M"),
            entry.prompt,
            matched.dimmed()
        );
    }
}

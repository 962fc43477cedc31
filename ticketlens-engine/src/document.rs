use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::pipeline::{PromptResult, ReportStatus};
use crate::summary::CountEntry;

/// Downloadable per-prompt report, rendered as Markdown.
pub struct ReportDocument<'a> {
    result: &'a PromptResult,
    generated_at: DateTime<Utc>,
}

impl<'a> ReportDocument<'a> {
    pub fn new(result: &'a PromptResult) -> Self {
        Self {
            result,
            generated_at: Utc::now(),
        }
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// `report-<n>-<slug>.md`
    pub fn file_name(&self) -> String {
        format!(
            "report-{}-{}.md",
            self.result.number,
            slugify(&self.result.prompt)
        )
    }

    pub fn render(&self) -> String {
        let result = self.result;
        let summary = &result.summary;
        let mut out = String::new();

        let _ = writeln!(out, "# Ticket Report #{}", result.number);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "_Generated {}_",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "**Prompt:** {}", result.prompt);
        let _ = writeln!(out);
        let _ = writeln!(out, "**Filters:** {}", result.spec.describe());
        let _ = writeln!(out);

        if !result.outcome.warnings.is_empty() {
            let _ = writeln!(out, "## Warnings");
            let _ = writeln!(out);
            for warning in &result.outcome.warnings {
                let _ = writeln!(out, "- {warning}");
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## Overview");
        let _ = writeln!(out);
        let _ = writeln!(out, "- Matching tickets: {}", summary.total);
        if let Some(top) = summary.most_raised_category() {
            let _ = writeln!(
                out,
                "- Most raised category: {} ({} tickets)",
                top.label, top.count
            );
        }
        if let (Some(first), Some(last)) = (summary.daily.first(), summary.daily.last()) {
            let _ = writeln!(out, "- Period: {} to {}", first.date, last.date);
        }
        let _ = writeln!(out);

        write_table(&mut out, "Status", &summary.by_status);
        write_table(&mut out, "Priority", &summary.by_priority);
        write_table(&mut out, "Top customers", &summary.top_customers);

        let _ = writeln!(out, "## Report");
        let _ = writeln!(out);
        match &result.report {
            ReportStatus::Generated { text } => {
                let _ = writeln!(out, "{}", text.trim_end());
            }
            ReportStatus::Failed { reason } => {
                let _ = writeln!(out, "> Report generation failed: {reason}");
            }
        }

        out
    }
}

fn write_table(out: &mut String, heading: &str, entries: &[CountEntry]) {
    if entries.is_empty() {
        return;
    }
    let _ = writeln!(out, "### {heading}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Value | Tickets |");
    let _ = writeln!(out, "| --- | ---: |");
    for entry in entries {
        let _ = writeln!(out, "| {} | {} |", entry.label.replace('|', "\\|"), entry.count);
    }
    let _ = writeln!(out);
}

/// Lowercase ASCII slug of a prompt, capped so file names stay short.
pub fn slugify(value: &str) -> String {
    const MAX_LEN: usize = 48;

    let mut result = String::new();
    let mut previous_hyphen = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            previous_hyphen = false;
        } else if !previous_hyphen && !result.is_empty() {
            result.push('-');
            previous_hyphen = true;
        }
        if result.len() >= MAX_LEN {
            break;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "prompt".to_string()
    } else {
        result
    }
}

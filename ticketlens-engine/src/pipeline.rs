use chrono::{NaiveDate, Utc};
use serde::Serialize;
use ticketlens_filter::{parse_prompt, FilterEngine, FilterOutcome, FilterSpec};
use ticketlens_protocol::ticket::TicketCollection;
use tracing::{info, info_span, warn, Instrument};

use crate::error::EngineError;
use crate::prompts::clean;
use crate::report_client::{ReportDetail, ReportGenerator, ReportRequest};
use crate::summary::TicketSummary;
use crate::ticket_client::TicketSource;

/// Upper bound on prompts accepted by one run.
pub const MAX_PROMPTS: usize = 5;

/// Working set for one run. A failed fetch leaves it empty and keeps the
/// reason so it can be shown.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub tickets: TicketCollection,
    pub fetch_error: Option<String>,
}

impl Dataset {
    pub fn is_degraded(&self) -> bool {
        self.fetch_error.is_some()
    }
}

/// What happened to the report of one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    Generated { text: String },
    /// Error card: the generator failed for this prompt only.
    Failed { reason: String },
}

impl ReportStatus {
    pub fn text(&self) -> Option<&str> {
        match self {
            ReportStatus::Generated { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ReportStatus::Generated { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PromptResult {
    /// 1-based position of the prompt in the run.
    pub number: usize,
    pub prompt: String,
    pub spec: FilterSpec,
    pub outcome: FilterOutcome,
    pub summary: TicketSummary,
    pub report: ReportStatus,
}

#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub dataset: Dataset,
    pub results: Vec<PromptResult>,
}

/// Fetch once, then parse, filter, summarise and report each prompt in turn.
pub struct AnalysisPipeline<S, R> {
    source: S,
    reporter: R,
    engine: FilterEngine,
    detail: ReportDetail,
    today: Option<NaiveDate>,
}

impl<S, R> AnalysisPipeline<S, R>
where
    S: TicketSource,
    R: ReportGenerator,
{
    pub fn new(source: S, reporter: R) -> Self {
        Self {
            source,
            reporter,
            engine: FilterEngine::new(),
            detail: ReportDetail::default(),
            today: None,
        }
    }

    pub fn with_detail(mut self, detail: ReportDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Pins "today" for the six-month window instead of the UTC clock.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn detail(&self) -> ReportDetail {
        self.detail
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Checks prompt count before any network traffic, then runs them all
    /// against a single fetch.
    pub async fn run(&self, prompts: &[String]) -> Result<AnalysisRun, EngineError> {
        let prompts = validate_prompts(prompts)?;
        let dataset = self.load_dataset().await;

        let mut results = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            let number = index + 1;
            let result = self
                .analyze_prompt(number, prompt, &dataset.tickets)
                .instrument(info_span!("prompt", number))
                .await;
            results.push(result);
        }

        Ok(AnalysisRun { dataset, results })
    }

    pub async fn load_dataset(&self) -> Dataset {
        match self.source.fetch_tickets().await {
            Ok(tickets) => Dataset {
                tickets,
                fetch_error: None,
            },
            Err(err) => {
                warn!(error = %err, "ticket fetch failed, continuing with an empty dataset");
                Dataset {
                    tickets: TicketCollection::empty(),
                    fetch_error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn analyze_prompt(
        &self,
        number: usize,
        prompt: &str,
        tickets: &TicketCollection,
    ) -> PromptResult {
        let spec = parse_prompt(prompt);
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let outcome = self.engine.apply_at(tickets, &spec, today);
        info!(
            filters = %spec.describe(),
            matched = outcome.tickets.len(),
            total = tickets.len(),
            "prompt filtered"
        );

        let summary = TicketSummary::from_tickets(&outcome.tickets);
        let report = self.report(prompt, &outcome.tickets).await;

        PromptResult {
            number,
            prompt: prompt.to_string(),
            spec,
            outcome,
            summary,
            report,
        }
    }

    /// One generator call per prompt, including prompts that matched nothing.
    async fn report(&self, prompt: &str, tickets: &TicketCollection) -> ReportStatus {
        let request = match ReportRequest::build(prompt, tickets, self.detail) {
            Ok(request) => request,
            Err(err) => {
                return ReportStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        match self.reporter.generate(&request).await {
            Ok(text) => ReportStatus::Generated { text },
            Err(err) => {
                warn!(error = %err, "report generation failed");
                ReportStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Drops blank prompts and enforces the 1..=MAX_PROMPTS bound.
pub fn validate_prompts(prompts: &[String]) -> Result<Vec<String>, EngineError> {
    let prompts = clean(prompts.iter().cloned());
    if prompts.is_empty() {
        return Err(EngineError::NoPrompts);
    }
    if prompts.len() > MAX_PROMPTS {
        return Err(EngineError::TooManyPrompts {
            given: prompts.len(),
            max: MAX_PROMPTS,
        });
    }
    Ok(prompts)
}

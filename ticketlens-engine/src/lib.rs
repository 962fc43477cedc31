//! TicketLens engine - fetches tickets, runs prompt filters and produces
//! per-prompt summaries, charts and reports.

pub mod charts;
pub mod document;
pub mod error;
pub mod export;
pub mod history;
pub mod pipeline;
pub mod prompts;
pub mod report_client;
pub mod summary;
pub mod ticket_client;

pub use charts::{ChartError, ChartKind, ChartRenderer};
pub use document::{slugify, ReportDocument};
pub use error::EngineError;
pub use export::{ArtefactExporter, PromptArtefacts};
pub use history::{HistoryEntry, HistoryStore, PromptHistory};
pub use pipeline::{
    validate_prompts, AnalysisPipeline, AnalysisRun, Dataset, PromptResult, ReportStatus,
    MAX_PROMPTS,
};
pub use prompts::load_prompts;
pub use report_client::{
    OpenAiReportClient, ReportDetail, ReportError, ReportGenerator, ReportRequest,
    SYSTEM_INSTRUCTION,
};
pub use summary::{value_counts, CountEntry, DailyCount, TicketSummary};
pub use ticket_client::{fetch_request, FetchError, TicketApiClient, TicketSource};

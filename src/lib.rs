//! TicketLens: prompt-driven analytics over customer-support tickets
//!
//! TicketLens fetches the ticket list once, turns each free-text prompt into a
//! structured filter, narrows the tickets with it and asks a language model for
//! a written report on every filtered subset.
//!
//! # Architecture
//!
//! The system is split into several crates:
//!
//! * `core`: configuration, logging and the shared error type
//! * `protocol`: ticket records, upstream request/response shapes and dates
//! * `filter`: prompt parser and filter engine
//! * `engine`: HTTP collaborators, summaries, charts, documents and the
//!   analysis pipeline

// Member crates
pub use ticketlens_core as core;
pub use ticketlens_engine as engine;
pub use ticketlens_filter as filter;
pub use ticketlens_protocol as protocol;

// Commonly used symbols
pub use ticketlens_core::{TicketLensConfig, TicketLensError};
pub use ticketlens_engine::{AnalysisPipeline, AnalysisRun, PromptResult, ReportStatus};
pub use ticketlens_filter::{filter_tickets, parse_prompt, FilterOutcome, FilterSpec};
pub use ticketlens_protocol::ticket::{Ticket, TicketCollection, TicketField};

/// Maximum number of prompts analysed in one run.
pub const MAX_PROMPTS: usize = ticketlens_engine::MAX_PROMPTS;

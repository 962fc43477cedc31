//! Prompt-driven ticket filtering for TicketLens.
//!
//! A free-text prompt is parsed into a [`FilterSpec`] by matching a small set
//! of keyword patterns, and the [`FilterEngine`] narrows a ticket collection
//! with it. Neither step fails: unmatched phrases leave dimensions unset and
//! dimensions that cannot be evaluated come back as [`FilterWarning`]s next
//! to the best-effort result.

mod dimension;
mod engine;
mod error;
mod outcome;
mod parser;
mod spec;

pub use dimension::FilterDimension;
pub use engine::{filter_tickets, FilterEngine, RECENT_WINDOW_MONTHS};
pub use error::{DateBound, FilterWarning};
pub use outcome::FilterOutcome;
pub use parser::parse_prompt;
pub use spec::FilterSpec;

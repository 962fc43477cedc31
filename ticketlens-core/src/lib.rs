//! Core shared library for the TicketLens workspace.
//!
//! This crate exposes the primitives every other member depends on:
//! configuration loading, the canonical error types, logging setup and
//! JSON helpers.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;

pub use config::{ReportConfig, TicketLensConfig, TicketSourceConfig};
pub use errors::{ConfigError, Result as CoreResult, TicketLensError};

use std::path::PathBuf;

use thiserror::Error;

use crate::charts::ChartError;

/// Errors that abort an analysis run or one of its side tasks. Fetch and
/// report failures are not listed here: they degrade the run instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no prompts given")]
    NoPrompts,
    #[error("too many prompts: {given} given, at most {max} allowed")]
    TooManyPrompts { given: usize, max: usize },
    #[error("prompts file does not exist: {0}")]
    MissingPromptsFile(String),
    #[error("failed to parse prompts from {path}: {message}")]
    Prompts { path: String, message: String },
    #[error("failed to access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("prompt history is corrupt: {0}")]
    History(String),
    #[error("no history entry #{0}")]
    UnknownHistoryEntry(usize),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl EngineError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn prompts_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        EngineError::Prompts {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }
}

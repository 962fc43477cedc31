use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;

const HISTORY_FILE_VERSION: u8 = 1;

/// One submitted prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub submitted_at: DateTime<Utc>,
    /// Tickets matched when the prompt ran, if it got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<usize>,
}

impl HistoryEntry {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            submitted_at: Utc::now(),
            matched: None,
        }
    }

    pub fn with_matched(mut self, matched: usize) -> Self {
        self.matched = Some(matched);
        self
    }
}

/// Append-only list of prompts in submission order. Entries are never
/// edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptHistory {
    entries: Vec<HistoryEntry>,
}

impl PromptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry by 1-based position, as shown to users.
    pub fn get(&self, number: usize) -> Option<&HistoryEntry> {
        number.checked_sub(1).and_then(|index| self.entries.get(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `limit` entries with their 1-based numbers, oldest first.
    pub fn latest(&self, limit: usize) -> Vec<(usize, &HistoryEntry)> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, entry)| (index + 1, entry))
            .collect()
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    version: u8,
    #[serde(flatten)]
    history: PromptHistory,
}

/// Prompt history persisted as a versioned JSON file.
pub struct HistoryStore {
    path: PathBuf,
    history: PromptHistory,
}

impl HistoryStore {
    /// Opens the store at `path`. A missing or empty file is an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        let history = if path.exists() {
            let contents = fs::read(&path).map_err(|err| EngineError::from_io(&path, err))?;
            if contents.is_empty() {
                PromptHistory::default()
            } else {
                let file: HistoryFile = serde_json::from_slice(&contents)
                    .map_err(|err| EngineError::History(format!("{}: {err}", path.display())))?;
                if file.version != HISTORY_FILE_VERSION {
                    return Err(EngineError::History(format!(
                        "unknown history file version {}",
                        file.version
                    )));
                }
                file.history
            }
        } else {
            PromptHistory::default()
        };

        debug!(path = %path.display(), entries = history.len(), "loaded prompt history");
        Ok(Self { path, history })
    }

    pub fn save(&self) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| EngineError::from_io(parent, err))?;
        }
        let file = HistoryFile {
            version: HISTORY_FILE_VERSION,
            history: self.history.clone(),
        };
        let serialized = serde_json::to_string_pretty(&file)
            .map_err(|err| EngineError::History(err.to_string()))?;
        fs::write(&self.path, serialized).map_err(|err| EngineError::from_io(&self.path, err))?;
        Ok(())
    }

    /// Records entries and writes the file.
    pub fn append(
        &mut self,
        entries: impl IntoIterator<Item = HistoryEntry>,
    ) -> Result<(), EngineError> {
        for entry in entries {
            self.history.push(entry);
        }
        self.save()
    }

    pub fn history(&self) -> &PromptHistory {
        &self.history
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

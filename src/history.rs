//! Bounded conversion history persisted as JSON.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::Result;
use crate::synth::ConvertedLink;

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// File name the history is stored under.
pub const HISTORY_FILE: &str = "history.json";

/// One successful conversion batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// First source URL, with a count suffix for multi-URL batches.
    pub original: String,
    /// First converted URL of the batch.
    pub converted: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    /// Summarize a converted batch. Returns `None` for an empty batch.
    pub fn from_batch(links: &[ConvertedLink]) -> Option<Self> {
        let first = links.first()?;
        let original = if links.len() > 1 {
            format!("{} (+{} more)", first.source, links.len() - 1)
        } else {
            first.source.clone()
        };
        Some(Self {
            original,
            converted: first.primary.clone(),
            timestamp: OffsetDateTime::now_utc(),
        })
    }
}

/// Newest-first list capped at [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// JSON file holding the history between runs.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store under the user's data directory, e.g.
    /// `~/.local/share/drive_embed/history.json`.
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("drive_embed").join(HISTORY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history. A missing file is an empty history.
    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            return Ok(History::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut history: History = serde_json::from_str(&content)?;
        history.entries.truncate(HISTORY_LIMIT);
        Ok(history)
    }

    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

//! Result records shown to the user.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::history::HistoryEntry;

/// An image saved to disk.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedAsset {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

impl fmt::Display for DownloadedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.path.display(),
            format_size(self.bytes),
            self.url
        )
    }
}

/// Timestamp layout of history rows.
const HISTORY_TIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Column header matching the `Display` layout of [`HistoryEntry`].
pub fn history_header() -> String {
    format!("{:<20} {:<60} {}", "WHEN", "ORIGINAL", "CONVERTED")
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let when = self
            .timestamp
            .format(HISTORY_TIME)
            .unwrap_or_else(|_| "-".to_string());
        write!(f, "{:<20} {:<60} {}", when, self.original, self.converted)
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

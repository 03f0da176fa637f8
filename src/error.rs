//! Error types for the drive_embed crate.

use thiserror::Error;

/// Errors that can occur while converting, previewing or exporting links.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Invalid Google Drive sharing URL: {0}")]
    InvalidUrlFormat(String),

    #[error("No URLs to convert")]
    EmptyInput,

    #[error("Failed to write to clipboard: {0}")]
    ClipboardWriteFailure(String),

    #[error("Failed to fetch {url}: {message}")]
    AssetFetchFailure { url: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Unknown engine variant: {0}")]
    UnknownVariant(String),

    #[error("Glob pattern error: {0}")]
    InvalidPattern(#[from] glob::PatternError),
}

impl EmbedError {
    /// The message shown to a user when this error ends an action.
    ///
    /// Extraction failures collapse into one generic message regardless of
    /// which line failed.
    pub fn user_message(&self) -> &'static str {
        match self {
            EmbedError::InvalidUrlFormat(_) => {
                "Invalid Google Drive URL format. Please check your input."
            }
            EmbedError::EmptyInput => "Please enter at least one Google Drive URL.",
            EmbedError::ClipboardWriteFailure(_) => "Failed to copy to clipboard.",
            EmbedError::AssetFetchFailure { .. } | EmbedError::Http(_) => {
                "Failed to load image."
            }
            _ => "Something went wrong.",
        }
    }
}

/// Result type alias for EmbedError.
pub type Result<T> = std::result::Result<T, EmbedError>;

//! drive_embed - Turn Google Drive sharing links into embeddable image URLs.
//!
//! This library provides functionality to:
//! - Extract file identifiers from Drive sharing links
//! - Build direct-view and thumbnail URLs from them
//! - Render the results as plain text, Markdown, HTML, JSON or CSV
//! - Keep a short history of conversions, preview and download the images
//!
//! # Example
//!
//! ```
//! use drive_embed::{convert_batch, render, OutputFormat, Variant};
//!
//! let links = convert_batch(
//!     "https://drive.google.com/file/d/XYZ789/view?usp=sharing",
//!     Variant::ExportView,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     render(&links, OutputFormat::Markdown, false),
//!     "![image](https://drive.google.com/uc?export=view&id=XYZ789)"
//! );
//! ```

pub mod clipboard;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod format;
pub mod history;
pub mod input;
pub mod logging;
pub mod models;
pub mod preview;
pub mod state;
pub mod synth;
pub mod url_parser;

// Re-exports for convenience
pub use config::Config;
pub use convert::convert_batch;
pub use error::{EmbedError, Result};
pub use fetch::AssetFetcher;
pub use format::{format_urls, render, OutputFormat};
pub use history::{History, HistoryEntry, HistoryStore};
pub use state::{AppState, Event, Outcome};
pub use synth::{ConvertedLink, Variant};
pub use url_parser::{extract_id, FileId, Strictness};

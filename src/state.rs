//! Application state and the events that change it.
//!
//! Everything a front end shows lives in [`AppState`]. A front end turns
//! user actions into [`Event`]s and hands them to [`AppState::apply`];
//! the conversion engine itself stays free of this state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::clipboard::ClipboardSink;
use crate::convert::convert_batch;
use crate::error::Result;
use crate::format::{export_filename, render, OutputFormat};
use crate::history::{History, HistoryEntry};
use crate::input::filter_pasted;
use crate::preview::{build_cards, PreviewCard};
use crate::synth::{ConvertedLink, Variant};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetInput(String),
    /// Pasted text; only lines mentioning the Drive domain are appended.
    Paste(String),
    Convert,
    SetFormat(OutputFormat),
    SetLabeled(bool),
    SetVariant(Variant),
    Clear,
    ClearHistory,
}

/// What an applied event changed, beyond the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    /// History changed and should be persisted.
    HistoryChanged,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub input: String,
    pub output: String,
    pub format: OutputFormat,
    pub labeled: bool,
    pub variant: Variant,
    pub converted: Vec<ConvertedLink>,
    pub previews: Vec<PreviewCard>,
    pub history: History,
    /// User-facing message from the last failed action.
    pub error: Option<String>,
}

impl AppState {
    pub fn new(history: History) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: Event) -> Result<Outcome> {
        match event {
            Event::SetInput(text) => {
                self.input = text;
                Ok(Outcome::Updated)
            }
            Event::Paste(text) => {
                let lines = filter_pasted(&text);
                if !lines.is_empty() {
                    if !self.input.is_empty() && !self.input.ends_with('\n') {
                        self.input.push('\n');
                    }
                    self.input.push_str(&lines.join("\n"));
                }
                Ok(Outcome::Updated)
            }
            Event::Convert => self.convert(),
            Event::SetFormat(format) => {
                self.format = format;
                self.rerender();
                Ok(Outcome::Updated)
            }
            Event::SetLabeled(labeled) => {
                self.labeled = labeled;
                self.rerender();
                Ok(Outcome::Updated)
            }
            Event::SetVariant(variant) => {
                self.variant = variant;
                for link in &mut self.converted {
                    link.select(variant);
                }
                self.rerender();
                Ok(Outcome::Updated)
            }
            Event::Clear => {
                self.input.clear();
                self.reset_output();
                self.error = None;
                Ok(Outcome::Updated)
            }
            Event::ClearHistory => {
                self.history.clear();
                Ok(Outcome::HistoryChanged)
            }
        }
    }

    fn convert(&mut self) -> Result<Outcome> {
        match convert_batch(&self.input, self.variant) {
            Ok(links) => {
                self.error = None;
                if let Some(entry) = HistoryEntry::from_batch(&links) {
                    self.history.record(entry);
                }
                self.converted = links;
                self.rerender();
                Ok(Outcome::HistoryChanged)
            }
            Err(err) => {
                warn!(error = %err, "conversion failed");
                self.error = Some(err.user_message().to_string());
                self.reset_output();
                Err(err)
            }
        }
    }

    fn rerender(&mut self) {
        self.output = render(&self.converted, self.format, self.labeled);
        self.previews = build_cards(&self.primary_urls());
    }

    fn reset_output(&mut self) {
        self.converted.clear();
        self.output.clear();
        self.previews.clear();
    }

    /// Copy the current output. Conversion state is untouched either way.
    pub fn copy_output(&mut self, clipboard: &mut dyn ClipboardSink) -> Result<()> {
        match clipboard.write_text(&self.output) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.error = Some(err.user_message().to_string());
                Err(err)
            }
        }
    }

    /// Write the current output to the format's fixed filename in `dir`.
    pub fn export<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(export_filename(self.format));
        fs::write(&path, &self.output)?;
        info!(path = %path.display(), format = %self.format, "exported output");
        Ok(path)
    }

    pub fn primary_urls(&self) -> Vec<String> {
        crate::format::primary_urls(&self.converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbedError;

    struct FailingClipboard;

    impl ClipboardSink for FailingClipboard {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Err(EmbedError::ClipboardWriteFailure("no display".to_string()))
        }
    }

    #[test]
    fn test_paste_appends_drive_lines_only() {
        let mut state = AppState::default();
        state
            .apply(Event::SetInput("https://drive.google.com/file/d/a/view".to_string()))
            .unwrap();
        state
            .apply(Event::Paste(
                "junk\nhttps://drive.google.com/file/d/b/view".to_string(),
            ))
            .unwrap();
        assert_eq!(
            state.input,
            "https://drive.google.com/file/d/a/view\nhttps://drive.google.com/file/d/b/view"
        );
    }

    #[test]
    fn test_format_switch_rerenders_without_reconverting() {
        let mut state = AppState::default();
        state
            .apply(Event::SetInput("https://drive.google.com/file/d/abc/view".to_string()))
            .unwrap();
        state.apply(Event::Convert).unwrap();
        state.input.clear();

        state.apply(Event::SetFormat(OutputFormat::Html)).unwrap();
        assert_eq!(
            state.output,
            "<img src=\"https://drive.google.com/uc?export=view&id=abc\" alt=\"image\" />"
        );
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_clipboard_failure_keeps_output() {
        let mut state = AppState::default();
        state
            .apply(Event::SetInput("https://drive.google.com/file/d/abc/view".to_string()))
            .unwrap();
        state.apply(Event::Convert).unwrap();

        let err = state.copy_output(&mut FailingClipboard).unwrap_err();
        assert!(matches!(err, EmbedError::ClipboardWriteFailure(_)));
        assert!(!state.output.is_empty());
        assert_eq!(state.converted.len(), 1);
    }

    #[test]
    fn test_variant_switch_repicks_converted_urls() {
        let mut state = AppState::default();
        state
            .apply(Event::SetInput("https://drive.google.com/file/d/abc/view".to_string()))
            .unwrap();
        state.apply(Event::Convert).unwrap();

        state.apply(Event::SetVariant(Variant::Thumbnail)).unwrap();
        assert_eq!(state.variant, Variant::Thumbnail);
        assert_eq!(state.output, "https://lh3.googleusercontent.com/d/abc");
        assert_eq!(state.converted[0].primary, state.converted[0].preview);
        assert_eq!(state.history.len(), 1);

        state.apply(Event::SetVariant(Variant::ExportView)).unwrap();
        assert_eq!(state.output, "https://drive.google.com/uc?export=view&id=abc");
    }
}

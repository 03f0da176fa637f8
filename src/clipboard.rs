//! Clipboard access for copying converted output.

use std::time::Duration;

use crate::error::{EmbedError, Result};

/// How long a copy keeps serving the clipboard when nothing else takes it.
pub const DEFAULT_HOLD: Duration = Duration::from_secs(30);

/// Destination for copied text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
///
/// On X11 and Wayland the copying process owns the selection, and it is
/// gone once the process exits. `write_text` therefore blocks until another
/// owner (usually a clipboard manager) takes the contents over, or until
/// the hold time runs out.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: Duration,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| EmbedError::ClipboardWriteFailure(e.to_string()))?;
        Ok(Self {
            inner,
            hold: DEFAULT_HOLD,
        })
    }

    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }
}

impl ClipboardSink for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let deadline = std::time::Instant::now() + self.hold;
        self.inner
            .set()
            .wait_until(deadline)
            .text(text.to_owned())
            .map_err(|e| EmbedError::ClipboardWriteFailure(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| EmbedError::ClipboardWriteFailure(e.to_string()))
    }
}

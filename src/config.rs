//! User configuration loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clipboard::DEFAULT_HOLD;
use crate::error::Result;
use crate::fetch::DEFAULT_CONCURRENCY;
use crate::format::OutputFormat;
use crate::history::HistoryStore;
use crate::synth::Variant;

/// Defaults for the command-line front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used when `--format` is not given.
    pub default_format: OutputFormat,
    /// Which URL form counts as the converted URL.
    pub variant: Variant,
    /// Emit labeled Preview/Direct blocks instead of bare URLs.
    pub labeled: bool,
    /// History file; the user data directory when unset.
    pub history_file: Option<PathBuf>,
    /// Where `download` saves images when `--to` is not given.
    pub download_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub max_concurrent_downloads: usize,
    /// How long `--copy` keeps serving the clipboard on X11/Wayland.
    pub clipboard_hold_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Plain,
            variant: Variant::ExportView,
            labeled: false,
            history_file: None,
            download_dir: None,
            request_timeout_secs: 30,
            max_concurrent_downloads: DEFAULT_CONCURRENCY,
            clipboard_hold_secs: DEFAULT_HOLD.as_secs(),
        }
    }
}

impl Config {
    /// `~/.config/drive_embed/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drive_embed").join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::info!("wrote config to {}", path.display());
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn clipboard_hold(&self) -> Duration {
        Duration::from_secs(self.clipboard_hold_secs)
    }

    pub fn history_store(&self) -> Option<HistoryStore> {
        match &self.history_file {
            Some(path) => Some(HistoryStore::new(path)),
            None => HistoryStore::default_location(),
        }
    }
}

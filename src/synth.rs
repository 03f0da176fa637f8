//! Canonical URL synthesis from a file identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::url_parser::FileId;

/// Direct-view endpoint on Google Drive.
const DIRECT_VIEW_BASE: &str = "https://drive.google.com/uc?export=view&id=";

/// Thumbnail host serving the image bytes directly.
const THUMBNAIL_BASE: &str = "https://lh3.googleusercontent.com/d/";

/// Kind of canonical URL synthesized for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    DirectView,
    Thumbnail,
}

/// Which URL form is treated as "the" converted URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `uc?export=view&id=<ID>`
    #[default]
    ExportView,
    /// `lh3.googleusercontent.com/d/<ID>`
    Thumbnail,
}

impl Variant {
    pub fn primary_kind(self) -> UrlKind {
        match self {
            Variant::ExportView => UrlKind::DirectView,
            Variant::Thumbnail => UrlKind::Thumbnail,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::ExportView => f.write_str("export-view"),
            Variant::Thumbnail => f.write_str("thumbnail"),
        }
    }
}

impl FromStr for Variant {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "export-view" | "export" | "uc" => Ok(Variant::ExportView),
            "thumbnail" | "lh3" => Ok(Variant::Thumbnail),
            other => Err(EmbedError::UnknownVariant(other.to_string())),
        }
    }
}

/// Build the canonical URL of the given kind.
pub fn canonical_url(id: &FileId, kind: UrlKind) -> String {
    match kind {
        UrlKind::DirectView => format!("{}{}", DIRECT_VIEW_BASE, id),
        UrlKind::Thumbnail => format!("{}{}", THUMBNAIL_BASE, id),
    }
}

/// All URLs synthesized for one converted sharing link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedLink {
    pub source: String,
    pub id: FileId,
    /// The converted URL for the selected variant.
    pub primary: String,
    /// Thumbnail form, labeled "Preview URL" in output.
    pub preview: String,
    /// Export form, labeled "Direct URL" in output.
    pub direct: String,
}

impl ConvertedLink {
    pub fn new(source: &str, id: FileId, variant: Variant) -> Self {
        let preview = canonical_url(&id, UrlKind::Thumbnail);
        let direct = canonical_url(&id, UrlKind::DirectView);
        let mut link = Self {
            source: source.to_string(),
            id,
            primary: String::new(),
            preview,
            direct,
        };
        link.select(variant);
        link
    }

    /// Re-pick the primary URL from the stored forms.
    pub fn select(&mut self, variant: Variant) {
        self.primary = match variant.primary_kind() {
            UrlKind::Thumbnail => self.preview.clone(),
            UrlKind::DirectView => self.direct.clone(),
        };
    }
}

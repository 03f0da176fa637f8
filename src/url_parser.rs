//! URL parser for extracting Google Drive file identifiers from sharing links.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, Result};

/// Sharing link shape accepted for conversion: `.../d/<ID>/view...`.
static SHARE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/d/([a-zA-Z0-9_-]+)/view").expect("Invalid share URL regex")
});

static FILE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("Invalid file URL regex")
});

static ID_PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("Invalid id parameter regex")
});

static D_SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("Invalid /d/ segment regex")
});

/// Identifier of a file hosted on Google Drive.
///
/// Only produced by [`extract_id`], so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How forgiving the extractor is about the link shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Only `/d/<ID>/view` sharing links. Used for conversion.
    Strict,
    /// Also `/file/d/<ID>`, `id=<ID>` and bare `/d/<ID>`. Used for previews
    /// of already converted URLs.
    Lenient,
}

/// Extract a Google Drive file identifier from a URL.
///
/// With [`Strictness::Strict`] only the sharing-link shape is accepted:
/// - `https://drive.google.com/file/d/<ID>/view`
/// - `https://drive.google.com/file/d/<ID>/view?usp=sharing`
///
/// [`Strictness::Lenient`] additionally accepts, in order:
/// - `.../file/d/<ID>`
/// - `...?id=<ID>` (e.g. `uc?export=view&id=<ID>`)
/// - `.../d/<ID>` (e.g. `lh3.googleusercontent.com/d/<ID>`)
///
/// # Examples
///
/// ```
/// use drive_embed::url_parser::{extract_id, Strictness};
///
/// let id = extract_id("https://drive.google.com/file/d/1abc123/view", Strictness::Strict).unwrap();
/// assert_eq!(id.as_str(), "1abc123");
///
/// let id = extract_id("https://lh3.googleusercontent.com/d/1abc123", Strictness::Lenient).unwrap();
/// assert_eq!(id.as_str(), "1abc123");
/// ```
pub fn extract_id(url: &str, strictness: Strictness) -> Result<FileId> {
    let trimmed = url.trim();

    let patterns: Vec<&Regex> = match strictness {
        Strictness::Strict => vec![&*SHARE_URL_REGEX],
        Strictness::Lenient => vec![&*FILE_URL_REGEX, &*ID_PARAM_REGEX, &*D_SEGMENT_REGEX],
    };

    patterns
        .iter()
        .find_map(|re| re.captures(trimmed)?.get(1))
        .map(|m| FileId(m.as_str().to_string()))
        .ok_or_else(|| EmbedError::InvalidUrlFormat(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_share_url() {
        let url = "https://drive.google.com/file/d/1abc123XYZ/view?usp=sharing";
        assert_eq!(extract_id(url, Strictness::Strict).unwrap().as_str(), "1abc123XYZ");
    }

    #[test]
    fn test_strict_rejects_converted_url() {
        let url = "https://drive.google.com/uc?export=view&id=1abc123XYZ";
        assert!(matches!(
            extract_id(url, Strictness::Strict),
            Err(EmbedError::InvalidUrlFormat(_))
        ));
    }

    #[test]
    fn test_lenient_accepts_converted_urls() {
        let export = "https://drive.google.com/uc?export=view&id=1abc123XYZ";
        let thumb = "https://lh3.googleusercontent.com/d/1abc123XYZ";
        assert_eq!(extract_id(export, Strictness::Lenient).unwrap().as_str(), "1abc123XYZ");
        assert_eq!(extract_id(thumb, Strictness::Lenient).unwrap().as_str(), "1abc123XYZ");
    }

    #[test]
    fn test_lenient_prefers_file_segment() {
        let url = "https://drive.google.com/file/d/fromPath/edit?id=fromQuery";
        assert_eq!(extract_id(url, Strictness::Lenient).unwrap().as_str(), "fromPath");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let url = "  https://drive.google.com/file/d/abc-123_XYZ/view \n";
        assert_eq!(extract_id(url, Strictness::Strict).unwrap().as_str(), "abc-123_XYZ");
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(extract_id("", Strictness::Strict).is_err());
        assert!(extract_id("", Strictness::Lenient).is_err());
        assert!(extract_id("https://drive.google.com/file/d//view", Strictness::Strict).is_err());
    }
}

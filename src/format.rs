//! Rendering converted URLs as plain text, Markdown, HTML, JSON or CSV.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::synth::ConvertedLink;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Markdown,
    Html,
    Json,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Plain,
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::Json,
        OutputFormat::Csv,
    ];

    /// Whether the labeled Preview/Direct layout applies to this format.
    pub fn supports_labels(self) -> bool {
        matches!(
            self,
            OutputFormat::Plain | OutputFormat::Markdown | OutputFormat::Html
        )
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Plain => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(OutputFormat::Plain),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(EmbedError::UnknownFormat(other.to_string())),
        }
    }
}

/// Fixed download filename for each format.
pub fn export_filename(format: OutputFormat) -> String {
    format!("drive-images.{}", format.extension())
}

#[derive(Serialize)]
struct UrlList<'a> {
    urls: &'a [String],
}

fn markdown_image(url: &str) -> String {
    format!("![image]({})", url)
}

fn html_image(url: &str) -> String {
    format!("<img src=\"{}\" alt=\"image\" />", url)
}

/// Render an ordered list of URLs in the given format.
///
/// Pure: the same inputs always render the same text.
pub fn format_urls(urls: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain | OutputFormat::Csv => urls.join("\n"),
        OutputFormat::Markdown => urls
            .iter()
            .map(|u| markdown_image(u))
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Html => urls
            .iter()
            .map(|u| html_image(u))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            // Serializing a list of strings cannot fail.
            serde_json::to_string_pretty(&UrlList { urls }).unwrap_or_default()
        }
    }
}

/// Render each link as a labeled block with its Preview and Direct URLs.
///
/// Formats without a labeled layout (JSON, CSV) fall back to
/// [`format_urls`] over the primary URLs.
pub fn format_labeled(links: &[ConvertedLink], format: OutputFormat) -> String {
    let wrap: fn(&str) -> String = match format {
        OutputFormat::Plain => |u: &str| u.to_string(),
        OutputFormat::Markdown => markdown_image,
        OutputFormat::Html => html_image,
        OutputFormat::Json | OutputFormat::Csv => {
            return format_urls(&primary_urls(links), format);
        }
    };

    links
        .iter()
        .map(|link| {
            format!(
                "Preview URL: {}\nDirect URL: {}",
                wrap(&link.preview),
                wrap(&link.direct)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render links either plainly (primary URLs) or labeled.
pub fn render(links: &[ConvertedLink], format: OutputFormat, labeled: bool) -> String {
    if labeled && format.supports_labels() {
        format_labeled(links, format)
    } else {
        format_urls(&primary_urls(links), format)
    }
}

pub fn primary_urls(links: &[ConvertedLink]) -> Vec<String> {
    links.iter().map(|l| l.primary.clone()).collect()
}

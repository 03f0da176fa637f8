//! Preview cards for converted URLs.

use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

use crate::fetch::AssetFetcher;
use crate::synth::{canonical_url, UrlKind};
use crate::url_parser::{extract_id, FileId, Strictness};

/// What to show for one output URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewCard {
    Image { id: FileId, image_url: String },
    Placeholder { url: String, reason: Option<String> },
}

impl PreviewCard {
    /// Best-effort card: any URL the lenient extractor understands gets a
    /// thumbnail, anything else a placeholder.
    pub fn for_url(url: &str) -> Self {
        match extract_id(url, Strictness::Lenient) {
            Ok(id) => PreviewCard::Image {
                image_url: canonical_url(&id, UrlKind::Thumbnail),
                id,
            },
            Err(_) => PreviewCard::Placeholder {
                url: url.to_string(),
                reason: None,
            },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PreviewCard::Placeholder { .. })
    }
}

pub fn build_cards(urls: &[String]) -> Vec<PreviewCard> {
    urls.iter().map(|u| PreviewCard::for_url(u)).collect()
}

/// Probe every image card. A card whose image cannot be fetched becomes a
/// placeholder; the other cards are unaffected.
pub async fn resolve(fetcher: &AssetFetcher, cards: Vec<PreviewCard>) -> Vec<PreviewCard> {
    join_all(cards.into_iter().map(|card| async move {
        let image_url = match card {
            PreviewCard::Image { ref image_url, .. } => image_url.clone(),
            placeholder => return placeholder,
        };
        match fetcher.probe(&image_url).await {
            Ok(()) => card,
            Err(err) => {
                warn!(url = %image_url, error = %err, "preview unavailable");
                PreviewCard::Placeholder {
                    url: image_url,
                    reason: Some(err.to_string()),
                }
            }
        }
    }))
    .await
}

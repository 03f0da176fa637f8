//! HTTP fetching of converted images for previews and downloads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::{stream, StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use crate::error::{EmbedError, Result};
use crate::models::DownloadedAsset;

/// Extension used when the response does not name a known image type.
const FALLBACK_EXTENSION: &str = "jpg";

/// Extensions preferred when a MIME type maps to several.
const PREFERRED_EXTENSIONS: [&str; 5] = ["jpg", "png", "gif", "webp", "svg"];

/// Default number of downloads in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Client for fetching images behind converted URLs.
///
/// Requests never carry a `Referer` header.
pub struct AssetFetcher {
    http: Client,
    concurrency: usize,
}

impl AssetFetcher {
    /// Create a new AssetFetcher.
    ///
    /// # Arguments
    /// * `timeout` - Per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .referer(false)
            .user_agent(concat!("drive_embed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failure(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbedError::AssetFetchFailure {
                url: url.to_string(),
                message: format!("HTTP status {}", status.as_u16()),
            });
        }

        Ok(response)
    }

    /// Check that `url` serves an image.
    pub async fn probe(&self, url: &str) -> Result<()> {
        let response = self.get(url).await?;
        match content_type(&response) {
            Some(ct) if ct.starts_with("image/") => Ok(()),
            other => Err(EmbedError::AssetFetchFailure {
                url: url.to_string(),
                message: format!("not an image ({})", other.unwrap_or("no content type")),
            }),
        }
    }

    /// Download one image into `dir` as `<stem>.<ext>`.
    ///
    /// The extension follows the response's `Content-Type`. The body is
    /// written to `<stem>.<ext>.part` and renamed once complete, so a failed
    /// transfer leaves nothing behind.
    pub async fn download<P: AsRef<Path>>(
        &self,
        url: &str,
        dir: P,
        stem: &str,
    ) -> Result<DownloadedAsset> {
        let response = self.get(url).await?;
        let extension = extension_for(content_type(&response));
        let path: PathBuf = dir.as_ref().join(format!("{}.{}", stem, extension));
        let partial = path.with_extension(format!("{}.part", extension));

        let bytes = match write_body(response, &partial).await {
            Ok(bytes) => bytes,
            Err(err) => {
                if let Err(e) = fs::remove_file(&partial).await {
                    debug!(path = %partial.display(), error = %e, "no partial file to remove");
                }
                return Err(fetch_failure(url, err));
            }
        };
        fs::rename(&partial, &path).await?;

        debug!(%url, path = %path.display(), bytes, "downloaded image");
        Ok(DownloadedAsset {
            url: url.to_string(),
            path,
            bytes,
        })
    }

    /// Download every `(url, stem)` pair independently.
    ///
    /// Results come back in input order. A failed item does not stop or
    /// undo the others.
    pub async fn download_all<P: AsRef<Path>>(
        &self,
        items: &[(String, String)],
        dir: P,
    ) -> Vec<Result<DownloadedAsset>> {
        let dir = dir.as_ref();
        stream::iter(items)
            .map(|(url, stem)| async move {
                let result = self.download(url, dir, stem).await;
                if let Err(ref err) = result {
                    warn!(%url, error = %err, "download failed");
                }
                result
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

/// Stream a response body to `path`.
async fn write_body(response: Response, path: &Path) -> std::io::Result<u64> {
    let mut file = File::create(path).await?;
    let body = response.bytes_stream().map_err(std::io::Error::other);
    let reader = StreamReader::new(body);
    tokio::pin!(reader);
    let bytes = tokio::io::copy(&mut reader, &mut file).await?;
    file.flush().await?;
    Ok(bytes)
}

fn fetch_failure(url: &str, err: impl std::fmt::Display) -> EmbedError {
    EmbedError::AssetFetchFailure {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

/// File extension for a `Content-Type` value such as `image/png; q=1`.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let Some(essence) = content_type.and_then(|ct| ct.split(';').next()) else {
        return FALLBACK_EXTENSION;
    };
    let Some(candidates) = mime_guess::get_mime_extensions_str(essence.trim()) else {
        return FALLBACK_EXTENSION;
    };

    PREFERRED_EXTENSIONS
        .iter()
        .find(|ext| candidates.contains(*ext))
        .copied()
        .or_else(|| candidates.first().copied())
        .unwrap_or(FALLBACK_EXTENSION)
}

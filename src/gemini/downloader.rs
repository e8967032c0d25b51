use async_trait::async_trait;
use reqwest::Client;

use crate::batch::AssetDownloader;
use crate::error::{GenFuseError, Result};
use crate::models::{AssetContent, AssetRef};

/// Fetches generated assets over HTTP. The Gemini file endpoint requires the
/// API key as a `key` query parameter on the download URL.
#[derive(Clone)]
pub struct HttpAssetDownloader {
    http: Client,
    api_key: String,
}

impl HttpAssetDownloader {
    pub(crate) fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

fn download_url(uri: &str, api_key: &str) -> String {
    if uri.contains('?') {
        format!("{}&key={}", uri, api_key)
    } else {
        format!("{}?key={}", uri, api_key)
    }
}

#[async_trait]
impl AssetDownloader for HttpAssetDownloader {
    async fn resolve(&self, asset: &AssetRef) -> Result<AssetContent> {
        let url = download_url(&asset.uri, &self.api_key);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GenFuseError::Download(format!("failed to fetch {}: {}", asset.uri, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenFuseError::Download(format!(
                "failed to download {}: status {}",
                asset.uri, status
            )));
        }

        let mime_type = asset
            .mime_type
            .clone()
            .or_else(|| {
                response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_string())
            })
            .unwrap_or_else(|| "video/mp4".to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenFuseError::Download(format!("failed to read {}: {}", asset.uri, e)))?
            .to_vec();

        log::debug!("Downloaded {} ({} bytes)", asset.uri, bytes.len());
        Ok(AssetContent::Bytes { mime_type, bytes })
    }
}

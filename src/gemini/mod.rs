pub mod downloader;
pub mod fusion_client;
pub mod video_client;

use std::sync::Arc;

use async_trait::async_trait;

use crate::batch::MediaGeneration;
use crate::config::{Config, GeminiConfig, DEFAULT_BASE_URL};
use crate::error::{GenFuseError, Result};
use crate::models::{
    export_file_name, GeneratedAsset, ImageFusionRequest, ModelCategory, UploadResult,
    VideoJobRequest, VideoOperation,
};
use crate::storage::ExportManager;

pub use downloader::HttpAssetDownloader;
pub use fusion_client::{FusionClient, DEFAULT_FUSION_MODEL};
pub use video_client::{VideoClient, DEFAULT_VIDEO_MODEL};

/// Entry point to the Gemini generative-media endpoints: image fusion, video
/// jobs and asset download, sharing one HTTP client, plus an optional export
/// backend.
#[derive(Clone)]
pub struct GeminiClient {
    fusion_client: FusionClient,
    video_client: VideoClient,
    downloader: HttpAssetDownloader,
    export: Option<Arc<ExportManager>>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("export", &self.export.is_some())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or_else(|| {
            GenFuseError::Config("Gemini API key is required (set GEMINI_API_KEY)".into())
        })?;
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let http = reqwest::Client::new();

        Ok(Self {
            fusion_client: FusionClient::new(
                http.clone(),
                api_key.clone(),
                base_url.clone(),
                config.fusion_model,
            ),
            video_client: VideoClient::new(
                http.clone(),
                api_key.clone(),
                base_url,
                config.video_model,
            ),
            downloader: HttpAssetDownloader::new(http, api_key),
            export: None,
        })
    }

    /// Build a client with a configured export backend. The backend's
    /// credentials are verified up front; a failed check is only warned
    /// about, since exporting is optional per asset.
    pub async fn with_export(gemini_config: GeminiConfig, storage_config: Config) -> Result<Self> {
        let mut client = Self::new(gemini_config)?;

        let manager = ExportManager::new(storage_config)?;
        if !manager.health_check().await? {
            log::warn!("Export backend configured but its credentials failed validation");
        }
        client.export = Some(Arc::new(manager));

        Ok(client)
    }

    pub fn fusion(&self) -> &FusionClient {
        &self.fusion_client
    }

    pub fn video(&self) -> &VideoClient {
        &self.video_client
    }

    pub fn downloader(&self) -> &HttpAssetDownloader {
        &self.downloader
    }

    pub fn export(&self) -> Option<&Arc<ExportManager>> {
        self.export.as_ref()
    }

    /// Fuse and upload in one call. Fails with a configuration error when no
    /// export backend was set up.
    pub async fn generate_and_export(
        &self,
        request: &ImageFusionRequest,
        file_name: Option<String>,
    ) -> Result<(GeneratedAsset, UploadResult)> {
        let asset = self.fusion_client.generate(request).await?;

        if let Some(export) = &self.export {
            let name = file_name.unwrap_or_else(|| {
                export_file_name(ModelCategory::Fusion, None, asset.content.extension())
            });
            let uploaded = export.export(&asset, name).await?;
            Ok((asset, uploaded))
        } else {
            Err(GenFuseError::Config("No export backend configured".into()))
        }
    }
}

#[async_trait]
impl MediaGeneration for GeminiClient {
    async fn submit_image_fusion(&self, request: &ImageFusionRequest) -> Result<GeneratedAsset> {
        self.fusion_client.generate(request).await
    }

    async fn submit_video_job(&self, request: &VideoJobRequest) -> Result<VideoOperation> {
        self.video_client.start(request).await
    }

    async fn poll_operation(&self, operation: &VideoOperation) -> Result<VideoOperation> {
        self.video_client.poll(operation).await
    }
}

/// Map a non-2xx backend response to an error kind. Safety blocks are
/// reported inside the error body and must keep their distinct kind.
pub(crate) fn classify_http_failure(status: u16, body: &str) -> GenFuseError {
    if body.contains("SAFETY") {
        GenFuseError::PolicyRejection(format!("status {}: {}", status, body))
    } else {
        GenFuseError::Response(format!("backend responded with status {}: {}", status, body))
    }
}

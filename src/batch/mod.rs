//! The batch generation workflow: N sequential submissions against the
//! generative-media backend, a fixed-interval polling loop for long-running
//! video operations, per-asset download with partial-failure tolerance, and
//! incremental publication of results.

pub mod cancel;
pub mod observer;
pub mod traits;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::BatchConfig;
use crate::error::{GenFuseError, Result};
use crate::models::{GeneratedAsset, ImageFusionRequest, VideoJobRequest, VideoOperation};

pub use cancel::{CancelToken, Sleeper, TokioSleeper};
pub use observer::{
    BatchEvent, BatchEventStream, BatchObserver, ChannelObserver, FnObserver, NoopObserver,
};
pub use traits::{AssetDownloader, MediaGeneration};

/// What one batch generates, `count` times over.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRequest {
    ImageFusion(ImageFusionRequest),
    Video(VideoJobRequest),
}

impl BatchRequest {
    fn kind(&self) -> &'static str {
        match self {
            BatchRequest::ImageFusion(_) => "image",
            BatchRequest::Video(_) => "video",
        }
    }
}

/// Drives a batch of generation requests sequentially, one item in flight at
/// a time, so results arrive in submission order and can be displayed as they
/// come in. Any item-level failure aborts the rest of the batch; results
/// already published through the observer stay with the caller.
///
/// A single orchestrator runs one batch at a time: a second `run_batch` while
/// one is in flight is rejected with [`GenFuseError::Busy`].
pub struct BatchOrchestrator {
    media: Arc<dyn MediaGeneration>,
    downloader: Arc<dyn AssetDownloader>,
    config: BatchConfig,
    sleeper: Arc<dyn Sleeper>,
    running: Mutex<()>,
}

impl BatchOrchestrator {
    pub fn new(
        media: Arc<dyn MediaGeneration>,
        downloader: Arc<dyn AssetDownloader>,
        config: BatchConfig,
    ) -> Self {
        Self::with_sleeper(media, downloader, config, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        media: Arc<dyn MediaGeneration>,
        downloader: Arc<dyn AssetDownloader>,
        config: BatchConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        BatchOrchestrator {
            media,
            downloader,
            config,
            sleeper,
            running: Mutex::new(()),
        }
    }

    /// Run `count` sequential generation items and return their assets in
    /// submission order. Cancellation is checked before every submission,
    /// poll wait and download.
    pub async fn run_batch(
        &self,
        request: &BatchRequest,
        count: u32,
        observer: &dyn BatchObserver,
        cancel: &CancelToken,
    ) -> Result<Vec<GeneratedAsset>> {
        if count == 0 {
            return Err(GenFuseError::InvalidRequest(
                "batch count must be at least 1".into(),
            ));
        }
        let _guard = self.running.try_lock().map_err(|_| GenFuseError::Busy)?;

        let batch_id = Uuid::new_v4();
        log::info!(
            "Starting {} batch {} with {} item(s)",
            request.kind(),
            batch_id,
            count
        );

        observer.progress(match request {
            BatchRequest::ImageFusion(_) => "Fusing images... this may take a moment.",
            BatchRequest::Video(_) => "Initiating video generation...",
        });

        let mut results: Vec<GeneratedAsset> = Vec::new();
        for item in 0..count {
            if cancel.is_canceled() {
                return Err(GenFuseError::Canceled);
            }
            if count > 1 {
                observer.progress(&format!(
                    "Generating {} {} of {}...",
                    request.kind(),
                    item + 1,
                    count
                ));
            }

            let assets = match request {
                BatchRequest::ImageFusion(fusion) => {
                    vec![self.media.submit_image_fusion(fusion).await?]
                }
                BatchRequest::Video(video) => self.run_video_item(video, observer, cancel).await?,
            };

            results.extend(assets);
            observer.results_updated(&results);
            log::debug!(
                "Batch {}: item {}/{} complete, {} asset(s) accumulated",
                batch_id,
                item + 1,
                count,
                results.len()
            );
        }

        log::info!(
            "Batch {} finished with {} asset(s)",
            batch_id,
            results.len()
        );
        Ok(results)
    }

    async fn run_video_item(
        &self,
        request: &VideoJobRequest,
        observer: &dyn BatchObserver,
        cancel: &CancelToken,
    ) -> Result<Vec<GeneratedAsset>> {
        let operation = self.media.submit_video_job(request).await?;
        observer.progress("Video generation in progress... this can take a few minutes.");
        let operation = self.poll_until_done(operation, cancel).await?;
        observer.progress("Finalizing video...");
        observer.progress("Downloading video...");
        self.resolve_assets(&operation, cancel).await
    }

    /// Fixed-interval polling loop. The operation value is replaced on every
    /// poll. Enforces the configured per-operation deadline, measured as the
    /// sum of completed waits.
    async fn poll_until_done(
        &self,
        mut operation: VideoOperation,
        cancel: &CancelToken,
    ) -> Result<VideoOperation> {
        let mut waited = Duration::ZERO;
        while !operation.done {
            if let Some(deadline) = self.config.operation_deadline {
                if waited >= deadline {
                    return Err(GenFuseError::DeadlineExceeded(format!(
                        "operation {} still pending after {:?}",
                        operation.name, deadline
                    )));
                }
            }
            tokio::select! {
                _ = cancel.canceled() => return Err(GenFuseError::Canceled),
                _ = self.sleeper.sleep(self.config.poll_interval) => {}
            }
            waited += self.config.poll_interval;
            operation = self.media.poll_operation(&operation).await?;
        }
        Ok(operation)
    }

    /// Resolve every asset reference of a completed operation. A reference
    /// that fails to download is skipped with a warning; the operation fails
    /// only when no reference resolves at all.
    async fn resolve_assets(
        &self,
        operation: &VideoOperation,
        cancel: &CancelToken,
    ) -> Result<Vec<GeneratedAsset>> {
        if operation.assets.is_empty() {
            return Err(GenFuseError::NoResult(
                "Video generation completed but no download link was provided.".into(),
            ));
        }

        let mut resolved = Vec::new();
        let mut last_failure: Option<GenFuseError> = None;
        for reference in &operation.assets {
            if cancel.is_canceled() {
                return Err(GenFuseError::Canceled);
            }
            match self.downloader.resolve(reference).await {
                Ok(content) => resolved.push(GeneratedAsset::new(content)),
                Err(err) => {
                    log::warn!("Skipping asset {}: {}", reference.uri, err);
                    last_failure = Some(err);
                }
            }
        }

        if resolved.is_empty() {
            return Err(last_failure.unwrap_or_else(|| {
                GenFuseError::Download("no asset of the operation could be downloaded".into())
            }));
        }
        Ok(resolved)
    }
}

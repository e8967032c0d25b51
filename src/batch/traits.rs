use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AssetContent, AssetRef, GeneratedAsset, ImageFusionRequest, VideoJobRequest, VideoOperation,
};

/// The generative-media backend as seen by the orchestrator. Image fusion
/// completes in one step; video jobs return a long-running operation that is
/// re-polled until done.
#[async_trait]
pub trait MediaGeneration: Send + Sync {
    async fn submit_image_fusion(&self, request: &ImageFusionRequest) -> Result<GeneratedAsset>;

    async fn submit_video_job(&self, request: &VideoJobRequest) -> Result<VideoOperation>;

    /// Re-fetch the state of a pending operation. The returned value replaces
    /// the previous one wholesale.
    async fn poll_operation(&self, operation: &VideoOperation) -> Result<VideoOperation>;
}

/// Resolves an asset reference from a completed operation to retrievable
/// content. Fallible per asset; a resolution failure is not a generation
/// failure.
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    async fn resolve(&self, asset: &AssetRef) -> Result<AssetContent>;
}

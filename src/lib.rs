//! GenFuse is a client library for the Gemini generative-media APIs:
//! image fusion, image-to-video generation, batch orchestration with
//! progress reporting and cancellation, and Google Drive export.
//!
//! ```no_run
//! use std::sync::Arc;
//! use genfuse::{
//!     BatchOrchestrator, BatchRequest, CancelToken, FnObserver, GeminiClient,
//!     GeminiConfig, ImageFusionRequest, InputImage,
//! };
//!
//! # async fn run() -> genfuse::Result<()> {
//! let client = Arc::new(GeminiClient::new(GeminiConfig::from_env())?);
//! let orchestrator = BatchOrchestrator::new(
//!     client.clone(),
//!     Arc::new(client.downloader().clone()),
//!     Default::default(),
//! );
//!
//! let source = InputImage::from_bytes(&std::fs::read("photo.png").unwrap(), "image/png");
//! let request = BatchRequest::ImageFusion(ImageFusionRequest::new(source, "make it blue"));
//! let results = orchestrator
//!     .run_batch(&request, 2, &FnObserver(|m: &str| println!("{m}")), &CancelToken::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod storage;

pub use batch::{
    AssetDownloader, BatchEvent, BatchEventStream, BatchObserver, BatchOrchestrator, BatchRequest,
    CancelToken, ChannelObserver, FnObserver, MediaGeneration, NoopObserver, Sleeper, TokioSleeper,
};
pub use config::{BatchConfig, Config, DriveConfig, GeminiConfig};
pub use error::{GenFuseError, Result};
pub use gemini::{
    FusionClient, GeminiClient, HttpAssetDownloader, VideoClient, DEFAULT_FUSION_MODEL,
    DEFAULT_VIDEO_MODEL,
};
pub use models::{
    export_file_name, AspectRatio, AssetContent, AssetRef, GeneratedAsset, ImageFusionRequest,
    InputImage, ModelCategory, ModelInfo, RenderOptions, Resolution, UploadRequest, UploadResult,
    VideoJobRequest, VideoOperation,
};
pub use storage::ExportManager;

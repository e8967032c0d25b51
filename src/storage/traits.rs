use async_trait::async_trait;

use crate::error::Result;
use crate::models::{UploadRequest, UploadResult};

/// A file store generated assets can be exported to.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult>;

    async fn health_check(&self) -> Result<bool>;
}

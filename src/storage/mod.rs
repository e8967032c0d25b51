pub mod drive;
pub mod traits;

use std::sync::Arc;

use crate::config::Config;
use crate::error::{GenFuseError, Result};
use crate::models::{GeneratedAsset, UploadRequest, UploadResult};

use drive::DriveStore;
use traits::AssetStore;

pub use traits::AssetStore as AssetStoreTrait;

/// Picks and wraps the configured export backend. Google Drive is the only
/// backend today; the trait keeps the door open for others.
pub struct ExportManager {
    backend: Arc<dyn AssetStore>,
}

impl ExportManager {
    pub fn new(config: Config) -> Result<Self> {
        if config.use_drive {
            let drive_config = config
                .drive
                .ok_or_else(|| GenFuseError::Config("Drive config required".into()))?;
            Ok(Self {
                backend: Arc::new(DriveStore::new(drive_config)?),
            })
        } else {
            Err(GenFuseError::Config("No export backend configured".into()))
        }
    }

    pub fn with_backend(backend: Arc<dyn AssetStore>) -> Self {
        Self { backend }
    }

    /// Upload one generated asset under the given file name. Remote asset
    /// content has to be downloaded before it can be exported.
    pub async fn export(
        &self,
        asset: &GeneratedAsset,
        file_name: impl Into<String>,
    ) -> Result<UploadResult> {
        let (bytes, mime_type) = asset.content.to_bytes()?;
        self.backend
            .upload(UploadRequest {
                file_name: file_name.into(),
                mime_type,
                bytes,
            })
            .await
    }

    pub async fn health_check(&self) -> Result<bool> {
        self.backend.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriveConfig;
    use crate::models::AssetContent;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[test]
    fn export_requires_an_enabled_backend() {
        assert!(matches!(
            ExportManager::new(Config::new()),
            Err(GenFuseError::Config(_))
        ));
        assert!(ExportManager::new(
            Config::new().with_drive(DriveConfig::new().with_access_token("t"))
        )
        .is_ok());
    }

    struct RecordingStore {
        uploads: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl AssetStore for RecordingStore {
        async fn upload(&self, request: UploadRequest) -> Result<UploadResult> {
            self.uploads.lock().unwrap().push((
                request.file_name.clone(),
                request.mime_type.clone(),
                request.bytes.len(),
            ));
            Ok(UploadResult {
                id: "file-1".into(),
                name: request.file_name,
            })
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn export_decodes_inline_content_before_uploading() {
        let store = Arc::new(RecordingStore {
            uploads: Mutex::new(Vec::new()),
        });
        let manager = ExportManager::with_backend(store.clone());

        let asset = GeneratedAsset::new(AssetContent::Inline {
            mime_type: "image/png".into(),
            data: "aGVsbG8=".into(),
        });
        let result = manager.export(&asset, "gemini-fused-image-1.png").await.unwrap();
        assert_eq!(result.id, "file-1");

        let uploads = store.uploads.lock().unwrap();
        assert_eq!(
            *uploads,
            vec![("gemini-fused-image-1.png".to_string(), "image/png".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn remote_content_cannot_be_exported() {
        let store = Arc::new(RecordingStore {
            uploads: Mutex::new(Vec::new()),
        });
        let manager = ExportManager::with_backend(store);

        let asset = GeneratedAsset::new(AssetContent::Remote {
            url: "https://files.example/v1".into(),
        });
        assert!(manager.export(&asset, "v1.mp4").await.is_err());
    }
}

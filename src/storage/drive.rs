use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::DriveConfig;
use crate::error::{GenFuseError, Result};
use crate::models::{DriveFileResponse, UploadRequest, UploadResult};
use crate::storage::traits::AssetStore;

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const ABOUT_URL: &str = "https://www.googleapis.com/drive/v3/about?fields=user";

/// Google Drive backend using the multipart file-create endpoint. The access
/// token is expected to carry the `drive.file` scope; acquiring it is the
/// caller's concern.
pub struct DriveStore {
    client: Client,
    access_token: String,
    parent_folder: String,
}

impl DriveStore {
    pub fn new(config: DriveConfig) -> Result<Self> {
        let access_token = config.access_token.ok_or_else(|| {
            GenFuseError::Config("Drive access token is required (set DRIVE_ACCESS_TOKEN)".into())
        })?;
        let parent_folder = config.parent_folder.unwrap_or_else(|| "root".to_string());

        Ok(Self {
            client: Client::new(),
            access_token,
            parent_folder,
        })
    }

    fn metadata_json(&self, file_name: &str, mime_type: &str) -> Value {
        json!({
            "name": file_name,
            "mimeType": mime_type,
            "parents": [self.parent_folder],
        })
    }
}

#[async_trait]
impl AssetStore for DriveStore {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult> {
        let metadata = self.metadata_json(&request.file_name, &request.mime_type);

        let metadata_part = multipart::Part::text(metadata.to_string())
            .mime_str("application/json")
            .map_err(|e| GenFuseError::Storage(e.to_string()))?;
        let file_part = multipart::Part::bytes(request.bytes)
            .mime_str(&request.mime_type)
            .map_err(|e| GenFuseError::Storage(e.to_string()))?;
        let form = multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        log::info!("Uploading {} to Google Drive", request.file_name);

        let response = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenFuseError::Request(format!("Drive request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenFuseError::Storage(format!(
                "Drive API responded with status {}: {}",
                status, error_text
            )));
        }

        let created: DriveFileResponse = response
            .json()
            .await
            .map_err(|e| GenFuseError::Response(e.to_string()))?;

        Ok(UploadResult {
            id: created.id,
            name: request.file_name,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(ABOUT_URL)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| GenFuseError::Request(format!("Drive request failed: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_missing_access_token_is_a_config_error() {
        assert!(matches!(
            DriveStore::new(DriveConfig::new()),
            Err(GenFuseError::Config(_))
        ));
    }

    #[test]
    fn metadata_defaults_to_the_drive_root() {
        let store = DriveStore::new(DriveConfig::new().with_access_token("t")).unwrap();
        let metadata = store.metadata_json("gemini-fused-image-1.png", "image/png");
        assert_eq!(
            metadata,
            json!({
                "name": "gemini-fused-image-1.png",
                "mimeType": "image/png",
                "parents": ["root"],
            })
        );
    }

    #[test]
    fn metadata_uses_the_configured_parent_folder() {
        let store = DriveStore::new(
            DriveConfig::new()
                .with_access_token("t")
                .with_parent_folder("folder123"),
        )
        .unwrap();
        let metadata = store.metadata_json("a.mp4", "video/mp4");
        assert_eq!(metadata["parents"], json!(["folder123"]));
    }
}

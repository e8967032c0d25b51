use serde::Deserialize;

use crate::error::{GenFuseError, Result};
use crate::models::asset::{AssetRef, InputImage};

/// One image-to-video submission.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoJobRequest {
    pub source: InputImage,
    pub prompt: String,
    /// Videos requested from a single operation. The backend may still return
    /// fewer (or more) asset references than asked for.
    pub sample_count: u32,
    pub model_id: Option<String>,
}

impl VideoJobRequest {
    pub fn new(source: InputImage, prompt: impl Into<String>) -> Self {
        VideoJobRequest {
            source,
            prompt: prompt.into(),
            sample_count: 1,
            model_id: None,
        }
    }

    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// A pending or finished long-running video operation. Re-polling replaces
/// the whole value; it is never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoOperation {
    /// Opaque continuation token, e.g. `models/veo-2.0/operations/abc123`.
    pub name: String,
    pub done: bool,
    /// Asset references, present once the operation is done.
    pub assets: Vec<AssetRef>,
}

impl VideoOperation {
    /// Build from the wire payload, surfacing a vendor-reported failure as an
    /// error. A safety block keeps its distinct kind.
    pub fn from_payload(payload: OperationPayload) -> Result<Self> {
        if let Some(error) = payload.error {
            let message = error
                .message
                .unwrap_or_else(|| "operation failed without a message".to_string());
            if message.contains("SAFETY") {
                return Err(GenFuseError::PolicyRejection(message));
            }
            return Err(GenFuseError::Response(format!(
                "video operation {} failed: {}",
                payload.name, message
            )));
        }

        let assets = payload
            .response
            .and_then(|r| r.generated_videos)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|generated| generated.video)
            .filter_map(|video| {
                video.uri.map(|uri| AssetRef {
                    uri,
                    mime_type: video.mime_type,
                })
            })
            .collect();

        Ok(VideoOperation {
            name: payload.name,
            done: payload.done.unwrap_or(false),
            assets,
        })
    }
}

// Wire shapes for `models/{model}:predictLongRunning` and the operations
// endpoint. Vendor-defined; only the fields this crate reads are modeled.

#[derive(Debug, Deserialize)]
pub struct OperationPayload {
    pub name: String,
    pub done: Option<bool>,
    pub response: Option<OperationResponse>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
pub struct OperationResponse {
    #[serde(rename = "generatedVideos")]
    pub generated_videos: Option<Vec<GeneratedVideo>>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedVideo {
    pub video: Option<VideoHandle>,
}

#[derive(Debug, Deserialize)]
pub struct VideoHandle {
    pub uri: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_operation_has_no_assets() {
        let payload: OperationPayload =
            serde_json::from_str(r#"{"name": "models/veo/operations/op1"}"#).unwrap();
        let operation = VideoOperation::from_payload(payload).unwrap();
        assert_eq!(operation.name, "models/veo/operations/op1");
        assert!(!operation.done);
        assert!(operation.assets.is_empty());
    }

    #[test]
    fn done_operation_collects_video_uris() {
        let payload: OperationPayload = serde_json::from_str(
            r#"{
                "name": "models/veo/operations/op2",
                "done": true,
                "response": {
                    "generatedVideos": [
                        {"video": {"uri": "https://files.example/v1", "mimeType": "video/mp4"}},
                        {"video": {"uri": "https://files.example/v2"}},
                        {"video": {}}
                    ]
                }
            }"#,
        )
        .unwrap();
        let operation = VideoOperation::from_payload(payload).unwrap();
        assert!(operation.done);
        assert_eq!(operation.assets.len(), 2);
        assert_eq!(operation.assets[0].uri, "https://files.example/v1");
        assert_eq!(operation.assets[0].mime_type.as_deref(), Some("video/mp4"));
        assert!(operation.assets[1].mime_type.is_none());
    }

    #[test]
    fn vendor_failure_becomes_an_error() {
        let payload: OperationPayload = serde_json::from_str(
            r#"{"name": "op3", "done": true, "error": {"code": 13, "message": "internal"}}"#,
        )
        .unwrap();
        assert!(matches!(
            VideoOperation::from_payload(payload),
            Err(GenFuseError::Response(_))
        ));
    }

    #[test]
    fn safety_failure_keeps_its_kind() {
        let payload: OperationPayload = serde_json::from_str(
            r#"{"name": "op4", "done": true, "error": {"message": "blocked by SAFETY filters"}}"#,
        )
        .unwrap();
        assert!(matches!(
            VideoOperation::from_payload(payload),
            Err(GenFuseError::PolicyRejection(_))
        ));
    }
}

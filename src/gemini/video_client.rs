use reqwest::Client;
use serde_json::json;

use crate::error::{GenFuseError, Result};
use crate::gemini::classify_http_failure;
use crate::models::{OperationPayload, VideoJobRequest, VideoOperation};

pub const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";

/// Client for the long-running image-to-video job: one call to start the
/// operation, then repeated polls until it reports done.
#[derive(Clone)]
pub struct VideoClient {
    http: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl VideoClient {
    pub(crate) fn new(
        http: Client,
        api_key: String,
        base_url: String,
        default_model: Option<String>,
    ) -> Self {
        Self {
            http,
            api_key,
            base_url,
            default_model: default_model.unwrap_or_else(|| DEFAULT_VIDEO_MODEL.to_string()),
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("veo-2.0-generate-001", "Veo 2.0", "Google"),
            ("veo-3.0-generate-preview", "Veo 3.0 Preview", "Google"),
        ]
    }

    pub async fn start(&self, request: &VideoJobRequest) -> Result<VideoOperation> {
        let model_id = request.model_id.as_deref().unwrap_or(&self.default_model);

        let payload = json!({
            "instances": [{
                "prompt": request.prompt,
                "image": {
                    "bytesBase64Encoded": request.source.data,
                    "mimeType": request.source.mime_type,
                }
            }],
            "parameters": {
                "sampleCount": request.sample_count,
            }
        });

        log::info!(
            "Starting video generation with model {} ({} sample(s))",
            model_id,
            request.sample_count
        );

        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.base_url, model_id
        );
        let operation = self.call(self.http.post(&url).json(&payload)).await?;
        log::debug!("Video operation started: {}", operation.name);
        Ok(operation)
    }

    pub async fn poll(&self, operation: &VideoOperation) -> Result<VideoOperation> {
        let url = format!("{}/v1beta/{}", self.base_url, operation.name);
        log::debug!("Polling video operation: {}", operation.name);
        self.call(self.http.get(&url)).await
    }

    async fn call(&self, request: reqwest::RequestBuilder) -> Result<VideoOperation> {
        let response = request
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| GenFuseError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenFuseError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(classify_http_failure(status.as_u16(), &body));
        }

        let payload: OperationPayload =
            serde_json::from_str(&body).map_err(|e| GenFuseError::Response(e.to_string()))?;
        VideoOperation::from_payload(payload)
    }
}

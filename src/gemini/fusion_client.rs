use reqwest::Client;
use serde_json::json;

use crate::error::{GenFuseError, Result};
use crate::gemini::classify_http_failure;
use crate::models::{AssetContent, GenerateContentResponse, GeneratedAsset, ImageFusionRequest};
use crate::prompt::compose_fusion_prompt;

pub const DEFAULT_FUSION_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Client for the synchronous image-fusion call. One request, one fused
/// image, returned inline.
#[derive(Clone)]
pub struct FusionClient {
    http: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl FusionClient {
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
            default_model: default_model.unwrap_or_else(|| DEFAULT_FUSION_MODEL.to_string()),
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "gemini-2.5-flash-image-preview",
                "Gemini 2.5 Flash Image Preview",
                "Google",
            ),
            (
                "gemini-2.0-flash-preview-image-generation",
                "Gemini 2.0 Flash Image Generation",
                "Google",
            ),
        ]
    }

    pub async fn generate(&self, request: &ImageFusionRequest) -> Result<GeneratedAsset> {
        let model_id = request.model_id.as_deref().unwrap_or(&self.default_model);
        let prompt = compose_fusion_prompt(&request.prompt, &request.options);

        let mut parts = vec![json!({
            "inlineData": {
                "mimeType": request.source.mime_type,
                "data": request.source.data,
            }
        })];
        if let Some(reference) = &request.reference {
            parts.push(json!({
                "inlineData": {
                    "mimeType": reference.mime_type,
                    "data": reference.data,
                }
            }));
        }
        parts.push(json!({ "text": prompt }));

        let payload = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"],
            }
        });

        log::info!("Generating fused image with model: {}", model_id);

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model_id
        );
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
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

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenFuseError::Response(e.to_string()))?;
        asset_from_response(parsed)
    }
}

/// Pull the fused image and its optional caption out of a response. A block
/// reason or a SAFETY finish keeps its distinct error kind; a response with
/// no image part is a no-result.
fn asset_from_response(response: GenerateContentResponse) -> Result<GeneratedAsset> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(GenFuseError::PolicyRejection(format!(
                "prompt blocked: {}",
                reason
            )));
        }
    }

    let candidate = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| {
            GenFuseError::NoResult(
                "API did not return an image. It may have refused the request.".into(),
            )
        })?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(GenFuseError::PolicyRejection(
            "candidate finished with SAFETY".into(),
        ));
    }

    let mut image: Option<AssetContent> = None;
    let mut caption: Option<String> = None;
    for part in candidate.content.and_then(|c| c.parts).unwrap_or_default() {
        if let Some(inline) = part.inline_data {
            image = Some(AssetContent::Inline {
                mime_type: inline.mime_type,
                data: inline.data,
            });
        } else if let Some(text) = part.text {
            caption = Some(text);
        }
    }

    match image {
        Some(content) => Ok(GeneratedAsset { content, caption }),
        None => Err(GenFuseError::NoResult(
            "API did not return an image. It may have refused the request.".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> GenerateContentResponse {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn extracts_image_and_caption() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "Here is your image."},
                            {"inlineData": {"mimeType": "image/png", "data": "QUJD"}}
                        ]
                    }
                }]
            }"#,
        );
        let asset = asset_from_response(response).unwrap();
        assert_eq!(
            asset.content,
            AssetContent::Inline {
                mime_type: "image/png".into(),
                data: "QUJD".into(),
            }
        );
        assert_eq!(asset.caption.as_deref(), Some("Here is your image."));
    }

    #[test]
    fn a_blocked_prompt_is_a_policy_rejection() {
        let response = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        assert!(matches!(
            asset_from_response(response),
            Err(GenFuseError::PolicyRejection(_))
        ));
    }

    #[test]
    fn a_safety_finish_is_a_policy_rejection() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]}"#,
        );
        assert!(matches!(
            asset_from_response(response),
            Err(GenFuseError::PolicyRejection(_))
        ));
    }

    #[test]
    fn text_only_response_is_a_no_result() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "I cannot do that."}]}}]}"#,
        );
        assert!(matches!(
            asset_from_response(response),
            Err(GenFuseError::NoResult(_))
        ));
    }

    #[test]
    fn empty_response_is_a_no_result() {
        let response = parse("{}");
        assert!(matches!(
            asset_from_response(response),
            Err(GenFuseError::NoResult(_))
        ));
    }
}

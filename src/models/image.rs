use serde::{Deserialize, Serialize};

use crate::models::asset::InputImage;
use crate::models::common::{AspectRatio, Resolution};

/// Rendering knobs that get folded into the effective prompt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    /// Ask for a fast low-resolution draft instead of a full-quality render.
    pub preview: bool,
}

impl RenderOptions {
    pub fn preview() -> Self {
        RenderOptions {
            preview: true,
            ..Default::default()
        }
    }
}

/// One image-fusion submission: a source image, an optional style reference
/// and a prompt. When no reference is given the source doubles as the style
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFusionRequest {
    pub source: InputImage,
    pub reference: Option<InputImage>,
    pub prompt: String,
    pub options: RenderOptions,
    pub model_id: Option<String>,
}

impl ImageFusionRequest {
    pub fn new(source: InputImage, prompt: impl Into<String>) -> Self {
        ImageFusionRequest {
            source,
            reference: None,
            prompt: prompt.into(),
            options: RenderOptions::default(),
            model_id: None,
        }
    }

    pub fn with_reference(mut self, reference: InputImage) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// The image used as the style reference for this request.
    pub fn effective_reference(&self) -> &InputImage {
        self.reference.as_ref().unwrap_or(&self.source)
    }
}

// Wire shapes for `models/{model}:generateContent`. Vendor-defined; only the
// fields this crate reads are modeled.

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineData>,
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

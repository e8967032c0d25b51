//! Prompt composition for fusion requests, plus the canned prompt templates
//! offered to callers as starting points.

use crate::models::RenderOptions;

/// Constraint appended to every full-quality fusion prompt.
const SINGLE_SUBJECT_RULE: &str =
    "The generated image must contain only one person/subject. Do not show duplicate people or subjects.";

/// Fold the rendering options into the user prompt. Previews ask for a fast
/// low-resolution draft; full runs ask for the configured aspect ratio and
/// resolution.
pub fn compose_fusion_prompt(prompt: &str, options: &RenderOptions) -> String {
    if options.preview {
        format!(
            "{}\n\nImportant instructions: Generate a low-resolution, fast preview. The image must contain only one person/subject.",
            prompt
        )
    } else {
        format!(
            "{}\n\nImportant instructions: {} Produce an image with an aspect ratio of {} and a high resolution of approximately {}px on its longest side.",
            prompt,
            SINGLE_SUBJECT_RULE,
            options.aspect_ratio.as_str(),
            options.resolution.pixels()
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptSuggestion {
    pub label: &'static str,
    pub template: &'static str,
}

pub const SUGGESTIONS: [PromptSuggestion; 6] = [
    PromptSuggestion {
        label: "Change Shirt",
        template: "Place [describe your unique design or logo] on the shirt. Make it look realistic and high-quality, suitable for an e-commerce mockup.",
    },
    PromptSuggestion {
        label: "Change Pants",
        template: "Change the pants to [describe new pants, e.g., blue jeans], in the style of the reference image.",
    },
    PromptSuggestion {
        label: "Change Shoes",
        template: "Change the shoes to [describe new shoes, e.g., white sneakers], in the style of the reference image.",
    },
    PromptSuggestion {
        label: "Change Expression",
        template: "Change the facial expression to [describe expression, e.g., a wide, happy smile], in the style of the reference image.",
    },
    PromptSuggestion {
        label: "Change Hair",
        template: "Change the hair to [describe hair style, e.g., long and blonde], in the style of the reference image.",
    },
    PromptSuggestion {
        label: "Change Background",
        template: "Change the background to a [describe background, e.g., clean, professional studio with soft lighting] to highlight the product.",
    },
];

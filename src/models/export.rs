use serde::{Deserialize, Serialize};

use crate::models::common::ModelCategory;

/// A file handed to an export backend.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub id: String,
    pub name: String,
}

/// Wire shape of the Drive file-create response.
#[derive(Debug, Deserialize)]
pub struct DriveFileResponse {
    pub id: String,
}

/// Default export file name for a generated asset, matching the naming used
/// for local downloads: `gemini-fused-image-2.png`,
/// `gemini-generated-video.mp4`.
pub fn export_file_name(category: ModelCategory, index: Option<usize>, extension: &str) -> String {
    let stem = match category {
        ModelCategory::Fusion => "gemini-fused-image",
        ModelCategory::Video => "gemini-generated-video",
    };
    match index {
        Some(i) => format!("{}-{}.{}", stem, i + 1, extension),
        None => format!("{}.{}", stem, extension),
    }
}

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{GenFuseError, Result};

/// An input image, base64 encoded with its media type. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputImage {
    pub data: String,
    pub mime_type: String,
}

impl InputImage {
    pub fn from_base64(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        InputImage {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        InputImage {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// An unresolved reference to a generated asset, as reported by a completed
/// long-running operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    pub uri: String,
    pub mime_type: Option<String>,
}

/// The retrievable form of a generated asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssetContent {
    /// Base64 payload returned inline by the backend (image fusion).
    Inline { mime_type: String, data: String },
    /// Raw bytes fetched by a downloader (video).
    Bytes { mime_type: String, bytes: Vec<u8> },
    /// A URL the caller can fetch itself.
    Remote { url: String },
}

impl AssetContent {
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            AssetContent::Inline { mime_type, .. } | AssetContent::Bytes { mime_type, .. } => {
                Some(mime_type)
            }
            AssetContent::Remote { .. } => None,
        }
    }

    /// File extension derived from the media type, e.g. `png` or `mp4`.
    pub fn extension(&self) -> &str {
        self.mime_type()
            .and_then(|mime| mime.rsplit('/').next())
            .unwrap_or("bin")
    }

    /// Decode to raw bytes plus media type. `Remote` content has to be
    /// resolved by a downloader first.
    pub fn to_bytes(&self) -> Result<(Vec<u8>, String)> {
        match self {
            AssetContent::Inline { mime_type, data } => {
                let bytes = STANDARD
                    .decode(data)
                    .map_err(|e| GenFuseError::Serialization(e.to_string()))?;
                Ok((bytes, mime_type.clone()))
            }
            AssetContent::Bytes { mime_type, bytes } => Ok((bytes.clone(), mime_type.clone())),
            AssetContent::Remote { url } => Err(GenFuseError::InvalidRequest(format!(
                "asset at {} must be downloaded before it can be read",
                url
            ))),
        }
    }

    pub fn to_data_url(&self) -> Result<String> {
        match self {
            AssetContent::Inline { mime_type, data } => {
                Ok(format!("data:{};base64,{}", mime_type, data))
            }
            AssetContent::Bytes { mime_type, bytes } => Ok(format!(
                "data:{};base64,{}",
                mime_type,
                STANDARD.encode(bytes)
            )),
            AssetContent::Remote { url } => Err(GenFuseError::InvalidRequest(format!(
                "asset at {} must be downloaded before it can be inlined",
                url
            ))),
        }
    }
}

/// A generated media item. Owned by the caller once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub content: AssetContent,
    pub caption: Option<String>,
}

impl GeneratedAsset {
    pub fn new(content: AssetContent) -> Self {
        GeneratedAsset {
            content,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub category: ModelCategory,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Fusion,
    Video,
}

/// Aspect ratios the fusion prompt can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    Square,
    Wide,
    Tall,
    Classic,
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }

    pub fn all() -> [AspectRatio; 5] {
        [
            AspectRatio::Square,
            AspectRatio::Wide,
            AspectRatio::Tall,
            AspectRatio::Classic,
            AspectRatio::Portrait,
        ]
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

/// Target resolution of the longest image side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    OneK,
    TwoK,
    FourK,
    EightK,
}

impl Resolution {
    pub fn pixels(&self) -> u32 {
        match self {
            Resolution::OneK => 1024,
            Resolution::TwoK => 2048,
            Resolution::FourK => 4096,
            Resolution::EightK => 8192,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::OneK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_labels() {
        assert_eq!(AspectRatio::Square.as_str(), "1:1");
        assert_eq!(AspectRatio::Tall.as_str(), "9:16");
        assert_eq!(AspectRatio::all().len(), 5);
    }

    #[test]
    fn resolution_pixel_sizes() {
        assert_eq!(Resolution::OneK.pixels(), 1024);
        assert_eq!(Resolution::EightK.pixels(), 8192);
        assert_eq!(Resolution::default(), Resolution::OneK);
    }
}

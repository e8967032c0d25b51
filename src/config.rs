use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_OPERATION_DEADLINE: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub fusion_model: Option<String>,
    pub video_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub access_token: Option<String>,
    pub parent_folder: Option<String>,
}

/// Timing knobs for the batch workflow.
///
/// The upstream service historically had no upper bound on polling; this
/// configuration defaults to a 10 minute per-operation deadline. Set
/// `operation_deadline` to `None` to restore unbounded polling.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub poll_interval: Duration,
    pub operation_deadline: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub use_drive: bool,
    pub gemini: Option<GeminiConfig>,
    pub drive: Option<DriveConfig>,
    pub batch: BatchConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            fusion_model: None,
            video_model: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let fusion_model = env::var("GEMINI_FUSION_MODEL").ok();
        let video_model = env::var("GEMINI_VIDEO_MODEL").ok();

        GeminiConfig {
            api_key,
            base_url,
            fusion_model,
            video_model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_fusion_model(mut self, model_id: impl Into<String>) -> Self {
        self.fusion_model = Some(model_id.into());
        self
    }

    pub fn with_video_model(mut self, model_id: impl Into<String>) -> Self {
        self.video_model = Some(model_id.into());
        self
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        DriveConfig {
            access_token: None,
            parent_folder: None,
        }
    }
}

impl DriveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let access_token = env::var("DRIVE_ACCESS_TOKEN").ok();
        let parent_folder = env::var("DRIVE_PARENT_FOLDER").ok();

        DriveConfig {
            access_token,
            parent_folder,
        }
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_parent_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.parent_folder = Some(folder_id.into());
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            poll_interval: DEFAULT_POLL_INTERVAL,
            operation_deadline: Some(DEFAULT_OPERATION_DEADLINE),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let poll_interval = env::var("GENFUSE_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let operation_deadline = match env::var("GENFUSE_OPERATION_DEADLINE_SECS") {
            Ok(s) => s.parse().ok().map(Duration::from_secs),
            Err(_) => Some(DEFAULT_OPERATION_DEADLINE),
        };

        BatchConfig {
            poll_interval,
            operation_deadline,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_operation_deadline(mut self, deadline: Duration) -> Self {
        self.operation_deadline = Some(deadline);
        self
    }

    /// Matches the historical behavior of polling forever.
    pub fn with_unbounded_polling(mut self) -> Self {
        self.operation_deadline = None;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_drive: false,
            gemini: None,
            drive: None,
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let use_drive = env::var("USE_DRIVE").ok().map_or(false, |val| val == "true");

        Config {
            use_drive,
            gemini: Some(GeminiConfig::from_env()),
            drive: Some(DriveConfig::from_env()),
            batch: BatchConfig::from_env(),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_drive(mut self, config: DriveConfig) -> Self {
        self.drive = Some(config);
        self.use_drive = true;
        self
    }

    pub fn with_batch(mut self, config: BatchConfig) -> Self {
        self.batch = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_config_defaults_are_bounded() {
        let config = BatchConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.operation_deadline, Some(Duration::from_secs(600)));
    }

    #[test]
    fn unbounded_polling_clears_the_deadline() {
        let config = BatchConfig::new()
            .with_poll_interval(Duration::from_secs(2))
            .with_unbounded_polling();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.operation_deadline.is_none());
    }

    #[test]
    fn drive_config_enables_drive_on_the_top_level_config() {
        let config = Config::new().with_drive(DriveConfig::new().with_access_token("ya29.token"));
        assert!(config.use_drive);
        assert_eq!(
            config.drive.unwrap().access_token.as_deref(),
            Some("ya29.token")
        );
    }

    #[test]
    fn gemini_config_builder_overrides() {
        let config = GeminiConfig::new()
            .with_api_key("k")
            .with_base_url("http://localhost:9000")
            .with_fusion_model("gemini-test");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.fusion_model.as_deref(), Some("gemini-test"));
    }
}

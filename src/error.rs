use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenFuseError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Request blocked by safety policy: {0}")]
    PolicyRejection(String),
    #[error("Generation produced no result: {0}")]
    NoResult(String),
    #[error("Download error: {0}")]
    Download(String),
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),
    #[error("A batch is already running on this orchestrator")]
    Busy,
    #[error("The batch was canceled")]
    Canceled,
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GenFuseError {
    /// True for failures that must never be retried, whatever the retry
    /// policy of the caller is.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            GenFuseError::PolicyRejection(_)
                | GenFuseError::NoResult(_)
                | GenFuseError::InvalidRequest(_)
                | GenFuseError::Config(_)
        )
    }

    /// Human-readable message suitable for showing directly to an end user.
    /// Structured error kinds stay internal; display text is produced only at
    /// this boundary.
    pub fn user_message(&self) -> String {
        match self {
            GenFuseError::Config(msg) | GenFuseError::InvalidRequest(msg) => msg.clone(),
            GenFuseError::PolicyRejection(_) => {
                "The request was blocked due to safety policies. Please adjust your prompt or images."
                    .to_string()
            }
            GenFuseError::NoResult(msg) => msg.clone(),
            GenFuseError::Request(_)
            | GenFuseError::Response(_)
            | GenFuseError::Serialization(_) => {
                "Failed to generate. Please try again.".to_string()
            }
            GenFuseError::Download(_) => {
                "Failed to download the generated media. Please try again.".to_string()
            }
            GenFuseError::DeadlineExceeded(_) => {
                "Generation timed out. Please try again.".to_string()
            }
            GenFuseError::Busy => "A generation batch is already running.".to_string(),
            GenFuseError::Canceled => "Generation was canceled.".to_string(),
            GenFuseError::Storage(_) => "Failed to upload file to Google Drive.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenFuseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_errors_are_never_retryable() {
        assert!(GenFuseError::PolicyRejection("blocked".into()).is_permanent());
        assert!(GenFuseError::NoResult("no image".into()).is_permanent());
        assert!(!GenFuseError::Request("connection reset".into()).is_permanent());
        assert!(!GenFuseError::Download("404".into()).is_permanent());
    }

    #[test]
    fn user_messages_hide_internal_detail() {
        let err = GenFuseError::Request("hyper error: channel closed".into());
        assert_eq!(err.user_message(), "Failed to generate. Please try again.");

        let err = GenFuseError::PolicyRejection("finishReason=SAFETY".into());
        assert!(err.user_message().contains("safety policies"));
    }

    #[test]
    fn no_result_keeps_its_specific_message() {
        let err = GenFuseError::NoResult(
            "Video generation completed but no download link was provided.".into(),
        );
        assert!(err.user_message().contains("no download link"));
    }
}

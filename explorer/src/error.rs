//! Explorer error types

use thiserror::Error;

/// Result type for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Fallback shown when a failed response carries no `error` text
pub const GENERIC_FAILURE_MESSAGE: &str = "Error fetching results";

/// Explorer error types
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Scoring service unreachable: {message}")]
    Transport { message: String },

    #[error("Scoring service returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    ServiceStatus { status: u16, message: Option<String> },

    #[error("Scoring service did not answer within {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Malformed payload from scoring service: {message}")]
    MalformedPayload { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExplorerError {
    pub fn config(message: impl Into<String>) -> Self {
        ExplorerError::ConfigError { message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ExplorerError::Transport { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ExplorerError::MalformedPayload { message: message.into() }
    }

    /// Whether this failure belongs to the transport class surfaced inline to the user
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ExplorerError::Transport { .. }
                | ExplorerError::ServiceStatus { .. }
                | ExplorerError::Timeout { .. }
                | ExplorerError::MalformedPayload { .. }
        )
    }

    /// Short message suitable for inline display next to the input
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::ServiceStatus { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ExplorerError::ServiceStatus { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            ExplorerError::Transport { .. } => "Server error".to_string(),
            ExplorerError::Timeout { after_ms } => format!("Server error: no answer after {after_ms}ms"),
            ExplorerError::MalformedPayload { .. } => "Server error: unexpected response".to_string(),
            other => other.to_string(),
        }
    }
}

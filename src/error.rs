//! Error taxonomy shared by the survey and dashboard flows.

use thiserror::Error;

/// Message shown when the survey is submitted without an overall rating.
pub const MSG_MISSING_OVERALL: &str = "Please provide an overall rating";
/// Fallback for a server rejection that carried no `error` text.
pub const MSG_SERVER_FALLBACK: &str = "Something went wrong. Please try again.";
/// Shown when the request never produced a response.
pub const MSG_NETWORK: &str = "Network error. Please check your connection and try again.";
/// Shown when the dashboard statistics fail to load.
pub const MSG_STATS_FAILED: &str = "Error loading dashboard data. Check console for details.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    /// Client-side validation; never reaches the network.
    #[error("validation: {0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("transport: {0}")]
    Transport(String),

    /// A 2xx body that did not match the expected shape.
    #[error("decode: {0}")]
    Decode(String),

    #[error("dom: {0}")]
    Dom(String),
}

impl FeedbackError {
    pub fn missing_overall() -> Self {
        FeedbackError::Validation(MSG_MISSING_OVERALL.to_string())
    }

    /// Text for a blocking user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            FeedbackError::Validation(msg) => msg.clone(),
            FeedbackError::Server { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(MSG_SERVER_FALLBACK)
                .to_string(),
            FeedbackError::Transport(_) => MSG_NETWORK.to_string(),
            FeedbackError::Decode(_) | FeedbackError::Dom(_) => MSG_SERVER_FALLBACK.to_string(),
        }
    }
}

impl From<serde_json::Error> for FeedbackError {
    fn from(e: serde_json::Error) -> Self {
        FeedbackError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedbackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_backend_text() {
        let e = FeedbackError::Server {
            status: 429,
            message: Some("Please wait 3 more minute(s) before submitting again".into()),
        };
        assert_eq!(
            e.user_message(),
            "Please wait 3 more minute(s) before submitting again"
        );

        let blank = FeedbackError::Server {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), MSG_SERVER_FALLBACK);
    }

    #[test]
    fn transport_maps_to_connectivity_message() {
        let e = FeedbackError::Transport("TypeError: Failed to fetch".into());
        assert_eq!(e.user_message(), MSG_NETWORK);
        assert_eq!(
            FeedbackError::missing_overall().user_message(),
            MSG_MISSING_OVERALL
        );
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A call to the recipe provider failed: non-success status, network
    /// failure or an undecodable body.
    #[error("{operation} failed: {reason}")]
    Fetch {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn fetch(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::Fetch {
            operation,
            reason: reason.into(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Fetch { .. })
    }

    /// HTTP status used when this error reaches a handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Fetch { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            Error::Fetch { operation, reason } => {
                if mentions_secret(reason) {
                    format!("{operation} failed (details redacted)")
                } else {
                    format!("{operation} failed: {reason}")
                }
            }
            Error::Internal(msg) => {
                if mentions_secret(msg) {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}

fn mentions_secret(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("apikey")
        || lower.contains("api_key")
        || lower.contains("secret")
        || lower.contains("token")
}

// JSON error bodies for the API routes; pages use `web::PageError`
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let status = self.status_code();
        let error_message = match &self {
            Error::Fetch { .. } => "Recipe provider request failed",
            _ => "Internal server error",
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

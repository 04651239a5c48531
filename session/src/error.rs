//! Error taxonomy for auth, API and token storage failures.
//!
//! Untrusted popup messages are not errors; they surface as
//! [`crate::MessageDisposition::Ignored`]. A duplicate completion callback has
//! no representation at all.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a token validation call. Callers must drop the token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request never produced a response (offline, DNS, CORS).
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("incorrect response status code: {status}; text: {message}")]
    Rejected { status: u16, message: String },
    /// Success status, but the profile body could not be read.
    #[error("invalid profile response: {0}")]
    Decode(String),
}

impl AuthError {
    /// Build a rejection from a non-success response.
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected {
            status,
            message: server_message(status, body),
        }
    }
}

/// Failure of a REST call other than token validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    /// The backend does not accept the session token (HTTP 401).
    #[error("not authenticated")]
    Unauthorized,
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        Self::Status {
            status,
            message: server_message(status, body),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Failure to persist or remove the token.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    #[error("token storage io: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the human-readable message from an error body.
///
/// The backend answers errors with `{"error": "..."}`; anything else is used
/// verbatim, and an empty body falls back to the status code.
pub(crate) fn server_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return message.to_owned();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_owned()
    }
}

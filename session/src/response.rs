//! Transport-independent response decoding.
//!
//! Each HTTP stack (`gloo-net` in the browser, `reqwest` in the CLI) reduces a
//! response to `(status, body)` and hands it here, so status classification
//! and body parsing behave identically everywhere.

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, AuthError};
use crate::types::{EntryPublic, UserProfile};

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode a JSON body, classifying non-success statuses as [`ApiError`].
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for 401, [`ApiError::Status`] for other
/// non-success statuses, and [`ApiError::Decode`] for unreadable bodies.
pub fn decode_json<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(ApiError::from_status(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a lookup response. A 404 is an ordinary "no such link" answer.
///
/// # Errors
///
/// Same as [`decode_json`] for every status other than 404.
pub fn decode_lookup(status: u16, body: &str) -> Result<Option<EntryPublic>, ApiError> {
    if status == 404 {
        return Ok(None);
    }
    decode_json(status, body).map(Some)
}

/// Decode a response whose body carries nothing of interest.
///
/// # Errors
///
/// Returns the classified error for non-success statuses.
pub fn expect_success(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(ApiError::from_status(status, body))
    }
}

/// Decode the token-check response into a profile.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] for any non-success status and
/// [`AuthError::Decode`] for an unreadable success body.
pub fn decode_check(status: u16, body: &str) -> Result<UserProfile, AuthError> {
    if !is_success(status) {
        return Err(AuthError::rejected(status, body));
    }
    serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))
}

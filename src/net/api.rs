//! REST API helpers for communicating with the shortener backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Network`], since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call reduces the response to `(status, body)` and hands it to
//! `session::response`, so status classification matches the CLI exactly.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::{
    ApiError, AuthBackend, AuthError, AuthInfo, CreateRequest, CreateResponse, EntryPublic,
    RecentEntries, Token, UserProfile, Visitor,
};

#[cfg(feature = "csr")]
use session::{CheckRequest, IdRequest, endpoints, response};

#[cfg(not(feature = "csr"))]
const NO_BROWSER: &str = "not available outside the browser";

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "csr")]
async fn exchange(
    request: Result<gloo_net::http::Request, gloo_net::Error>,
) -> Result<(u16, String), String> {
    let response = request
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    let body = response.text().await.map_err(|e| e.to_string())?;
    Ok((status, body))
}

#[cfg(feature = "csr")]
fn get(url: &str, token: Option<&Token>) -> Result<gloo_net::http::Request, gloo_net::Error> {
    let builder = gloo_net::http::Request::get(url);
    match token {
        Some(token) => builder.header(endpoints::AUTHORIZATION, token.as_str()).build(),
        None => builder.build(),
    }
}

#[cfg(feature = "csr")]
fn post_json<T: serde::Serialize>(
    url: &str,
    token: Option<&Token>,
    body: &T,
) -> Result<gloo_net::http::Request, gloo_net::Error> {
    let builder = gloo_net::http::Request::post(url);
    match token {
        Some(token) => builder.header(endpoints::AUTHORIZATION, token.as_str()).json(body),
        None => builder.json(body),
    }
}

// =============================================================================
// PUBLIC ENDPOINTS
// =============================================================================

/// Fetch the server configuration from `/api/v1/info`.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a non-success status.
pub async fn fetch_info(origin: &str) -> Result<AuthInfo, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(get(&endpoints::url(origin, endpoints::INFO), None))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = origin;
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

/// Validate `token` with `POST /api/v1/auth/check`.
///
/// # Errors
///
/// Returns [`AuthError`] for every non-success outcome.
pub async fn check_token(origin: &str, token: &Token) -> Result<UserProfile, AuthError> {
    #[cfg(feature = "csr")]
    {
        let body = CheckRequest {
            token: token.as_str(),
        };
        let (status, text) = exchange(post_json(
            &endpoints::url(origin, endpoints::AUTH_CHECK),
            None,
            &body,
        ))
        .await
        .map_err(AuthError::Network)?;
        response::decode_check(status, &text)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (origin, token);
        Err(AuthError::Network(NO_BROWSER.to_owned()))
    }
}

/// Public origin used in displayed short links (`/displayurl`).
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a non-success status.
pub async fn display_url(origin: &str) -> Result<String, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(get(&endpoints::url(origin, endpoints::DISPLAY_URL), None))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = origin;
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

// =============================================================================
// PROTECTED ENDPOINTS
// =============================================================================

/// Create a short link.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the token is refused.
pub async fn create_link(
    origin: &str,
    token: &Token,
    request: &CreateRequest,
) -> Result<CreateResponse, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(post_json(
            &endpoints::url(origin, endpoints::CREATE),
            Some(token),
            request,
        ))
        .await
        .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (origin, token, request);
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

/// Look up a short link by id. `Ok(None)` means no such link.
///
/// # Errors
///
/// Returns [`ApiError`] for failures other than "not found".
pub async fn lookup_link(
    origin: &str,
    token: &Token,
    id: &str,
) -> Result<Option<EntryPublic>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(post_json(
            &endpoints::url(origin, endpoints::LOOKUP),
            Some(token),
            &IdRequest { id },
        ))
        .await
        .map_err(ApiError::Network)?;
        response::decode_lookup(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (origin, token, id);
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

/// Links recently created by the current user, keyed by id.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the token is refused.
pub async fn recent_links(origin: &str, token: &Token) -> Result<RecentEntries, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(get(
            &endpoints::url(origin, endpoints::RECENT),
            Some(token),
        ))
        .await
        .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (origin, token);
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

/// Recorded visits of one link.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the token is refused.
pub async fn link_visitors(
    origin: &str,
    token: &Token,
    id: &str,
) -> Result<Vec<Visitor>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(post_json(
            &endpoints::url(origin, endpoints::VISITORS),
            Some(token),
            &IdRequest { id },
        ))
        .await
        .map_err(ApiError::Network)?;
        // The backend encodes "no visitors yet" as `null`.
        response::decode_json::<Option<Vec<Visitor>>>(status, &body)
            .map(Option::unwrap_or_default)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (origin, token, id);
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

/// Follow a link's deletion URL.
///
/// # Errors
///
/// Returns [`ApiError`] when the backend refuses the deletion.
pub async fn delete_link(deletion_url: &str, token: &Token) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let (status, body) = exchange(get(deletion_url, Some(token)))
            .await
            .map_err(ApiError::Network)?;
        response::expect_success(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (deletion_url, token);
        Err(ApiError::Network(NO_BROWSER.to_owned()))
    }
}

// =============================================================================
// AUTH BACKEND
// =============================================================================

/// [`AuthBackend`] over `gloo-net`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpBackend {
    origin: String,
}

impl HttpBackend {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl AuthBackend for HttpBackend {
    async fn fetch_info(&self) -> Result<AuthInfo, ApiError> {
        fetch_info(&self.origin).await
    }

    async fn check_token(&self, token: &Token) -> Result<UserProfile, AuthError> {
        check_token(&self.origin, token).await
    }
}

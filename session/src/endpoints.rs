//! REST paths of the shortener backend.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use crate::types::Provider;

pub const INFO: &str = "/api/v1/info";
pub const AUTH_CHECK: &str = "/api/v1/auth/check";
pub const CREATE: &str = "/api/v1/protected/create";
pub const LOOKUP: &str = "/api/v1/protected/lookup";
pub const RECENT: &str = "/api/v1/protected/recent";
pub const VISITORS: &str = "/api/v1/protected/visitors";
pub const DISPLAY_URL: &str = "/displayurl";

/// Header carrying the raw token on protected requests.
pub const AUTHORIZATION: &str = "Authorization";

/// Join an origin (scheme + host, optional trailing slash) with an absolute path.
///
/// An empty origin yields the bare path, which browsers resolve against the
/// current page.
#[must_use]
pub fn url(origin: &str, path: &str) -> String {
    format!("{}{path}", origin.trim_end_matches('/'))
}

/// Path that starts the provider-specific login redirect dance.
#[must_use]
pub fn login_path(provider: Provider) -> String {
    format!("/api/v1/auth/{}/login", provider.id())
}

/// Absolute login URL opened in the auth popup.
#[must_use]
pub fn login_url(origin: &str, provider: Provider) -> String {
    url(origin, &login_path(provider))
}

/// Reduce user input to a short id.
///
/// Accepts either the bare id or the full short URL as displayed by the
/// server (`{display_url}/{id}`).
#[must_use]
pub fn short_id_from_input(display_url: &str, input: &str) -> String {
    let input = input.trim();
    let prefix = display_url.trim_end_matches('/');
    if prefix.is_empty() {
        return input.to_owned();
    }
    input
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(input)
        .to_owned()
}

/// Public short URL for `id` under the server's display URL.
#[must_use]
pub fn short_url(display_url: &str, id: &str) -> String {
    format!("{}/{id}", display_url.trim_end_matches('/'))
}

//! Client configuration resolved once at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use session::HandshakeConfig;

/// localStorage key holding the session token.
pub const DEFAULT_TOKEN_KEY: &str = "token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin. Empty means "same origin as the page".
    pub origin: String,
    pub token_key: String,
    pub handshake: HandshakeConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            handshake: HandshakeConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for the page the app is running in.
    ///
    /// The backend serves the client, so the page origin is the API origin.
    pub fn detect() -> Self {
        Self {
            origin: page_origin().unwrap_or_default(),
            ..Self::default()
        }
    }
}

fn page_origin() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        match web_sys::window()?.location().origin() {
            Ok(origin) => Some(origin),
            Err(e) => {
                log::warn!("could not read page origin: {e:?}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

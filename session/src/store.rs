//! Session Store: the single owner of the persisted token.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is constructed per application instance and handed to every
//! consumer. Nothing else writes the token: the handshake coordinator delivers
//! through [`TokenSink`], UI code calls [`SessionStore::logout`], and failed
//! protected calls go through [`SessionStore::guard`].
//!
//! LIFECYCLE
//! =========
//! Created by a completed handshake, validated on every load and after every
//! login, destroyed by logout or by any rejected validation.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::error::{ApiError, AuthError, StorageError};
use crate::handshake::TokenSink;
use crate::storage::TokenStorage;
use crate::types::{AuthInfo, AuthState, Token, UserProfile};

/// Stored in place of a real token when an upstream proxy authenticates.
///
/// The check endpoint ignores the value in proxy mode; it only has to exist so
/// the regular validation path runs.
pub const PROXY_PLACEHOLDER_TOKEN: &str = "proxy";

/// Validation attempts before a check gives up on storage that keeps changing.
const MAX_CHECK_ROUNDS: usize = 3;

/// Async transport to the auth endpoints of the backend.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// `GET /api/v1/info`.
    async fn fetch_info(&self) -> Result<AuthInfo, ApiError>;

    /// `POST /api/v1/auth/check` with `{ Token }`.
    async fn check_token(&self, token: &Token) -> Result<UserProfile, AuthError>;
}

/// Result of [`SessionStore::check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing stored; show the provider picker.
    NoToken,
    Authenticated(UserProfile),
    /// The stored token was refused and has already been cleared.
    Rejected(AuthError),
}

impl CheckOutcome {
    /// The auth state the UI should switch to.
    #[must_use]
    pub fn state(&self) -> AuthState {
        match self {
            Self::Authenticated(profile) => AuthState::Authenticated(profile.clone()),
            Self::NoToken | Self::Rejected(_) => AuthState::Unauthenticated,
        }
    }
}

/// Persisted session token plus the backend used to validate it.
#[derive(Debug)]
pub struct SessionStore<S, B> {
    storage: S,
    backend: B,
}

impl<S, B> SessionStore<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        Self { storage, backend }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<S: TokenStorage, B> SessionStore<S, B> {
    /// Read the persisted token. Never fails; an empty value counts as absent.
    pub fn get_token(&self) -> Option<Token> {
        self.storage
            .read()
            .filter(|raw| !raw.is_empty())
            .map(Token::from)
    }

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage backend refuses the write.
    pub fn set_token(&self, token: &Token) -> Result<(), StorageError> {
        self.storage.write(token.as_str())
    }

    /// Remove the persisted token. Safe to call when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage backend refuses the removal.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove()
    }

    /// Explicit user logout.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::clear_token`].
    pub fn logout(&self) -> Result<(), StorageError> {
        log::info!("logging out");
        self.clear_token()
    }

    /// Pass an API result through, dropping the token if the backend answered
    /// "not authenticated".
    pub fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if matches!(result, Err(ApiError::Unauthorized)) {
            log::info!("backend refused the session token; clearing it");
            if let Err(e) = self.clear_token() {
                log::warn!("failed to clear rejected token: {e}");
            }
        }
        result
    }

    /// Store the proxy placeholder when the backend delegates auth to a proxy
    /// and no token is stored yet. Returns whether a placeholder was written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the placeholder cannot be written.
    pub fn ensure_proxy_token(&self, info: &AuthInfo) -> Result<bool, StorageError> {
        if !info.uses_proxy() || self.get_token().is_some() {
            return Ok(false);
        }
        self.set_token(&Token::from(PROXY_PLACEHOLDER_TOKEN))?;
        Ok(true)
    }
}

impl<S: TokenStorage, B: AuthBackend> SessionStore<S, B> {
    /// Ask the backend whether `token` is valid. Retrying is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on any non-success outcome, network failures
    /// included. The caller must treat the token as dead.
    pub async fn validate(&self, token: &Token) -> Result<UserProfile, AuthError> {
        self.backend.check_token(token).await
    }

    /// Validate whatever token is stored and settle the auth state.
    ///
    /// Only the token that was actually sent to the backend can authenticate.
    /// When storage changes while a check is in flight, the newer token is
    /// checked instead. A rejected token is cleared before this returns.
    pub async fn check(&self) -> CheckOutcome {
        let Some(mut token) = self.get_token() else {
            return CheckOutcome::NoToken;
        };
        for _ in 0..MAX_CHECK_ROUNDS {
            let verdict = self.validate(&token).await;
            match self.get_token() {
                None => {
                    log::debug!("logged out while validating; dropping result");
                    return CheckOutcome::NoToken;
                }
                Some(current) if current != token => {
                    log::debug!("token replaced during validation; checking the newer one");
                    token = current;
                    continue;
                }
                Some(_) => {}
            }
            return match verdict {
                Ok(profile) => {
                    log::debug!("session valid for {}", profile.name);
                    CheckOutcome::Authenticated(profile)
                }
                Err(err) => {
                    log::warn!("session token rejected: {err}");
                    if let Err(e) = self.clear_token() {
                        log::warn!("failed to clear rejected token: {e}");
                    }
                    CheckOutcome::Rejected(err)
                }
            };
        }
        log::warn!("token kept changing during validation; treating session as absent");
        CheckOutcome::NoToken
    }
}

impl<S: TokenStorage, B> TokenSink for SessionStore<S, B> {
    fn accept_token(&self, token: Token) -> Result<(), StorageError> {
        self.set_token(&token)
    }
}

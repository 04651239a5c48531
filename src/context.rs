//! Application context shared by every component.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root component builds one [`AppContext`] and provides it. It bundles the
//! reactive state with the single [`WebSessionStore`], so components never
//! construct stores of their own and every token write goes through one owner.
//!
//! FLOWS
//! =====
//! - `bootstrap`: info fetch, proxy placeholder, then token check.
//! - `refresh_auth`: token check after load or after a popup delivered a token.
//! - `with_session`: protected calls; a 401 clears the token and returns the
//!   user to the provider picker.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use session::{ApiError, AuthBackend, CheckOutcome, Provider, SessionStore, Token};

use crate::config::ClientConfig;
use crate::net::api::HttpBackend;
use crate::state::auth::{AuthSession, LoginIntent};
use crate::state::notice::{NoticeLevel, NoticeState};
use crate::util::storage::LocalStorage;

pub type WebSessionStore = SessionStore<LocalStorage, HttpBackend>;

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Clone, Copy)]
pub struct AppContext {
    pub auth: RwSignal<AuthSession>,
    pub notices: RwSignal<NoticeState>,
    /// Latest login request from the picker; the popup driver reacts to it.
    pub login_intent: RwSignal<Option<LoginIntent>>,
    store: StoredValue<Arc<WebSessionStore>>,
    config: StoredValue<ClientConfig>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let store = SessionStore::new(
            LocalStorage::new(config.token_key.clone()),
            HttpBackend::new(config.origin.clone()),
        );
        Self {
            auth: RwSignal::new(AuthSession::default()),
            notices: RwSignal::new(NoticeState::default()),
            login_intent: RwSignal::new(None),
            store: StoredValue::new(Arc::new(store)),
            config: StoredValue::new(config),
        }
    }

    pub fn store(&self) -> Arc<WebSessionStore> {
        self.store.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn origin(&self) -> String {
        self.config.with_value(|config| config.origin.clone())
    }

    /// Origin shown in short links; falls back to the API origin.
    pub async fn display_origin(self) -> String {
        match crate::net::api::display_url(&self.origin()).await {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) => self.origin(),
            Err(err) => {
                log::debug!("no display url: {err}");
                self.origin()
            }
        }
    }

    // =========================================================================
    // NOTICES
    // =========================================================================

    /// Show a transient notice.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => log::warn!("{message}"),
            NoticeLevel::Info => log::info!("{message}"),
        }
        let id = self.notices.try_update(|notices| notices.push(level, message));

        #[cfg(feature = "csr")]
        if let Some(id) = id {
            let notices = self.notices;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(crate::state::notice::NOTICE_TTL).await;
                notices.update(|notices| notices.dismiss(id));
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = id;
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Error, message);
    }

    // =========================================================================
    // SESSION FLOWS
    // =========================================================================

    /// Load server info, then settle the auth state.
    pub async fn bootstrap(self) {
        let store = self.store();
        let info = match store.backend().fetch_info().await {
            Ok(info) => info,
            Err(err) => {
                self.error(format!("Could not fetch info: {err}"));
                self.auth.update(AuthSession::fail_info);
                return;
            }
        };
        match store.ensure_proxy_token(&info) {
            Ok(true) => log::info!("authentication delegated to proxy"),
            Ok(false) => {}
            Err(err) => self.error(format!("Could not start proxy session: {err}")),
        }
        self.auth.update(|session| session.finish_info(info));
        self.refresh_auth().await;
    }

    /// Validate the stored token and publish the result.
    pub async fn refresh_auth(self) {
        let store = self.store();
        if store.get_token().is_some() {
            self.auth.update(AuthSession::begin_validation);
        }
        let outcome = store.check().await;
        if let CheckOutcome::Rejected(err) = &outcome {
            self.error(format!("Could not fetch check: {err}"));
        }
        self.auth.update(|session| session.finish_check(&outcome));
    }

    /// Ask the popup driver to log in with `provider`.
    pub fn request_login(&self, provider: Provider) {
        self.login_intent
            .update(|intent| *intent = Some(LoginIntent::next(*intent, provider)));
    }

    /// Explicit logout from the user menu.
    pub fn logout(&self) {
        if let Err(err) = self.store().logout() {
            self.error(format!("Could not clear session: {err}"));
        }
        self.auth.update(AuthSession::logged_out);
    }

    /// Run a protected call with the stored token.
    ///
    /// Failures are reported as notices before being returned.
    ///
    /// # Errors
    ///
    /// Returns the call's [`ApiError`], or [`ApiError::Unauthorized`] when no
    /// token is stored.
    pub async fn with_session<T, F, Fut>(self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(String, Token) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let store = self.store();
        let result = match store.get_token() {
            Some(token) => store.guard(call(self.origin(), token).await),
            None => Err(ApiError::Unauthorized),
        };
        if let Err(err) = &result {
            self.auth.update(|session| session.observe_api_error(err));
            if err.is_unauthorized() {
                self.error(SESSION_EXPIRED);
            } else {
                self.error(err.to_string());
            }
        }
        result
    }
}

//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held in an `RwSignal` provided by the root component. The provider picker,
//! the user menu and every protected page derive what they render from it; only
//! `context` functions write it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{ApiError, AuthInfo, AuthState, CheckOutcome, Provider, UserProfile};

/// Server info plus the derived login state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSession {
    /// `None` until `/api/v1/info` answers.
    pub info: Option<AuthInfo>,
    pub info_failed: bool,
    pub auth: AuthState,
}

/// What the unauthenticated screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerView {
    Loading,
    /// `/api/v1/info` failed; nothing to offer.
    Unavailable,
    /// A stored token is being checked.
    Validating,
    /// Auth is delegated to an upstream proxy.
    Proxy,
    /// The server has no working provider credentials.
    Empty,
    Providers(Vec<Provider>),
}

/// A login request from the picker. `attempt` makes repeated clicks on the
/// same provider distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginIntent {
    pub provider: Provider,
    pub attempt: u64,
}

impl LoginIntent {
    /// The intent that follows `previous`.
    pub fn next(previous: Option<Self>, provider: Provider) -> Self {
        Self {
            provider,
            attempt: previous.map_or(1, |intent| intent.attempt + 1),
        }
    }
}

impl AuthSession {
    pub fn finish_info(&mut self, info: AuthInfo) {
        self.info = Some(info);
        self.info_failed = false;
    }

    pub fn fail_info(&mut self) {
        self.info_failed = true;
    }

    pub fn begin_validation(&mut self) {
        self.auth = AuthState::Validating;
    }

    pub fn finish_check(&mut self, outcome: &CheckOutcome) {
        self.auth = outcome.state();
    }

    pub fn logged_out(&mut self) {
        self.auth = AuthState::Unauthenticated;
    }

    /// A protected call failed; a 401 means the session is gone.
    pub fn observe_api_error(&mut self, err: &ApiError) {
        if err.is_unauthorized() {
            self.logged_out();
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.auth.profile()
    }

    pub fn uses_proxy(&self) -> bool {
        self.info.as_ref().is_some_and(AuthInfo::uses_proxy)
    }

    /// Logout makes no sense when a proxy re-authenticates every request.
    pub fn can_logout(&self) -> bool {
        self.is_authenticated() && !self.uses_proxy()
    }

    pub fn picker_view(&self) -> PickerView {
        if self.info_failed {
            return PickerView::Unavailable;
        }
        let Some(info) = &self.info else {
            return PickerView::Loading;
        };
        if self.auth == AuthState::Validating {
            return PickerView::Validating;
        }
        if info.uses_proxy() {
            return PickerView::Proxy;
        }
        match info.login_providers() {
            providers if providers.is_empty() => PickerView::Empty,
            providers => PickerView::Providers(providers),
        }
    }
}

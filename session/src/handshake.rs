//! OAuth Handshake Coordinator: popup login as an explicit state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login happens in a popup window pointed at `/api/v1/auth/{provider}/login`.
//! When the provider dance finishes, the callback page posts the session token
//! back to the opener window. The coordinator owns the popup handle and the
//! message subscription, and hands exactly one token to a [`TokenSink`].
//!
//! STATES
//! ======
//! ```text
//! Idle ──start──▶ AwaitingCallback ──trusted message──▶ Completed
//!                    │     ▲
//!                    │     └─start (reuses open popup)
//!                    └──popup closed / timeout / dispose──▶ Abandoned
//! ```
//! The subscription lives inside `AwaitingCallback`. Leaving that state is the
//! only way to release it, so a second completion message always finds a state
//! with nothing to deliver to.

#[cfg(test)]
#[path = "handshake_test.rs"]
mod handshake_test;

use std::time::Duration;

use serde_json::Value;

use crate::endpoints;
use crate::error::StorageError;
use crate::geometry::{PopupGeometry, ScreenSize};
use crate::types::{Provider, Token};

// =============================================================================
// ENVIRONMENT SEAMS
// =============================================================================

/// Receiver of the token produced by a completed handshake.
pub trait TokenSink {
    /// Take ownership of a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the token cannot be persisted.
    fn accept_token(&self, token: Token) -> Result<(), StorageError>;
}

/// Handle to an opened popup window.
pub trait PopupWindow {
    fn is_closed(&self) -> bool;
    fn navigate(&self, url: &str);
    fn close(&self);
}

/// The window hosting the application.
pub trait PopupHost {
    type Popup: PopupWindow;

    /// Origin of the application, e.g. `https://s.example.com`.
    fn app_origin(&self) -> String;

    fn screen_size(&self) -> ScreenSize;

    /// Open a popup. `None` means the browser blocked it.
    fn open_popup(&mut self, url: &str, geometry: &PopupGeometry) -> Option<Self::Popup>;

    /// Start delivering cross-window messages to the coordinator.
    fn subscribe(&mut self) -> SubscriptionId;

    fn unsubscribe(&mut self, subscription: SubscriptionId);
}

/// Identifies one registered message listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A cross-window message as seen by the hosting window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowMessage {
    /// Set by the browser for messages it dispatched itself.
    pub is_trusted: bool,
    /// Origin of the sending window.
    pub origin: String,
    pub data: Value,
}

// =============================================================================
// CONFIG + STATE
// =============================================================================

/// Popup size and abandonment detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeConfig {
    pub popup_width: u32,
    pub popup_height: u32,
    /// How often the host should call [`HandshakeCoordinator::tick`].
    pub closed_poll_interval: Duration,
    /// Give up after this long even if the popup stays open. `None` waits for
    /// as long as the popup is open.
    pub timeout: Option<Duration>,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            popup_width: 400,
            popup_height: 500,
            closed_poll_interval: Duration::from_millis(500),
            timeout: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    Idle,
    AwaitingCallback {
        provider: Provider,
        subscription: SubscriptionId,
        /// Time accumulated through [`HandshakeCoordinator::tick`].
        waited: Duration,
    },
    Completed {
        provider: Provider,
    },
    Abandoned {
        provider: Provider,
        reason: AbandonReason,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbandonReason {
    PopupBlocked,
    PopupClosed,
    TimedOut,
    Disposed,
}

/// What [`HandshakeCoordinator::start`] did with the popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Opened,
    /// An open popup was pointed at the new login URL.
    Navigated,
    Blocked,
}

/// What [`HandshakeCoordinator::handle_message`] did with a message.
#[derive(Debug)]
pub enum MessageDisposition {
    Ignored(IgnoreReason),
    /// The token reached the sink; the caller should validate it next.
    Delivered(Provider),
    /// The handshake completed but the sink could not keep the token.
    StoreFailed(StorageError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    NotAwaiting,
    Untrusted,
    ForeignOrigin,
    InvalidPayload,
}

// =============================================================================
// COORDINATOR
// =============================================================================

pub struct HandshakeCoordinator<H: PopupHost> {
    host: H,
    config: HandshakeConfig,
    state: HandshakeState,
    popup: Option<H::Popup>,
}

impl<H: PopupHost> HandshakeCoordinator<H> {
    pub fn new(host: H, config: HandshakeConfig) -> Self {
        Self {
            host,
            config,
            state: HandshakeState::Idle,
            popup: None,
        }
    }

    pub fn state(&self) -> &HandshakeState {
        &self.state
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, HandshakeState::AwaitingCallback { .. })
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    /// Begin (or redirect) a login for `provider`.
    ///
    /// An open popup is reused by navigating it; a missing or closed one is
    /// replaced. At most one listener is registered however often this runs.
    pub fn start(&mut self, provider: Provider) -> StartOutcome {
        let url = endpoints::login_url(&self.host.app_origin(), provider);

        let outcome = match self.popup.as_ref().filter(|popup| !popup.is_closed()) {
            Some(popup) => {
                popup.navigate(&url);
                StartOutcome::Navigated
            }
            None => {
                let geometry = PopupGeometry::centered(
                    self.host.screen_size(),
                    self.config.popup_width,
                    self.config.popup_height,
                );
                if let Some(popup) = self.host.open_popup(&url, &geometry) {
                    self.popup = Some(popup);
                    StartOutcome::Opened
                } else {
                    log::warn!("auth popup for {provider} was blocked");
                    self.popup = None;
                    self.finish(HandshakeState::Abandoned {
                        provider,
                        reason: AbandonReason::PopupBlocked,
                    });
                    return StartOutcome::Blocked;
                }
            }
        };

        if let HandshakeState::AwaitingCallback {
            provider: current,
            waited,
            ..
        } = &mut self.state
        {
            *current = provider;
            *waited = Duration::ZERO;
        } else {
            let subscription = self.host.subscribe();
            self.state = HandshakeState::AwaitingCallback {
                provider,
                subscription,
                waited: Duration::ZERO,
            };
        }

        log::debug!("login via {provider} started ({outcome:?})");
        outcome
    }

    /// Feed one cross-window message to the coordinator.
    pub fn handle_message<K>(&mut self, message: &WindowMessage, sink: &K) -> MessageDisposition
    where
        K: TokenSink + ?Sized,
    {
        let HandshakeState::AwaitingCallback { provider, .. } = &self.state else {
            return MessageDisposition::Ignored(IgnoreReason::NotAwaiting);
        };
        let provider = *provider;

        let token = match self.screen(message) {
            Ok(token) => Token::from(token),
            Err(reason) => {
                log::debug!("ignoring window message: {reason:?}");
                return MessageDisposition::Ignored(reason);
            }
        };

        // Unsubscribe before the sink sees anything.
        self.finish(HandshakeState::Completed { provider });
        self.popup = None;

        match sink.accept_token(token) {
            Ok(()) => {
                log::info!("login via {provider} completed");
                MessageDisposition::Delivered(provider)
            }
            Err(err) => {
                log::warn!("login via {provider} completed but the token was not stored: {err}");
                MessageDisposition::StoreFailed(err)
            }
        }
    }

    /// Advance the abandonment clock. Hosts call this every
    /// [`HandshakeConfig::closed_poll_interval`] while a login is pending.
    pub fn tick(&mut self, elapsed: Duration) -> Option<AbandonReason> {
        let HandshakeState::AwaitingCallback {
            provider, waited, ..
        } = &mut self.state
        else {
            return None;
        };
        *waited = waited.saturating_add(elapsed);
        let (provider, waited) = (*provider, *waited);

        let reason = if self.popup.as_ref().is_none_or(|popup| popup.is_closed()) {
            AbandonReason::PopupClosed
        } else if self.config.timeout.is_some_and(|limit| waited >= limit) {
            AbandonReason::TimedOut
        } else {
            return None;
        };
        self.abandon(provider, reason);
        Some(reason)
    }

    /// Release the listener and forget the popup.
    pub fn dispose(&mut self) {
        if let HandshakeState::AwaitingCallback { provider, .. } = &self.state {
            let provider = *provider;
            self.abandon(provider, AbandonReason::Disposed);
        } else {
            self.popup = None;
        }
    }

    fn screen<'m>(&self, message: &'m WindowMessage) -> Result<&'m str, IgnoreReason> {
        if !message.is_trusted {
            return Err(IgnoreReason::Untrusted);
        }
        let expected = self.host.app_origin();
        if message.origin.trim_end_matches('/') != expected.trim_end_matches('/') {
            return Err(IgnoreReason::ForeignOrigin);
        }
        match message.data.as_str() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(IgnoreReason::InvalidPayload),
        }
    }

    fn abandon(&mut self, provider: Provider, reason: AbandonReason) {
        log::info!("login via {provider} abandoned: {reason:?}");
        self.finish(HandshakeState::Abandoned { provider, reason });
        if let Some(popup) = self.popup.take() {
            if matches!(reason, AbandonReason::TimedOut | AbandonReason::Disposed) {
                popup.close();
            }
        }
    }

    fn finish(&mut self, next: HandshakeState) {
        let previous = std::mem::replace(&mut self.state, next);
        if let HandshakeState::AwaitingCallback { subscription, .. } = previous {
            self.host.unsubscribe(subscription);
        }
    }
}

impl<H: PopupHost> Drop for HandshakeCoordinator<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

//! Session core for the URL shortener client.
//!
//! This crate owns everything about "am I logged in, and as whom" that does
//! not depend on a browser or an HTTP stack: the wire types shared with the
//! backend, the persisted-token [`SessionStore`], and the popup-based
//! [`HandshakeCoordinator`] that drives provider login.
//!
//! ARCHITECTURE
//! ============
//! Environment concerns sit behind three traits so the same state machines run
//! in the browser, in the CLI, and in tests:
//!
//! - [`TokenStorage`]: synchronous key/value slot for the token.
//! - [`AuthBackend`]: async transport for `/api/v1/info` and token checks.
//! - [`PopupHost`]: window opening and message-listener registration.

pub mod endpoints;
pub mod error;
pub mod geometry;
pub mod handshake;
pub mod response;
pub mod sharex;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{ApiError, AuthError, StorageError};
pub use geometry::{PopupGeometry, ScreenSize};
pub use handshake::{
    AbandonReason, HandshakeConfig, HandshakeCoordinator, HandshakeState, IgnoreReason,
    MessageDisposition, PopupHost, PopupWindow, StartOutcome, SubscriptionId, TokenSink,
    WindowMessage,
};
pub use sharex::ShareXConfig;
pub use storage::{MemoryStorage, TokenStorage};
pub use store::{AuthBackend, CheckOutcome, PROXY_PLACEHOLDER_TOKEN, SessionStore};
pub use types::{
    AuthInfo, AuthState, CheckRequest, CreateRequest, CreateResponse, EntryPublic, IdRequest,
    Provider, RecentEntries, RecentEntry, Token, UserProfile, Visitor,
};

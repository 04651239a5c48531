//! Browser glue behind the `session` traits.

#[cfg(feature = "csr")]
pub mod popup;
pub mod storage;
pub mod time;

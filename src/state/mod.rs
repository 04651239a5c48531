//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Plain structs updated through `RwSignal::update`, so every transition is a
//! method that tests can call without a reactive runtime.

pub mod auth;
pub mod notice;

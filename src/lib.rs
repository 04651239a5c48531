//! # shortener-web
//!
//! Leptos single-page client for the URL shortener.
//!
//! Session and login logic lives in the `session` crate; this crate wires it
//! to the browser (localStorage, `window.open`, `message` events, `gloo-net`)
//! and renders the provider picker and the authenticated shell. Everything
//! browser-specific is gated on the `csr` feature so the view models build and
//! test natively.

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}

//! Network layer: REST calls and the browser [`session::AuthBackend`].

pub mod api;

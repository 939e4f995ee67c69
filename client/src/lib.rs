//! # client
//!
//! Leptos + WASM single-page frontend for the chat application.
//!
//! This crate wires the target-independent `session` core into the browser:
//! `localStorage` token persistence, a `gloo-net` transport, the router with
//! its navigation guard, and the route pages. Browser-only code is gated
//! behind the `csr` feature so the crate still builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}

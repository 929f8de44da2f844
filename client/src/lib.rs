//! # client
//!
//! Leptos + WASM frontend for Splito, the bill-splitting app.
//!
//! Pages, components and view state live here. Everything that touches the
//! persisted session goes through the `session` crate's controller, backed by
//! browser cookies (`util::browser_store`) and a `gloo-net` AuthAPI transport
//! (`net::api`).

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

//! # client
//!
//! Leptos + WASM frontend for Deskboard: a login page and a dashboard of
//! draggable panels (missions, agenda, notes, vault, assistant, profile).
//!
//! Rendered on the server by the `server` crate (`ssr` feature) and hydrated
//! in the browser (`hydrate` feature). Browser-only work (HTTP, storage,
//! notifications, timers) sits behind `#[cfg(feature = "hydrate")]` with
//! no-op fallbacks so both builds share one component tree.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point called by the generated hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

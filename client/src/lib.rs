//! # client
//!
//! Leptos + WASM frontend for Flow 360: the public sign-in / sign-up page and
//! the guarded dashboard.
//!
//! This crate contains pages, components, form and guard state, and the
//! gateway that talks to the hosted identity and document services. The
//! `server` binary renders it with `ssr`; the browser bundle is built with
//! `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point called by the hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

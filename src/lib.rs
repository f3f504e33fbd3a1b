//! # unionvote
//!
//! Leptos + WASM frontend for the student-union voting application.
//!
//! This crate contains pages, components, session and wizard state, the
//! demo data service that stands in for a backend, and the route guard that
//! gates every protected page on the browser session.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

//! Axum host that server-renders the app and serves the hydrate bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built only with the `ssr` feature. `cargo leptos` compiles the library
//! with `hydrate` into `site_root/pkg`; this router renders every route in
//! `App` through `shell` and serves that bundle so the browser can take over.

#[cfg(test)]
#[path = "server_test.rs"]
mod server_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;

use crate::app::{App, shell};

/// Router with the health check, every app route, and the static bundle.
pub fn router(options: LeptosOptions) -> Router {
    let routes = generate_route_list(App);
    let site_root = PathBuf::from(options.site_root.as_ref());
    let pkg_dir = site_root.join(&*options.site_pkg_dir);

    Router::new()
        .route("/healthz", get(healthz))
        .leptos_routes(&options, routes, {
            let options = options.clone();
            move || shell(options.clone())
        })
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .with_state(options)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches Leptos SSR rendering, the compiled client assets under
//! `/pkg`, and the health probe into a single Axum router. The public backend
//! config is provided as Leptos context on every SSR request so the shell can
//! embed it for the hydrated client.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Leptos SSR frontend plus static assets and `/healthz`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section or `LEPTOS_*` variables).
pub fn app(config: &ServerConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);
    tracing::debug!(count = routes.len(), "leptos routes generated");

    let firebase = config.firebase.clone();
    let leptos_router = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(firebase.clone()),
            {
                let opts = leptos_options.clone();
                move || client::app::shell(opts.clone())
            },
        )
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

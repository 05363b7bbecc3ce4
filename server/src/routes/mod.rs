//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the JSON API under `/api`, the Leptos app (SSR +
//! hydration) for every page route, and the compiled WASM/CSS under `/pkg`.

pub mod auth;
pub mod chat;
pub mod events;
pub mod missions;
pub mod profile;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use records::profile::MAX_AVATAR_BYTES;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Above the avatar limit so oversized uploads reach `AvatarUpload::validate`.
const AVATAR_BODY_LIMIT: usize = MAX_AVATAR_BYTES * 2;

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/password", post(auth::change_password))
        .route("/api/auth/recover", post(auth::recover))
        .route("/api/auth/me", get(auth::me))
        .route("/api/missions", get(missions::list_missions).post(missions::create_mission))
        .route(
            "/api/missions/{id}",
            patch(missions::update_mission).delete(missions::delete_mission),
        )
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/{id}", axum::routing::delete(events::delete_event))
        .route("/api/profile", get(profile::get_profile).patch(profile::update_profile))
        .route(
            "/api/profile/avatar",
            post(profile::upload_avatar).layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
        )
        .route("/api/chat", post(chat::chat))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// API routes + Leptos SSR pages + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

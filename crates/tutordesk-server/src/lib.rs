//! HTTP server assembly for tutordesk.
//!
//! Mounts the JSON API from `tutordesk-api` under `/api`, gated by HTTP
//! Basic auth for admin operations. `GET /api/search` is the public-facing
//! tutor search and stays open.

pub mod auth;
pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  body::Body,
  extract::{Request, State},
  http::Method,
  middleware::{self, Next},
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tutordesk_core::store::DirectoryStore;

use auth::{AuthConfig, verify_auth};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  /// PHC string produced by argon2; generate with `--hash-password`.
  pub auth_password_hash: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the router.
#[derive(Clone)]
pub struct AppState<S: DirectoryStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/api/*` with the admin gate applied.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DirectoryStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", tutordesk_api::api_router(state.store.clone()))
    .layer(middleware::from_fn_with_state(state.auth.clone(), admin_gate))
    .layer(TraceLayer::new_for_http())
}

/// Allow/deny gate in front of every `/api` route.
///
/// The public search view passes without credentials; everything else
/// requires HTTP Basic auth against the configured admin account.
async fn admin_gate(
  State(auth): State<Arc<AuthConfig>>,
  req: Request<Body>,
  next: Next,
) -> Response {
  let public =
    req.method() == Method::GET && req.uri().path() == "/api/search";

  if !public {
    if let Err(e) = verify_auth(req.headers(), &auth) {
      return e.into_response();
    }
  }

  next.run(req).await
}

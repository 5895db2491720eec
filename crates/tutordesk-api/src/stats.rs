//! Handler for `GET /stats` — the admin dashboard numbers.

use std::sync::Arc;

use axum::{Json, extract::State};
use tutordesk_core::store::{DirectoryStats, DirectoryStore};

use crate::error::ApiError;

/// `GET /stats`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<DirectoryStats>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = store.stats().await.map_err(ApiError::from_store)?;
  Ok(Json(stats))
}

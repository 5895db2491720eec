//! Handlers for `/tutors` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/tutors` | All tutors, creation order |
//! | `POST`   | `/tutors` | Body: [`NewTutor`]; 201 + stored tutor |
//! | `GET`    | `/tutors/:id` | 404 if not found |
//! | `PUT`    | `/tutors/:id` | Body: [`TutorPatch`]; audits rate changes |
//! | `DELETE` | `/tutors/:id` | Cascades to history and enrollments |
//! | `GET`    | `/tutors/:id/rate-changes` | Audit trail, oldest first |
//! | `POST`   | `/tutors/rate-adjustments` | Bulk percentage adjustment |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tutordesk_core::{
  rate::RateChange,
  store::DirectoryStore,
  tutor::{NewTutor, Tutor, TutorPatch},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /tutors`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Tutor>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutors = store.list_tutors().await.map_err(ApiError::from_store)?;
  Ok(Json(tutors))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /tutors` — returns 201 + the stored tutor.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewTutor>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutor = store.add_tutor(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(tutor)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /tutors/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Tutor>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutor = store
    .get_tutor(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("tutor {id} not found")))?;
  Ok(Json(tutor))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /tutors/:id` — partial update; absent fields are left untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<TutorPatch>,
) -> Result<Json<Tutor>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutor = store
    .update_tutor(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(tutor))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /tutors/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store.delete_tutor(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Rate history ─────────────────────────────────────────────────────────────

/// `GET /tutors/:id/rate-changes` — the audit trail, oldest first.
pub async fn rate_changes<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<RateChange>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // 404 on an unknown tutor rather than an empty list.
  store
    .get_tutor(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("tutor {id} not found")))?;

  let history = store
    .rate_history(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(history))
}

// ─── Bulk rate adjustment ─────────────────────────────────────────────────────

/// JSON body accepted by `POST /tutors/rate-adjustments`.
#[derive(Debug, Deserialize)]
pub struct AdjustRatesBody {
  /// Non-empty selection of tutors to adjust.
  pub tutor_ids:  Vec<Uuid>,
  /// Signed percentage: `10` raises rates by 10%, `-5` lowers them by 5%.
  pub percentage: f64,
}

/// `POST /tutors/rate-adjustments` — all-or-nothing across the selection.
pub async fn adjust_rates<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<AdjustRatesBody>,
) -> Result<Json<Vec<Tutor>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutors = store
    .adjust_rates(&body.tutor_ids, body.percentage)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(tutors))
}

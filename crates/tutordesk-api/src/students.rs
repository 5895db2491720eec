//! Handlers for `/students` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/students` | All students, creation order |
//! | `POST`   | `/students` | Body: [`NewStudent`]; 201 + stored student |
//! | `GET`    | `/students/:id` | 404 if not found |
//! | `PUT`    | `/students/:id` | Body: [`StudentPatch`] |
//! | `DELETE` | `/students/:id` | Cascades to enrollments only |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use tutordesk_core::{
  store::DirectoryStore,
  student::{NewStudent, Student, StudentPatch},
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /students`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = store.list_students().await.map_err(ApiError::from_store)?;
  Ok(Json(students))
}

/// `POST /students` — returns 201 + the stored student.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let student = store.add_student(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(student)))
}

/// `GET /students/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let student = store
    .get_student(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

/// `PUT /students/:id` — partial update; absent fields are left untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StudentPatch>,
) -> Result<Json<Student>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let student = store
    .update_student(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(student))
}

/// `DELETE /students/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store.delete_student(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

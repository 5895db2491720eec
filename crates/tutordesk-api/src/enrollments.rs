//! Handlers for the tutor/student enrollment link.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `PUT`    | `/tutors/:id/students/:student_id` | Link; idempotent |
//! | `DELETE` | `/tutors/:id/students/:student_id` | Unlink; 404 if absent |
//! | `GET`    | `/tutors/:id/students` | Students enrolled with a tutor |
//! | `GET`    | `/students/:id/tutors` | Tutors a student is enrolled with |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use tutordesk_core::{
  enrollment::Enrollment,
  store::DirectoryStore,
  student::Student,
  tutor::Tutor,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `PUT /tutors/:id/students/:student_id`
pub async fn enroll<S>(
  State(store): State<Arc<S>>,
  Path((tutor_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Enrollment>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enrollment = store
    .enroll(tutor_id, student_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(enrollment))
}

/// `DELETE /tutors/:id/students/:student_id`
pub async fn unenroll<S>(
  State(store): State<Arc<S>>,
  Path((tutor_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .unenroll(tutor_id, student_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /tutors/:id/students`
pub async fn students_of<S>(
  State(store): State<Arc<S>>,
  Path(tutor_id): Path<Uuid>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = store
    .students_of(tutor_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(students))
}

/// `GET /students/:id/tutors`
pub async fn tutors_of<S>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<Tutor>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tutors = store
    .tutors_of(student_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(tutors))
}

//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tutordesk_core::Error as CoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Field-scoped validation failure — 422, no state was mutated.
  #[error("invalid {field}: {message}")]
  Validation { field: String, message: String },

  /// Unique-email violation — 409, field-scoped to `email`.
  #[error("email already in use: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a backend error onto the API surface.
  ///
  /// Store backends wrap [`tutordesk_core::Error`] with `#[source]`, so the
  /// domain error is recovered by walking the source chain; anything without
  /// one is a plain 500.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let mut cursor: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = cursor {
      if let Some(domain) = e.downcast_ref::<CoreError>() {
        return Self::from_domain(domain);
      }
      cursor = e.source();
    }
    Self::Store(Box::new(err))
  }

  fn from_domain(err: &CoreError) -> Self {
    match err {
      CoreError::TutorNotFound(id) => Self::NotFound(format!("tutor {id} not found")),
      CoreError::StudentNotFound(id) => {
        Self::NotFound(format!("student {id} not found"))
      }
      CoreError::EnrollmentNotFound { tutor_id, student_id } => Self::NotFound(
        format!("no enrollment linking tutor {tutor_id} and student {student_id}"),
      ),
      CoreError::Validation { field, message } => Self::Validation {
        field:   field.clone(),
        message: message.clone(),
      },
      CoreError::DuplicateEmail(email) => Self::Conflict(email.clone()),
      CoreError::EmptySelection => Self::Validation {
        field:   "tutor_ids".into(),
        message: "no tutors selected".into(),
      },
      CoreError::Serialization(e) => Self::BadRequest(format!("malformed data: {e}")),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Validation { field, message } => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message, "field": field })),
      )
        .into_response(),
      ApiError::Conflict(email) => (
        StatusCode::CONFLICT,
        Json(json!({
          "error": format!("email already in use: {email}"),
          "field": "email",
        })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}

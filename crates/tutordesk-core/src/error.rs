//! Error types for `tutordesk-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("tutor not found: {0}")]
  TutorNotFound(Uuid),

  #[error("student not found: {0}")]
  StudentNotFound(Uuid),

  #[error("no enrollment linking tutor {tutor_id} and student {student_id}")]
  EnrollmentNotFound { tutor_id: Uuid, student_id: Uuid },

  /// A field failed validation. Reported back against the offending field;
  /// nothing is written.
  #[error("invalid {field}: {message}")]
  Validation { field: String, message: String },

  /// Unique-email constraint violated on create or update.
  #[error("email already in use: {0}")]
  DuplicateEmail(String),

  /// A bulk operation was invoked with no selected tutors.
  #[error("no tutors selected")]
  EmptySelection,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Shorthand for building a [`Error::Validation`].
  pub fn validation(field: &str, message: impl Into<String>) -> Self {
    Self::Validation {
      field:   field.to_owned(),
      message: message.into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

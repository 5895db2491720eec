//! Enrollment — the many-to-many link between a tutor and a student.
//!
//! Identified by the (tutor, student) pair; a given pair appears at most
//! once. Rows cascade-delete when either side is removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
  pub tutor_id:    Uuid,
  pub student_id:  Uuid,
  /// When the link was formed.
  pub enrolled_at: DateTime<Utc>,
}

//! Student — a learner enrolled with zero or more tutors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub student_id:  Uuid,
  pub name:        String,
  pub email:       String,
  /// School grade, 1–12 inclusive.
  pub grade_level: i64,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input for creating a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
  pub name:        String,
  pub email:       String,
  pub grade_level: i64,
}

impl NewStudent {
  pub fn validated(self) -> Result<Self> {
    validate::check_name(&self.name)?;
    validate::check_email(&self.email)?;
    validate::check_grade_level(self.grade_level)?;
    Ok(self)
  }
}

/// Partial update for a student. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
  pub name:        Option<String>,
  pub email:       Option<String>,
  pub grade_level: Option<i64>,
}

impl StudentPatch {
  pub fn validated(self) -> Result<Self> {
    if let Some(name) = &self.name {
      validate::check_name(name)?;
    }
    if let Some(email) = &self.email {
      validate::check_email(email)?;
    }
    if let Some(grade) = self.grade_level {
      validate::check_grade_level(grade)?;
    }
    Ok(self)
  }
}

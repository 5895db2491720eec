//! Tutor — the central directory entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, rate::round_rate, validate};

/// Suggested subject vocabulary offered by entry forms. Purely advisory —
/// tutors may carry any non-empty subject string.
pub const SUGGESTED_SUBJECTS: &[&str] = &[
  "Mathematics",
  "Physics",
  "Chemistry",
  "Biology",
  "English Literature",
  "History",
  "Geography",
  "Computer Science",
  "Economics",
  "Statistics",
  "French",
  "Spanish",
  "Music Theory",
  "Art",
  "Philosophy",
  "Political Science",
  "Environmental Science",
  "Psychology",
  "Sociology",
  "Algebra",
  "Calculus",
  "Geometry",
  "Trigonometry",
  "Creative Writing",
  "Public Speaking",
];

/// A tutor as persisted in the directory.
///
/// `hourly_rate` is in dollars, always normalised to two decimal places and
/// never negative. `subjects` is an ordered, non-empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
  pub tutor_id:    Uuid,
  pub name:        String,
  pub email:       String,
  pub hourly_rate: f64,
  pub bio:         Option<String>,
  pub subjects:    Vec<String>,
  pub avatar:      Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input for creating a tutor. Identity and timestamps are assigned by the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTutor {
  pub name:        String,
  pub email:       String,
  pub hourly_rate: f64,
  #[serde(default)]
  pub bio:         Option<String>,
  pub subjects:    Vec<String>,
  #[serde(default)]
  pub avatar:      Option<String>,
}

impl NewTutor {
  /// Validate all fields; on success, normalise the rate to two decimals.
  pub fn validated(mut self) -> Result<Self> {
    validate::check_name(&self.name)?;
    validate::check_email(&self.email)?;
    validate::check_hourly_rate(self.hourly_rate)?;
    validate::check_bio(self.bio.as_deref())?;
    validate::check_subjects(&self.subjects)?;
    self.hourly_rate = round_rate(self.hourly_rate);
    Ok(self)
  }
}

/// Partial update for a tutor. `None` fields are left untouched, which is
/// how the audit hook distinguishes "rate unchanged" from "rate absent".
///
/// The nullable columns (`bio`, `avatar`) are double-`Option`: an absent
/// field leaves the stored value alone, an explicit JSON `null` clears it,
/// and a string replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorPatch {
  pub name:        Option<String>,
  pub email:       Option<String>,
  pub hourly_rate: Option<f64>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub bio:         Option<Option<String>>,
  pub subjects:    Option<Vec<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub avatar:      Option<Option<String>>,
}

/// Deserialise a present field (null or value) as `Some`, so the serde
/// default `None` is reserved for fields absent from the payload.
fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: serde::Deserializer<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

impl TutorPatch {
  /// Validate whichever fields are present; normalise the rate if given.
  pub fn validated(mut self) -> Result<Self> {
    if let Some(name) = &self.name {
      validate::check_name(name)?;
    }
    if let Some(email) = &self.email {
      validate::check_email(email)?;
    }
    if let Some(rate) = self.hourly_rate {
      validate::check_hourly_rate(rate)?;
      self.hourly_rate = Some(round_rate(rate));
    }
    if let Some(bio) = &self.bio {
      validate::check_bio(bio.as_deref())?;
    }
    if let Some(subjects) = &self.subjects {
      validate::check_subjects(subjects)?;
    }
    Ok(self)
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.email.is_none()
      && self.hourly_rate.is_none()
      && self.bio.is_none()
      && self.subjects.is_none()
      && self.avatar.is_none()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_distinguishes_absent_null_and_value() {
    let p: TutorPatch = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
    assert_eq!(p.bio, None);

    let p: TutorPatch = serde_json::from_str(r#"{"bio":null}"#).unwrap();
    assert_eq!(p.bio, Some(None));

    let p: TutorPatch = serde_json::from_str(r#"{"bio":"chess coach"}"#).unwrap();
    assert_eq!(p.bio, Some(Some("chess coach".into())));

    let p: TutorPatch = serde_json::from_str(r#"{"avatar":null}"#).unwrap();
    assert_eq!(p.avatar, Some(None));
  }

  #[test]
  fn patch_validates_only_present_bio() {
    let long = "x".repeat(2000);
    let patch = TutorPatch {
      bio: Some(Some(long)),
      ..TutorPatch::default()
    };
    assert!(patch.validated().is_err());

    let patch = TutorPatch {
      bio: Some(None),
      ..TutorPatch::default()
    };
    assert!(patch.validated().is_ok());
  }
}

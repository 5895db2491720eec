//! Field validation helpers shared by tutor and student inputs.
//!
//! Every check returns a field-scoped [`Error::Validation`] so callers can
//! report the failure against the offending form field without touching any
//! state.

use crate::{Error, Result};

/// Non-empty, at most 255 characters.
pub fn check_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::validation("name", "must not be empty"));
  }
  if name.chars().count() > 255 {
    return Err(Error::validation("name", "must be at most 255 characters"));
  }
  Ok(())
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is not our problem.
pub fn check_email(email: &str) -> Result<()> {
  let err = || Error::validation("email", "not a valid email address");

  if email.chars().any(char::is_whitespace) {
    return Err(err());
  }
  let (local, domain) = email.split_once('@').ok_or_else(err)?;
  if local.is_empty() || domain.is_empty() || domain.contains('@') {
    return Err(err());
  }
  if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
    return Err(err());
  }
  Ok(())
}

/// Non-negative and finite.
pub fn check_hourly_rate(rate: f64) -> Result<()> {
  if !rate.is_finite() {
    return Err(Error::validation("hourly_rate", "must be a number"));
  }
  if rate < 0.0 {
    return Err(Error::validation("hourly_rate", "must not be negative"));
  }
  Ok(())
}

/// Optional, at most 1000 characters.
pub fn check_bio(bio: Option<&str>) -> Result<()> {
  if let Some(b) = bio {
    if b.chars().count() > 1000 {
      return Err(Error::validation("bio", "must be at most 1000 characters"));
    }
  }
  Ok(())
}

/// At least one subject; every entry non-empty.
pub fn check_subjects(subjects: &[String]) -> Result<()> {
  if subjects.is_empty() {
    return Err(Error::validation("subjects", "at least one subject required"));
  }
  if subjects.iter().any(|s| s.trim().is_empty()) {
    return Err(Error::validation("subjects", "subjects must not be empty"));
  }
  Ok(())
}

/// School grade, 1 through 12 inclusive.
pub fn check_grade_level(grade: i64) -> Result<()> {
  if !(1..=12).contains(&grade) {
    return Err(Error::validation("grade_level", "must be between 1 and 12"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_plain_email() {
    assert!(check_email("alice@example.com").is_ok());
  }

  #[test]
  fn rejects_malformed_emails() {
    for bad in ["", "alice", "@example.com", "alice@", "alice@nodot", "a b@example.com", "alice@.com"] {
      assert!(check_email(bad).is_err(), "accepted {bad:?}");
    }
  }

  #[test]
  fn rejects_empty_name() {
    assert!(check_name("   ").is_err());
    assert!(check_name("Jane Smith").is_ok());
  }

  #[test]
  fn rejects_negative_rate() {
    assert!(check_hourly_rate(-0.01).is_err());
    assert!(check_hourly_rate(f64::NAN).is_err());
    assert!(check_hourly_rate(0.0).is_ok());
  }

  #[test]
  fn grade_level_bounds_are_inclusive() {
    assert!(check_grade_level(0).is_err());
    assert!(check_grade_level(1).is_ok());
    assert!(check_grade_level(12).is_ok());
    assert!(check_grade_level(13).is_err());
  }

  #[test]
  fn subjects_must_be_non_empty() {
    assert!(check_subjects(&[]).is_err());
    assert!(check_subjects(&["Mathematics".into(), " ".into()]).is_err());
    assert!(check_subjects(&["Mathematics".into()]).is_ok());
  }
}

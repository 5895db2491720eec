//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Subject lists are stored as
//! compact JSON arrays. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use tutordesk_core::{
  rate::RateChange,
  student::Student,
  tutor::Tutor,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Subjects ─────────────────────────────────────────────────────────────────

pub fn encode_subjects(subjects: &[String]) -> Result<String> {
  Ok(serde_json::to_string(subjects)?)
}

pub fn decode_subjects(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `tutors` row as read from SQLite, before decoding.
#[derive(Debug, Clone)]
pub struct RawTutor {
  pub tutor_id:    String,
  pub name:        String,
  pub email:       String,
  pub hourly_rate: f64,
  pub bio:         Option<String>,
  pub subjects:    String,
  pub avatar:      Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTutor {
  /// Read from a row selected with [`crate::store::TUTOR_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tutor_id:    row.get(0)?,
      name:        row.get(1)?,
      email:       row.get(2)?,
      hourly_rate: row.get(3)?,
      bio:         row.get(4)?,
      subjects:    row.get(5)?,
      avatar:      row.get(6)?,
      created_at:  row.get(7)?,
      updated_at:  row.get(8)?,
    })
  }

  pub fn into_tutor(self) -> Result<Tutor> {
    Ok(Tutor {
      tutor_id:    decode_uuid(&self.tutor_id)?,
      name:        self.name,
      email:       self.email,
      hourly_rate: self.hourly_rate,
      bio:         self.bio,
      subjects:    decode_subjects(&self.subjects)?,
      avatar:      self.avatar,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// A `students` row as read from SQLite.
#[derive(Debug, Clone)]
pub struct RawStudent {
  pub student_id:  String,
  pub name:        String,
  pub email:       String,
  pub grade_level: i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawStudent {
  /// Read from a row selected with [`crate::store::STUDENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id:  row.get(0)?,
      name:        row.get(1)?,
      email:       row.get(2)?,
      grade_level: row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      student_id:  decode_uuid(&self.student_id)?,
      name:        self.name,
      email:       self.email,
      grade_level: self.grade_level,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// A `tutor_rate_changes` row as read from SQLite.
#[derive(Debug, Clone)]
pub struct RawRateChange {
  pub rate_change_id: String,
  pub tutor_id:       String,
  pub old_rate:       f64,
  pub new_rate:       f64,
  pub changed_at:     String,
  pub created_at:     String,
}

impl RawRateChange {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      rate_change_id: row.get(0)?,
      tutor_id:       row.get(1)?,
      old_rate:       row.get(2)?,
      new_rate:       row.get(3)?,
      changed_at:     row.get(4)?,
      created_at:     row.get(5)?,
    })
  }

  pub fn into_rate_change(self) -> Result<RateChange> {
    Ok(RateChange {
      rate_change_id: decode_uuid(&self.rate_change_id)?,
      tutor_id:       decode_uuid(&self.tutor_id)?,
      old_rate:       self.old_rate,
      new_rate:       self.new_rate,
      changed_at:     decode_dt(&self.changed_at)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

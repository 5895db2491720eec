//! The `DirectoryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `tutordesk-store-sqlite`). Higher layers (`tutordesk-api`,
//! `tutordesk-cli`) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  enrollment::Enrollment,
  rate::RateChange,
  student::{NewStudent, Student, StudentPatch},
  tutor::{NewTutor, Tutor, TutorPatch},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Fixed page size for tutor search results.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Parameters for [`DirectoryStore::search`]. All criteria are optional and
/// ANDed together; an absent criterion applies no constraint at all.
///
/// Rate bounds are `Option` precisely so that `Some(0.0)` remains a real
/// inclusive bound rather than collapsing into "unset".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorQuery {
  /// Case-insensitive substring match against the tutor name.
  pub search:          Option<String>,
  /// Conjunctive subject filter: a tutor matches only if its subject list
  /// contains every listed subject (case-sensitive exact strings).
  #[serde(default)]
  pub subjects:        Vec<String>,
  /// Inclusive lower bound on `hourly_rate`.
  pub min_hourly_rate: Option<f64>,
  /// Inclusive upper bound on `hourly_rate`.
  pub max_hourly_rate: Option<f64>,
  /// 1-based page number; defaults to 1.
  pub page:            Option<usize>,
  /// Page size; defaults to [`DEFAULT_PAGE_SIZE`].
  pub per_page:        Option<usize>,
}

impl Default for TutorQuery {
  fn default() -> Self {
    Self {
      search:          None,
      subjects:        Vec::new(),
      min_hourly_rate: None,
      max_hourly_rate: None,
      page:            None,
      per_page:        None,
    }
  }
}

/// One page of search results plus the metadata needed to render pagination
/// controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorPage {
  pub tutors:     Vec<Tutor>,
  /// Total matches across all pages.
  pub total:      usize,
  /// 1-based page number this page corresponds to.
  pub page:       usize,
  /// Total number of pages (at least 1, even when empty).
  pub page_count: usize,
  pub per_page:   usize,
}

/// Aggregate numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryStats {
  /// Tutors with at least one subject.
  pub active_tutors:       usize,
  pub total_students:      usize,
  /// Mean hourly rate across all tutors; `None` when there are no tutors.
  pub average_hourly_rate: Option<f64>,
  /// Primary subject with the highest average hourly rate.
  pub highest_paid_subject: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a tutordesk storage backend.
///
/// `update_tutor` is the single choke point for tutor mutation: every write
/// path that can change `hourly_rate` — single edits and bulk adjustments
/// alike — goes through it, so the rate-change audit hook lives inside it
/// rather than at each call site.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tutors ────────────────────────────────────────────────────────────

  /// Validate and persist a new tutor. Fails on a duplicate email.
  fn add_tutor(
    &self,
    input: NewTutor,
  ) -> impl Future<Output = Result<Tutor, Self::Error>> + Send + '_;

  /// Retrieve a tutor by id. Returns `None` if not found.
  fn get_tutor(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Tutor>, Self::Error>> + Send + '_;

  /// List all tutors in stable creation order.
  fn list_tutors(
    &self,
  ) -> impl Future<Output = Result<Vec<Tutor>, Self::Error>> + Send + '_;

  /// Apply a partial update inside one unit of work.
  ///
  /// If the patch carries an `hourly_rate` different from the persisted
  /// value, a [`RateChange`] is written before the tutor row — both
  /// succeed or neither does.
  fn update_tutor(
    &self,
    id: Uuid,
    patch: TutorPatch,
  ) -> impl Future<Output = Result<Tutor, Self::Error>> + Send + '_;

  /// Delete a tutor. Cascades to its rate history and enrollments.
  fn delete_tutor(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  fn add_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn get_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn update_student(
    &self,
    id: Uuid,
    patch: StudentPatch,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Delete a student. Cascades to enrollments only; tutors and their rate
  /// history are untouched.
  fn delete_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Enrollment ────────────────────────────────────────────────────────

  /// Link a tutor and a student. Idempotent: enrolling an already-linked
  /// pair returns the existing link.
  fn enroll(
    &self,
    tutor_id: Uuid,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Enrollment, Self::Error>> + Send + '_;

  /// Remove the link between a tutor and a student.
  fn unenroll(
    &self,
    tutor_id: Uuid,
    student_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn students_of(
    &self,
    tutor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn tutors_of(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Tutor>, Self::Error>> + Send + '_;

  // ── Rate audit log ────────────────────────────────────────────────────

  /// All rate changes for a tutor, oldest first.
  fn rate_history(
    &self,
    tutor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<RateChange>, Self::Error>> + Send + '_;

  /// Apply a signed percentage to every selected tutor's hourly rate in a
  /// single all-or-nothing transaction. Resulting rates are clamped at
  /// zero; each actual change emits one audit record. Returns the updated
  /// tutors in selection order.
  fn adjust_rates<'a>(
    &'a self,
    tutor_ids: &'a [Uuid],
    percentage: f64,
  ) -> impl Future<Output = Result<Vec<Tutor>, Self::Error>> + Send + 'a;

  // ── Search & stats ────────────────────────────────────────────────────

  /// Filtered, deterministically ordered, paginated view over tutors.
  fn search<'a>(
    &'a self,
    query: &'a TutorQuery,
  ) -> impl Future<Output = Result<TutorPage, Self::Error>> + Send + 'a;

  /// Aggregate dashboard numbers.
  fn stats(
    &self,
  ) -> impl Future<Output = Result<DirectoryStats, Self::Error>> + Send + '_;
}

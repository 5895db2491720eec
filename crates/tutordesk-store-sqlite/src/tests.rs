//! Integration tests for `SqliteStore` against an in-memory database.

use tutordesk_core::{
  Error as CoreError,
  store::{DirectoryStore, TutorQuery},
  student::{NewStudent, StudentPatch},
  tutor::{NewTutor, TutorPatch},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_tutor(name: &str, email: &str, rate: f64, subjects: &[&str]) -> NewTutor {
  NewTutor {
    name:        name.into(),
    email:       email.into(),
    hourly_rate: rate,
    bio:         None,
    subjects:    subjects.iter().map(|s| s.to_string()).collect(),
    avatar:      None,
  }
}

fn new_student(name: &str, email: &str, grade: i64) -> NewStudent {
  NewStudent {
    name:        name.into(),
    email:       email.into(),
    grade_level: grade,
  }
}

fn rate_patch(rate: f64) -> TutorPatch {
  TutorPatch {
    hourly_rate: Some(rate),
    ..TutorPatch::default()
  }
}

fn is_validation(err: &Error, field: &str) -> bool {
  matches!(err, Error::Core(CoreError::Validation { field: f, .. }) if f == field)
}

// ─── Tutor CRUD ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_tutor() {
  let s = store().await;

  let tutor = s
    .add_tutor(new_tutor("John Doe", "john@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  assert_eq!(tutor.name, "John Doe");
  assert_eq!(tutor.hourly_rate, 50.0);

  let fetched = s.get_tutor(tutor.tutor_id).await.unwrap().unwrap();
  assert_eq!(fetched.tutor_id, tutor.tutor_id);
  assert_eq!(fetched.email, "john@example.com");
  assert_eq!(fetched.subjects, vec!["Math".to_string()]);
}

#[tokio::test]
async fn get_tutor_missing_returns_none() {
  let s = store().await;
  assert!(s.get_tutor(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_tutor_rejects_invalid_input() {
  let s = store().await;

  let err = s
    .add_tutor(new_tutor("", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "name"));

  let err = s
    .add_tutor(new_tutor("A", "not-an-email", 50.0, &["Math"]))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "email"));

  let err = s
    .add_tutor(new_tutor("A", "a@example.com", -1.0, &["Math"]))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "hourly_rate"));

  let err = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &[]))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "subjects"));

  // Nothing was persisted.
  assert!(s.list_tutors().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_tutor_rejects_duplicate_email() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "same@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let err = s
    .add_tutor(new_tutor("B", "same@example.com", 60.0, &["Physics"]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::DuplicateEmail(_))));
  assert_eq!(s.list_tutors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_tutor_rejects_duplicate_email_without_writing() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let b = s
    .add_tutor(new_tutor("B", "b@example.com", 60.0, &["Physics"]))
    .await
    .unwrap();

  let patch = TutorPatch {
    email: Some("a@example.com".into()),
    ..TutorPatch::default()
  };
  let err = s.update_tutor(b.tutor_id, patch).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::DuplicateEmail(_))));

  let unchanged = s.get_tutor(b.tutor_id).await.unwrap().unwrap();
  assert_eq!(unchanged.email, "b@example.com");
}

#[tokio::test]
async fn update_tutor_clears_bio_only_on_explicit_null() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let patch = TutorPatch {
    bio: Some(Some("Veteran chess coach".into())),
    ..TutorPatch::default()
  };
  let updated = s.update_tutor(tutor.tutor_id, patch).await.unwrap();
  assert_eq!(updated.bio.as_deref(), Some("Veteran chess coach"));

  // A patch without the field leaves the stored bio alone.
  let updated = s.update_tutor(tutor.tutor_id, rate_patch(60.0)).await.unwrap();
  assert_eq!(updated.bio.as_deref(), Some("Veteran chess coach"));

  // An explicit null clears it.
  let patch = TutorPatch {
    bio: Some(None),
    ..TutorPatch::default()
  };
  let updated = s.update_tutor(tutor.tutor_id, patch).await.unwrap();
  assert_eq!(updated.bio, None);
}

#[tokio::test]
async fn update_missing_tutor_is_not_found() {
  let s = store().await;
  let err = s
    .update_tutor(Uuid::new_v4(), rate_patch(10.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::TutorNotFound(_))));
}

#[tokio::test]
async fn delete_missing_tutor_is_not_found() {
  let s = store().await;
  let err = s.delete_tutor(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::TutorNotFound(_))));
}

// ─── Rate audit log ──────────────────────────────────────────────────────────

#[tokio::test]
async fn rate_change_emits_exactly_one_audit_record() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let updated = s.update_tutor(tutor.tutor_id, rate_patch(65.0)).await.unwrap();
  assert_eq!(updated.hourly_rate, 65.0);

  let history = s.rate_history(tutor.tutor_id).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].old_rate, 50.0);
  assert_eq!(history[0].new_rate, 65.0);
  assert_eq!(history[0].tutor_id, tutor.tutor_id);
}

#[tokio::test]
async fn unchanged_rate_emits_no_audit_record() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  // Same value as persisted.
  s.update_tutor(tutor.tutor_id, rate_patch(50.0)).await.unwrap();
  assert!(s.rate_history(tutor.tutor_id).await.unwrap().is_empty());

  // Rate absent from the patch entirely.
  let patch = TutorPatch {
    name: Some("Renamed".into()),
    ..TutorPatch::default()
  };
  s.update_tutor(tutor.tutor_id, patch).await.unwrap();
  assert!(s.rate_history(tutor.tutor_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn successive_changes_accumulate_in_order() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  s.update_tutor(tutor.tutor_id, rate_patch(60.0)).await.unwrap();
  s.update_tutor(tutor.tutor_id, rate_patch(55.0)).await.unwrap();

  let history = s.rate_history(tutor.tutor_id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!((history[0].old_rate, history[0].new_rate), (50.0, 60.0));
  assert_eq!((history[1].old_rate, history[1].new_rate), (60.0, 55.0));
}

#[tokio::test]
async fn failed_update_leaves_no_audit_record() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  // Invalid rate: rejected before any write.
  let err = s
    .update_tutor(tutor.tutor_id, rate_patch(-5.0))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "hourly_rate"));
  assert!(s.rate_history(tutor.tutor_id).await.unwrap().is_empty());
  assert_eq!(
    s.get_tutor(tutor.tutor_id).await.unwrap().unwrap().hourly_rate,
    50.0
  );
}

// ─── Bulk rate adjustment ────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_adjustment_applies_percentage_and_audits() {
  let s = store().await;
  let a = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let b = s
    .add_tutor(new_tutor("B", "b@example.com", 80.0, &["Physics"]))
    .await
    .unwrap();

  let updated = s
    .adjust_rates(&[a.tutor_id, b.tutor_id], 10.0)
    .await
    .unwrap();
  assert_eq!(updated.len(), 2);
  assert_eq!(updated[0].hourly_rate, 55.0);
  assert_eq!(updated[1].hourly_rate, 88.0);

  assert_eq!(s.rate_history(a.tutor_id).await.unwrap().len(), 1);
  assert_eq!(s.rate_history(b.tutor_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn bulk_adjustment_clamps_at_zero() {
  let s = store().await;
  let a = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let updated = s.adjust_rates(&[a.tutor_id], -200.0).await.unwrap();
  assert_eq!(updated[0].hourly_rate, 0.0);

  let history = s.rate_history(a.tutor_id).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!((history[0].old_rate, history[0].new_rate), (50.0, 0.0));
}

#[tokio::test]
async fn bulk_adjustment_with_zero_percent_emits_nothing() {
  let s = store().await;
  let a = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let updated = s.adjust_rates(&[a.tutor_id], 0.0).await.unwrap();
  assert_eq!(updated[0].hourly_rate, 50.0);
  assert!(s.rate_history(a.tutor_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn bulk_adjustment_is_all_or_nothing() {
  let s = store().await;
  let a = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let b = s
    .add_tutor(new_tutor("B", "b@example.com", 80.0, &["Physics"]))
    .await
    .unwrap();

  // Third id does not exist; the whole batch must roll back.
  let err = s
    .adjust_rates(&[a.tutor_id, b.tutor_id, Uuid::new_v4()], 10.0)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::TutorNotFound(_))));

  assert_eq!(
    s.get_tutor(a.tutor_id).await.unwrap().unwrap().hourly_rate,
    50.0
  );
  assert_eq!(
    s.get_tutor(b.tutor_id).await.unwrap().unwrap().hourly_rate,
    80.0
  );
  assert!(s.rate_history(a.tutor_id).await.unwrap().is_empty());
  assert!(s.rate_history(b.tutor_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn bulk_adjustment_rejects_bad_input() {
  let s = store().await;
  let a = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let err = s.adjust_rates(&[], 10.0).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::EmptySelection)));

  let err = s.adjust_rates(&[a.tutor_id], f64::NAN).await.unwrap_err();
  assert!(is_validation(&err, "percentage"));
}

// ─── Search ──────────────────────────────────────────────────────────────────

async fn seed_search_pair(s: &SqliteStore) -> (Uuid, Uuid) {
  let a = s
    .add_tutor(new_tutor("John Doe", "john@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let b = s
    .add_tutor(new_tutor("Jane Smith", "jane@example.com", 150.0, &["Science"]))
    .await
    .unwrap();
  (a.tutor_id, b.tutor_id)
}

#[tokio::test]
async fn search_ands_all_provided_criteria() {
  let s = store().await;
  let (a, _b) = seed_search_pair(&s).await;

  let query = TutorQuery {
    search:          Some("John".into()),
    subjects:        vec!["Math".into()],
    min_hourly_rate: Some(40.0),
    max_hourly_rate: Some(100.0),
    ..TutorQuery::default()
  };
  let page = s.search(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.tutors.len(), 1);
  assert_eq!(page.tutors[0].tutor_id, a);
}

#[tokio::test]
async fn search_with_single_criterion() {
  let s = store().await;
  let (a, _b) = seed_search_pair(&s).await;

  let query = TutorQuery {
    subjects: vec!["Math".into()],
    ..TutorQuery::default()
  };
  let page = s.search(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.tutors[0].tutor_id, a);
}

#[tokio::test]
async fn search_name_match_is_case_insensitive_substring() {
  let s = store().await;
  let (a, _b) = seed_search_pair(&s).await;

  let query = TutorQuery {
    search: Some("john".into()),
    ..TutorQuery::default()
  };
  let page = s.search(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.tutors[0].tutor_id, a);

  // Substring anywhere in the name.
  let query = TutorQuery {
    search: Some("Smith".into()),
    ..TutorQuery::default()
  };
  assert_eq!(s.search(&query).await.unwrap().total, 1);
}

#[tokio::test]
async fn search_subject_filter_is_conjunctive() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let both = s
    .add_tutor(new_tutor("B", "b@example.com", 60.0, &["Math", "Science"]))
    .await
    .unwrap();

  let query = TutorQuery {
    subjects: vec!["Math".into(), "Science".into()],
    ..TutorQuery::default()
  };
  let page = s.search(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.tutors[0].tutor_id, both.tutor_id);
}

#[tokio::test]
async fn search_subject_match_is_case_sensitive() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let query = TutorQuery {
    subjects: vec!["math".into()],
    ..TutorQuery::default()
  };
  assert_eq!(s.search(&query).await.unwrap().total, 0);
}

#[tokio::test]
async fn search_zero_min_rate_is_a_real_bound() {
  let s = store().await;
  seed_search_pair(&s).await;

  // min = Some(0.0) is applied, not dropped. Both tutors satisfy it.
  let query = TutorQuery {
    min_hourly_rate: Some(0.0),
    ..TutorQuery::default()
  };
  assert_eq!(s.search(&query).await.unwrap().total, 2);

  // max = Some(0.0) is equally explicit and excludes both.
  let query = TutorQuery {
    max_hourly_rate: Some(0.0),
    ..TutorQuery::default()
  };
  assert_eq!(s.search(&query).await.unwrap().total, 0);
}

#[tokio::test]
async fn search_rate_bounds_are_inclusive() {
  let s = store().await;
  seed_search_pair(&s).await; // rates 50 and 150

  let query = TutorQuery {
    min_hourly_rate: Some(50.0),
    max_hourly_rate: Some(150.0),
    ..TutorQuery::default()
  };
  assert_eq!(s.search(&query).await.unwrap().total, 2);
}

#[tokio::test]
async fn search_paginates_with_metadata() {
  let s = store().await;
  for i in 0..25 {
    s.add_tutor(new_tutor(
      &format!("Tutor {i:02}"),
      &format!("tutor{i}@example.com"),
      20.0 + i as f64,
      &["Math"],
    ))
    .await
    .unwrap();
  }

  let page1 = s.search(&TutorQuery::default()).await.unwrap();
  assert_eq!(page1.total, 25);
  assert_eq!(page1.page, 1);
  assert_eq!(page1.page_count, 3);
  assert_eq!(page1.per_page, 10);
  assert_eq!(page1.tutors.len(), 10);

  let query = TutorQuery { page: Some(3), ..TutorQuery::default() };
  let page3 = s.search(&query).await.unwrap();
  assert_eq!(page3.tutors.len(), 5);

  let query = TutorQuery { page: Some(4), ..TutorQuery::default() };
  assert!(s.search(&query).await.unwrap().tutors.is_empty());
}

#[tokio::test]
async fn search_huge_page_number_returns_empty_page() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let query = TutorQuery {
    page: Some(usize::MAX),
    ..TutorQuery::default()
  };
  let page = s.search(&query).await.unwrap();
  assert!(page.tutors.is_empty());
  assert_eq!(page.total, 1);
  assert_eq!(page.page, usize::MAX);
}

#[tokio::test]
async fn search_empty_store_reports_one_empty_page() {
  let s = store().await;
  let page = s.search(&TutorQuery::default()).await.unwrap();
  assert_eq!(page.total, 0);
  assert_eq!(page.page_count, 1);
  assert!(page.tutors.is_empty());
}

// ─── Students & enrollment ───────────────────────────────────────────────────

#[tokio::test]
async fn student_crud_round_trip() {
  let s = store().await;
  let student = s
    .add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();

  let patch = StudentPatch {
    grade_level: Some(10),
    ..StudentPatch::default()
  };
  let updated = s.update_student(student.student_id, patch).await.unwrap();
  assert_eq!(updated.grade_level, 10);

  s.delete_student(student.student_id).await.unwrap();
  assert!(s.get_student(student.student_id).await.unwrap().is_none());
}

#[tokio::test]
async fn student_grade_level_is_validated() {
  let s = store().await;
  let err = s
    .add_student(new_student("Carol", "carol@example.com", 13))
    .await
    .unwrap_err();
  assert!(is_validation(&err, "grade_level"));
}

#[tokio::test]
async fn enroll_links_and_is_idempotent() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let student = s
    .add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();

  let first = s.enroll(tutor.tutor_id, student.student_id).await.unwrap();
  let second = s.enroll(tutor.tutor_id, student.student_id).await.unwrap();
  assert_eq!(first, second);

  let students = s.students_of(tutor.tutor_id).await.unwrap();
  assert_eq!(students.len(), 1);
  assert_eq!(students[0].student_id, student.student_id);

  let tutors = s.tutors_of(student.student_id).await.unwrap();
  assert_eq!(tutors.len(), 1);
}

#[tokio::test]
async fn enroll_requires_both_sides_to_exist() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();

  let err = s.enroll(tutor.tutor_id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::StudentNotFound(_))));

  let err = s.enroll(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::TutorNotFound(_))));
}

#[tokio::test]
async fn unenroll_missing_link_is_not_found() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let student = s
    .add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();

  let err = s
    .unenroll(tutor.tutor_id, student.student_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::EnrollmentNotFound { .. })));
}

#[tokio::test]
async fn deleting_tutor_cascades_to_history_and_links() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let student = s
    .add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();
  s.enroll(tutor.tutor_id, student.student_id).await.unwrap();
  s.update_tutor(tutor.tutor_id, rate_patch(60.0)).await.unwrap();

  s.delete_tutor(tutor.tutor_id).await.unwrap();

  assert!(s.get_tutor(tutor.tutor_id).await.unwrap().is_none());
  assert!(s.rate_history(tutor.tutor_id).await.unwrap().is_empty());
  assert!(s.tutors_of(student.student_id).await.unwrap().is_empty());
  // The student itself survives.
  assert!(s.get_student(student.student_id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_student_removes_only_the_links() {
  let s = store().await;
  let tutor = s
    .add_tutor(new_tutor("A", "a@example.com", 50.0, &["Math"]))
    .await
    .unwrap();
  let student = s
    .add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();
  s.enroll(tutor.tutor_id, student.student_id).await.unwrap();
  s.update_tutor(tutor.tutor_id, rate_patch(60.0)).await.unwrap();

  s.delete_student(student.student_id).await.unwrap();

  assert!(s.students_of(tutor.tutor_id).await.unwrap().is_empty());
  // The tutor and its rate history survive.
  assert!(s.get_tutor(tutor.tutor_id).await.unwrap().is_some());
  assert_eq!(s.rate_history(tutor.tutor_id).await.unwrap().len(), 1);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_aggregate_the_directory() {
  let s = store().await;
  s.add_tutor(new_tutor("A", "a@example.com", 40.0, &["Math"]))
    .await
    .unwrap();
  s.add_tutor(new_tutor("B", "b@example.com", 80.0, &["Physics"]))
    .await
    .unwrap();
  s.add_student(new_student("Carol", "carol@example.com", 9))
    .await
    .unwrap();

  let stats = s.stats().await.unwrap();
  assert_eq!(stats.active_tutors, 2);
  assert_eq!(stats.total_students, 1);
  assert_eq!(stats.average_hourly_rate, Some(60.0));
  assert_eq!(stats.highest_paid_subject.as_deref(), Some("Physics"));
}

#[tokio::test]
async fn stats_on_empty_store() {
  let s = store().await;
  let stats = s.stats().await.unwrap();
  assert_eq!(stats.active_tutors, 0);
  assert_eq!(stats.total_students, 0);
  assert_eq!(stats.average_hourly_rate, None);
  assert_eq!(stats.highest_paid_subject, None);
}

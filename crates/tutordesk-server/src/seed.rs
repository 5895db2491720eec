//! Demo-data seeding for local development.

use anyhow::{Context, Result};
use tutordesk_core::{
  store::DirectoryStore,
  student::NewStudent,
  tutor::NewTutor,
};

const TUTORS: &[(&str, &str, f64, &[&str])] = &[
  ("Alice Liddell", "alice@tutordesk.test", 48.0, &["Mathematics", "Algebra"]),
  ("Ben Okafor", "ben@tutordesk.test", 62.5, &["Physics", "Calculus"]),
  ("Carmen Reyes", "carmen@tutordesk.test", 35.0, &["Spanish", "French"]),
  ("Derek Hsu", "derek@tutordesk.test", 80.0, &["Computer Science", "Statistics"]),
  ("Elena Petrova", "elena@tutordesk.test", 55.0, &["Chemistry", "Biology"]),
  ("Femi Adeyemi", "femi@tutordesk.test", 42.0, &["History", "Geography"]),
  ("Grace Kim", "grace@tutordesk.test", 67.25, &["Music Theory", "Art"]),
  ("Hugo Marchand", "hugo@tutordesk.test", 39.0, &["English Literature", "Creative Writing"]),
  ("Ines Duarte", "ines@tutordesk.test", 71.0, &["Economics", "Political Science"]),
  ("Jonas Weber", "jonas@tutordesk.test", 29.5, &["Geometry", "Trigonometry"]),
  ("Keiko Tanaka", "keiko@tutordesk.test", 58.0, &["Psychology", "Sociology"]),
  ("Liam O'Brien", "liam@tutordesk.test", 45.0, &["Philosophy", "Public Speaking"]),
];

const STUDENTS: &[(&str, &str, i64)] = &[
  ("Maya Patel", "maya@student.test", 10),
  ("Noah Fischer", "noah@student.test", 7),
  ("Olivia Santos", "olivia@student.test", 12),
  ("Pavel Novak", "pavel@student.test", 4),
  ("Quinn Taylor", "quinn@student.test", 9),
  ("Rosa Moreno", "rosa@student.test", 11),
  ("Sam Becker", "sam@student.test", 6),
  ("Tara Singh", "tara@student.test", 8),
];

/// Populate an (assumed empty) store with demo tutors, students, and a few
/// enrollments.
pub async fn demo<S>(store: &S) -> Result<()>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut tutor_ids = Vec::with_capacity(TUTORS.len());
  for (name, email, rate, subjects) in TUTORS {
    let tutor = store
      .add_tutor(NewTutor {
        name:        (*name).into(),
        email:       (*email).into(),
        hourly_rate: *rate,
        bio:         None,
        subjects:    subjects.iter().map(|s| s.to_string()).collect(),
        avatar:      None,
      })
      .await
      .with_context(|| format!("seeding tutor {name}"))?;
    tutor_ids.push(tutor.tutor_id);
  }

  let mut student_ids = Vec::with_capacity(STUDENTS.len());
  for (name, email, grade) in STUDENTS {
    let student = store
      .add_student(NewStudent {
        name:        (*name).into(),
        email:       (*email).into(),
        grade_level: *grade,
      })
      .await
      .with_context(|| format!("seeding student {name}"))?;
    student_ids.push(student.student_id);
  }

  // Link each student with two tutors, round-robin.
  for (i, student_id) in student_ids.iter().enumerate() {
    for k in 0..2 {
      let tutor_id = tutor_ids[(i + k) % tutor_ids.len()];
      store
        .enroll(tutor_id, *student_id)
        .await
        .context("seeding enrollment")?;
    }
  }

  tracing::info!(
    tutors = tutor_ids.len(),
    students = student_ids.len(),
    "seeded demo data"
  );
  Ok(())
}

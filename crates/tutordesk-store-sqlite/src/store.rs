//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tutordesk_core::{
  Error as CoreError,
  enrollment::Enrollment,
  rate::{RateChange, apply_percentage},
  store::{DEFAULT_PAGE_SIZE, DirectoryStats, DirectoryStore, TutorPage, TutorQuery},
  student::{NewStudent, Student, StudentPatch},
  tutor::{NewTutor, Tutor, TutorPatch},
};

use crate::{
  Error, Result,
  encode::{
    RawRateChange, RawStudent, RawTutor, encode_dt, encode_subjects, encode_uuid,
  },
  schema::SCHEMA,
};

/// Column list matching [`RawTutor::from_row`].
pub(crate) const TUTOR_COLUMNS: &str =
  "tutor_id, name, email, hourly_rate, bio, subjects, avatar, created_at, updated_at";

/// Column list matching [`RawStudent::from_row`].
pub(crate) const STUDENT_COLUMNS: &str =
  "student_id, name, email, grade_level, created_at, updated_at";

// ─── Closure outcomes ────────────────────────────────────────────────────────

/// Result of a write closure that can fail for domain reasons. Domain
/// failures return early without committing, so the open transaction rolls
/// back on drop.
enum WriteOutcome<T> {
  Written(T),
  NotFound,
  DuplicateEmail(String),
}

/// Result of an insert closure.
enum InsertOutcome {
  Created,
  DuplicateEmail(String),
}

/// Result of the bulk-adjustment closure.
enum BulkOutcome {
  Adjusted(Vec<RawTutor>),
  /// A selected tutor id did not exist; nothing was committed.
  MissingTutor(String),
}

/// Result of the enroll closure.
enum EnrollOutcome {
  Linked(String),
  TutorMissing,
  StudentMissing,
}

// ─── Audit hook ──────────────────────────────────────────────────────────────

/// The rate-change audit hook.
///
/// Called by every write path that can change a tutor's hourly rate, inside
/// the same transaction as the rate write itself and before it. Emits one
/// append-only audit row when the rate actually changes, nothing otherwise.
/// Both rates are already normalised to two decimals, so `==` is exact.
fn rate_change_hook(
  tx: &rusqlite::Transaction<'_>,
  tutor_id: &str,
  old_rate: f64,
  new_rate: f64,
  now: &str,
) -> rusqlite::Result<()> {
  if old_rate == new_rate {
    return Ok(());
  }
  tx.execute(
    "INSERT INTO tutor_rate_changes
       (rate_change_id, tutor_id, old_rate, new_rate, changed_at, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      encode_uuid(Uuid::new_v4()),
      tutor_id,
      old_rate,
      new_rate,
      now,
      now,
    ],
  )?;
  Ok(())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tutordesk directory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Tutors ────────────────────────────────────────────────────────────────

  async fn add_tutor(&self, input: NewTutor) -> Result<Tutor> {
    let input = input.validated()?;

    let raw = RawTutor {
      tutor_id:    encode_uuid(Uuid::new_v4()),
      name:        input.name,
      email:       input.email,
      hourly_rate: input.hourly_rate,
      bio:         input.bio,
      subjects:    encode_subjects(&input.subjects)?,
      avatar:      input.avatar,
      created_at:  encode_dt(Utc::now()),
      updated_at:  encode_dt(Utc::now()),
    };

    let stored = raw.clone();
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let taken: bool = tx
          .query_row(
            "SELECT 1 FROM tutors WHERE email = ?1",
            rusqlite::params![raw.email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(InsertOutcome::DuplicateEmail(raw.email));
        }

        tx.execute(
          "INSERT INTO tutors (tutor_id, name, email, hourly_rate, bio, subjects,
                               avatar, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            raw.tutor_id,
            raw.name,
            raw.email,
            raw.hourly_rate,
            raw.bio,
            raw.subjects,
            raw.avatar,
            raw.created_at,
            raw.updated_at,
          ],
        )?;
        tx.commit()?;
        Ok(InsertOutcome::Created)
      })
      .await?;

    match outcome {
      InsertOutcome::Created => Ok(stored.into_tutor()?),
      InsertOutcome::DuplicateEmail(email) => {
        Err(CoreError::DuplicateEmail(email).into())
      }
    }
  }

  async fn get_tutor(&self, id: Uuid) -> Result<Option<Tutor>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTutor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TUTOR_COLUMNS} FROM tutors WHERE tutor_id = ?1"),
              rusqlite::params![id_str],
              RawTutor::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTutor::into_tutor).transpose()
  }

  async fn list_tutors(&self) -> Result<Vec<Tutor>> {
    let raws: Vec<RawTutor> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TUTOR_COLUMNS} FROM tutors ORDER BY created_at, tutor_id"
        ))?;
        let rows = stmt
          .query_map([], RawTutor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTutor::into_tutor).collect()
  }

  async fn update_tutor(&self, id: Uuid, patch: TutorPatch) -> Result<Tutor> {
    let patch = patch.validated()?;
    let id_str = encode_uuid(id);
    let subjects_json = patch
      .subjects
      .as_ref()
      .map(|s| encode_subjects(s))
      .transpose()?;
    let TutorPatch { name, email, hourly_rate, bio, avatar, .. } = patch;
    let now_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let row: Option<RawTutor> = tx
          .query_row(
            &format!("SELECT {TUTOR_COLUMNS} FROM tutors WHERE tutor_id = ?1"),
            rusqlite::params![id_str],
            RawTutor::from_row,
          )
          .optional()?;
        let Some(mut raw) = row else {
          return Ok(WriteOutcome::NotFound);
        };

        if let Some(new_email) = &email {
          if *new_email != raw.email {
            let taken: bool = tx
              .query_row(
                "SELECT 1 FROM tutors WHERE email = ?1 AND tutor_id != ?2",
                rusqlite::params![new_email, id_str],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false);
            if taken {
              return Ok(WriteOutcome::DuplicateEmail(new_email.clone()));
            }
          }
        }

        // Audit hook fires against the currently persisted rate, before the
        // new rate is written. An absent rate in the patch emits nothing.
        if let Some(new_rate) = hourly_rate {
          rate_change_hook(&tx, &id_str, raw.hourly_rate, new_rate, &now_str)?;
          raw.hourly_rate = new_rate;
        }

        if let Some(v) = name {
          raw.name = v;
        }
        if let Some(v) = email {
          raw.email = v;
        }
        // Double-Option fields: Some(None) clears the column.
        if let Some(v) = bio {
          raw.bio = v;
        }
        if let Some(v) = subjects_json {
          raw.subjects = v;
        }
        if let Some(v) = avatar {
          raw.avatar = v;
        }
        raw.updated_at = now_str.clone();

        tx.execute(
          "UPDATE tutors
           SET name = ?2, email = ?3, hourly_rate = ?4, bio = ?5,
               subjects = ?6, avatar = ?7, updated_at = ?8
           WHERE tutor_id = ?1",
          rusqlite::params![
            raw.tutor_id,
            raw.name,
            raw.email,
            raw.hourly_rate,
            raw.bio,
            raw.subjects,
            raw.avatar,
            raw.updated_at,
          ],
        )?;
        tx.commit()?;
        Ok(WriteOutcome::Written(raw))
      })
      .await?;

    match outcome {
      WriteOutcome::Written(raw) => Ok(raw.into_tutor()?),
      WriteOutcome::NotFound => Err(CoreError::TutorNotFound(id).into()),
      WriteOutcome::DuplicateEmail(email) => {
        Err(CoreError::DuplicateEmail(email).into())
      }
    }
  }

  async fn delete_tutor(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM tutors WHERE tutor_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(CoreError::TutorNotFound(id).into());
    }
    Ok(())
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn add_student(&self, input: NewStudent) -> Result<Student> {
    let input = input.validated()?;

    let raw = RawStudent {
      student_id:  encode_uuid(Uuid::new_v4()),
      name:        input.name,
      email:       input.email,
      grade_level: input.grade_level,
      created_at:  encode_dt(Utc::now()),
      updated_at:  encode_dt(Utc::now()),
    };

    let stored = raw.clone();
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let taken: bool = tx
          .query_row(
            "SELECT 1 FROM students WHERE email = ?1",
            rusqlite::params![raw.email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(InsertOutcome::DuplicateEmail(raw.email));
        }

        tx.execute(
          "INSERT INTO students (student_id, name, email, grade_level,
                                 created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            raw.student_id,
            raw.name,
            raw.email,
            raw.grade_level,
            raw.created_at,
            raw.updated_at,
          ],
        )?;
        tx.commit()?;
        Ok(InsertOutcome::Created)
      })
      .await?;

    match outcome {
      InsertOutcome::Created => Ok(stored.into_student()?),
      InsertOutcome::DuplicateEmail(email) => {
        Err(CoreError::DuplicateEmail(email).into())
      }
    }
  }

  async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1"),
              rusqlite::params![id_str],
              RawStudent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at, student_id"
        ))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn update_student(&self, id: Uuid, patch: StudentPatch) -> Result<Student> {
    let patch = patch.validated()?;
    let id_str = encode_uuid(id);
    let StudentPatch { name, email, grade_level } = patch;
    let now_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let row: Option<RawStudent> = tx
          .query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1"),
            rusqlite::params![id_str],
            RawStudent::from_row,
          )
          .optional()?;
        let Some(mut raw) = row else {
          return Ok(WriteOutcome::NotFound);
        };

        if let Some(new_email) = &email {
          if *new_email != raw.email {
            let taken: bool = tx
              .query_row(
                "SELECT 1 FROM students WHERE email = ?1 AND student_id != ?2",
                rusqlite::params![new_email, id_str],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false);
            if taken {
              return Ok(WriteOutcome::DuplicateEmail(new_email.clone()));
            }
          }
        }

        if let Some(v) = name {
          raw.name = v;
        }
        if let Some(v) = email {
          raw.email = v;
        }
        if let Some(v) = grade_level {
          raw.grade_level = v;
        }
        raw.updated_at = now_str.clone();

        tx.execute(
          "UPDATE students
           SET name = ?2, email = ?3, grade_level = ?4, updated_at = ?5
           WHERE student_id = ?1",
          rusqlite::params![
            raw.student_id,
            raw.name,
            raw.email,
            raw.grade_level,
            raw.updated_at,
          ],
        )?;
        tx.commit()?;
        Ok(WriteOutcome::Written(raw))
      })
      .await?;

    match outcome {
      WriteOutcome::Written(raw) => Ok(raw.into_student()?),
      WriteOutcome::NotFound => Err(CoreError::StudentNotFound(id).into()),
      WriteOutcome::DuplicateEmail(email) => {
        Err(CoreError::DuplicateEmail(email).into())
      }
    }
  }

  async fn delete_student(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM students WHERE student_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(CoreError::StudentNotFound(id).into());
    }
    Ok(())
  }

  // ── Enrollment ────────────────────────────────────────────────────────────

  async fn enroll(&self, tutor_id: Uuid, student_id: Uuid) -> Result<Enrollment> {
    let tutor_str = encode_uuid(tutor_id);
    let student_str = encode_uuid(student_id);
    let now_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let tutor_exists: bool = tx
          .query_row(
            "SELECT 1 FROM tutors WHERE tutor_id = ?1",
            rusqlite::params![tutor_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !tutor_exists {
          return Ok(EnrollOutcome::TutorMissing);
        }

        let student_exists: bool = tx
          .query_row(
            "SELECT 1 FROM students WHERE student_id = ?1",
            rusqlite::params![student_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !student_exists {
          return Ok(EnrollOutcome::StudentMissing);
        }

        // Idempotent: re-enrolling an existing pair returns the original link.
        let existing: Option<String> = tx
          .query_row(
            "SELECT enrolled_at FROM enrollments
             WHERE tutor_id = ?1 AND student_id = ?2",
            rusqlite::params![tutor_str, student_str],
            |r| r.get(0),
          )
          .optional()?;
        if let Some(at) = existing {
          return Ok(EnrollOutcome::Linked(at));
        }

        tx.execute(
          "INSERT INTO enrollments (tutor_id, student_id, enrolled_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![tutor_str, student_str, now_str],
        )?;
        tx.commit()?;
        Ok(EnrollOutcome::Linked(now_str))
      })
      .await?;

    match outcome {
      EnrollOutcome::Linked(at) => Ok(Enrollment {
        tutor_id,
        student_id,
        enrolled_at: crate::encode::decode_dt(&at)?,
      }),
      EnrollOutcome::TutorMissing => Err(CoreError::TutorNotFound(tutor_id).into()),
      EnrollOutcome::StudentMissing => {
        Err(CoreError::StudentNotFound(student_id).into())
      }
    }
  }

  async fn unenroll(&self, tutor_id: Uuid, student_id: Uuid) -> Result<()> {
    let tutor_str = encode_uuid(tutor_id);
    let student_str = encode_uuid(student_id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM enrollments WHERE tutor_id = ?1 AND student_id = ?2",
          rusqlite::params![tutor_str, student_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(CoreError::EnrollmentNotFound { tutor_id, student_id }.into());
    }
    Ok(())
  }

  async fn students_of(&self, tutor_id: Uuid) -> Result<Vec<Student>> {
    let tutor_str = encode_uuid(tutor_id);

    let raws: Vec<RawStudent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.student_id, s.name, s.email, s.grade_level,
                  s.created_at, s.updated_at
           FROM students s
           JOIN enrollments e ON e.student_id = s.student_id
           WHERE e.tutor_id = ?1
           ORDER BY s.created_at, s.student_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![tutor_str], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn tutors_of(&self, student_id: Uuid) -> Result<Vec<Tutor>> {
    let student_str = encode_uuid(student_id);

    let raws: Vec<RawTutor> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT t.tutor_id, t.name, t.email, t.hourly_rate, t.bio,
                  t.subjects, t.avatar, t.created_at, t.updated_at
           FROM tutors t
           JOIN enrollments e ON e.tutor_id = t.tutor_id
           WHERE e.student_id = ?1
           ORDER BY t.created_at, t.tutor_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![student_str], RawTutor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTutor::into_tutor).collect()
  }

  // ── Rate audit log ────────────────────────────────────────────────────────

  async fn rate_history(&self, tutor_id: Uuid) -> Result<Vec<RateChange>> {
    let tutor_str = encode_uuid(tutor_id);

    let raws: Vec<RawRateChange> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT rate_change_id, tutor_id, old_rate, new_rate, changed_at, created_at
           FROM tutor_rate_changes
           WHERE tutor_id = ?1
           ORDER BY changed_at, rate_change_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![tutor_str], RawRateChange::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRateChange::into_rate_change).collect()
  }

  async fn adjust_rates(&self, tutor_ids: &[Uuid], percentage: f64) -> Result<Vec<Tutor>> {
    if tutor_ids.is_empty() {
      return Err(CoreError::EmptySelection.into());
    }
    if !percentage.is_finite() {
      return Err(
        CoreError::validation("percentage", "must be a number").into(),
      );
    }

    let id_strs: Vec<String> = tutor_ids.iter().copied().map(encode_uuid).collect();
    let now_str = encode_dt(Utc::now());

    let result = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut raws = Vec::with_capacity(id_strs.len());

        for id_str in &id_strs {
          let row: Option<RawTutor> = tx
            .query_row(
              &format!("SELECT {TUTOR_COLUMNS} FROM tutors WHERE tutor_id = ?1"),
              rusqlite::params![id_str],
              RawTutor::from_row,
            )
            .optional()?;
          let Some(mut raw) = row else {
            // Early return without commit: the whole batch rolls back.
            return Ok(BulkOutcome::MissingTutor(id_str.clone()));
          };

          let new_rate = apply_percentage(raw.hourly_rate, percentage);
          rate_change_hook(&tx, id_str, raw.hourly_rate, new_rate, &now_str)?;
          tx.execute(
            "UPDATE tutors SET hourly_rate = ?2, updated_at = ?3 WHERE tutor_id = ?1",
            rusqlite::params![id_str, new_rate, now_str],
          )?;

          raw.hourly_rate = new_rate;
          raw.updated_at = now_str.clone();
          raws.push(raw);
        }

        tx.commit()?;
        Ok(BulkOutcome::Adjusted(raws))
      })
      .await;

    // Log-and-reraise: the caller (admin UI) reports total failure, the log
    // identifies which tutor broke the batch.
    match result {
      Ok(BulkOutcome::Adjusted(raws)) => {
        raws.into_iter().map(RawTutor::into_tutor).collect()
      }
      Ok(BulkOutcome::MissingTutor(id_str)) => {
        tracing::error!(tutor_id = %id_str, percentage, "bulk rate adjustment rolled back: tutor not found");
        let id = crate::encode::decode_uuid(&id_str)?;
        Err(CoreError::TutorNotFound(id).into())
      }
      Err(e) => {
        tracing::error!(error = %e, percentage, "bulk rate adjustment rolled back");
        Err(e.into())
      }
    }
  }

  // ── Search & stats ────────────────────────────────────────────────────────

  async fn search(&self, query: &TutorQuery) -> Result<TutorPage> {
    use rusqlite::types::Value;

    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let page = query.page.unwrap_or(1).max(1);

    // Build the WHERE clause criterion by criterion. Presence is what
    // matters: `min_hourly_rate = Some(0.0)` is a real constraint.
    let mut conds: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(term) = query.search.as_deref() {
      if !term.is_empty() {
        conds.push("name LIKE ?".into());
        params.push(Value::Text(format!("%{term}%")));
      }
    }
    for subject in &query.subjects {
      conds.push(
        "EXISTS (SELECT 1 FROM json_each(tutors.subjects)
                 WHERE json_each.value = ?)"
          .into(),
      );
      params.push(Value::Text(subject.clone()));
    }
    if let Some(min) = query.min_hourly_rate {
      conds.push("hourly_rate >= ?".into());
      params.push(Value::Real(min));
    }
    if let Some(max) = query.max_hourly_rate {
      conds.push("hourly_rate <= ?".into());
      params.push(Value::Real(max));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM tutors {where_clause}");
    let page_sql = format!(
      "SELECT {TUTOR_COLUMNS} FROM tutors {where_clause}
       ORDER BY created_at, tutor_id
       LIMIT ? OFFSET ?"
    );
    // page and per_page come straight off the query string; saturate instead
    // of trusting the multiplication.
    let offset = (page - 1).saturating_mul(per_page);

    let (total, raws): (usize, Vec<RawTutor>) = self
      .conn
      .call(move |conn| {
        let total: usize = conn.query_row(
          &count_sql,
          rusqlite::params_from_iter(params.iter()),
          |r| r.get(0),
        )?;

        let mut page_params = params;
        page_params.push(Value::Integer(i64::try_from(per_page).unwrap_or(i64::MAX)));
        page_params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        let mut stmt = conn.prepare(&page_sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(page_params.iter()),
            RawTutor::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let tutors = raws
      .into_iter()
      .map(RawTutor::into_tutor)
      .collect::<Result<Vec<_>>>()?;

    Ok(TutorPage {
      tutors,
      total,
      page,
      page_count: total.div_ceil(per_page).max(1),
      per_page,
    })
  }

  async fn stats(&self) -> Result<DirectoryStats> {
    self
      .conn
      .call(|conn| {
        let active_tutors: usize = conn.query_row(
          "SELECT COUNT(*) FROM tutors WHERE json_array_length(subjects) > 0",
          [],
          |r| r.get(0),
        )?;

        let total_students: usize =
          conn.query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))?;

        let average_hourly_rate: Option<f64> =
          conn.query_row("SELECT AVG(hourly_rate) FROM tutors", [], |r| r.get(0))?;

        // Mirrors the dashboard definition: group by each tutor's primary
        // (first-listed) subject, rank by average rate.
        let highest_paid_subject: Option<String> = conn
          .query_row(
            "SELECT json_extract(subjects, '$[0]') AS subject
             FROM tutors
             WHERE subject IS NOT NULL
             GROUP BY subject
             ORDER BY AVG(hourly_rate) DESC
             LIMIT 1",
            [],
            |r| r.get(0),
          )
          .optional()?;

        Ok(DirectoryStats {
          active_tutors,
          total_students,
          average_hourly_rate,
          highest_paid_subject,
        })
      })
      .await
      .map_err(Error::from)
  }
}

//! SQL schema for the tutordesk SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS tutors (
    tutor_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    hourly_rate REAL NOT NULL CHECK (hourly_rate >= 0),
    bio         TEXT,
    subjects    TEXT NOT NULL,   -- JSON array of strings, never empty
    avatar      TEXT,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    student_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    grade_level INTEGER NOT NULL CHECK (grade_level BETWEEN 1 AND 12),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Many-to-many tutor/student link. The composite primary key keeps a pair
-- from appearing twice; rows vanish with either side.
CREATE TABLE IF NOT EXISTS enrollments (
    tutor_id    TEXT NOT NULL REFERENCES tutors(tutor_id)     ON DELETE CASCADE,
    student_id  TEXT NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
    enrolled_at TEXT NOT NULL,
    PRIMARY KEY (tutor_id, student_id)
);

-- Rate changes are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table; rows only
-- disappear via the cascade when the owning tutor is deleted.
CREATE TABLE IF NOT EXISTS tutor_rate_changes (
    rate_change_id TEXT PRIMARY KEY,
    tutor_id       TEXT NOT NULL REFERENCES tutors(tutor_id) ON DELETE CASCADE,
    old_rate       REAL NOT NULL,
    new_rate       REAL NOT NULL,
    changed_at     TEXT NOT NULL,   -- logical event time of the change
    created_at     TEXT NOT NULL    -- when the record was written
);

CREATE INDEX IF NOT EXISTS tutors_name_idx         ON tutors(name);
CREATE INDEX IF NOT EXISTS tutors_rate_idx         ON tutors(hourly_rate);
CREATE INDEX IF NOT EXISTS rate_changes_tutor_idx  ON tutor_rate_changes(tutor_id);
CREATE INDEX IF NOT EXISTS enrollments_student_idx ON enrollments(student_id);

PRAGMA user_version = 1;
";

//! JSON REST API for tutordesk.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tutordesk_core::store::DirectoryStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tutordesk_api::api_router(store.clone()))
//! ```

pub mod enrollments;
pub mod error;
pub mod search;
pub mod stats;
pub mod students;
pub mod tutors;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tutordesk_core::store::DirectoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DirectoryStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Tutors
    .route("/tutors", get(tutors::list::<S>).post(tutors::create::<S>))
    .route(
      "/tutors/{id}",
      get(tutors::get_one::<S>)
        .put(tutors::update_one::<S>)
        .delete(tutors::delete_one::<S>),
    )
    .route("/tutors/{id}/rate-changes", get(tutors::rate_changes::<S>))
    .route("/tutors/rate-adjustments", post(tutors::adjust_rates::<S>))
    // Enrollment
    .route("/tutors/{id}/students", get(enrollments::students_of::<S>))
    .route(
      "/tutors/{id}/students/{student_id}",
      axum::routing::put(enrollments::enroll::<S>).delete(enrollments::unenroll::<S>),
    )
    .route("/students/{id}/tutors", get(enrollments::tutors_of::<S>))
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route(
      "/students/{id}",
      get(students::get_one::<S>)
        .put(students::update_one::<S>)
        .delete(students::delete_one::<S>),
    )
    // Search & stats
    .route("/search", get(search::handler::<S>))
    .route("/stats", get(stats::handler::<S>))
    .with_state(store)
}

//! Handler for `GET /search`.
//!
//! Query params map onto [`TutorQuery`] fields. Subjects are accepted two
//! ways: a repeatable `subject` param taken verbatim (so a subject containing
//! a comma survives), and a `subjects` param as comma-separated shorthand.
//! Criteria are ANDed; an absent parameter applies no constraint, while
//! `min_hourly_rate=0` is a real inclusive bound.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use tutordesk_core::store::{DirectoryStore, TutorPage, TutorQuery};

use crate::error::ApiError;

/// `GET /search[?search=...][&subject=...][&subjects=...][&min_hourly_rate=...][&page=...]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TutorPage>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = build_query(pairs)?;
  let page = store
    .search(&query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(page))
}

/// Fold raw query pairs into a [`TutorQuery`]. Unknown keys are ignored;
/// malformed numeric values are field-scoped validation errors.
fn build_query(pairs: Vec<(String, String)>) -> Result<TutorQuery, ApiError> {
  let mut query = TutorQuery::default();
  for (key, value) in pairs {
    match key.as_str() {
      "search" => query.search = Some(value),
      "subject" => {
        if !value.is_empty() {
          query.subjects.push(value);
        }
      }
      "subjects" => query.subjects.extend(
        value
          .split(',')
          .map(str::trim)
          .filter(|t| !t.is_empty())
          .map(str::to_owned),
      ),
      "min_hourly_rate" => query.min_hourly_rate = Some(parse_rate(&key, &value)?),
      "max_hourly_rate" => query.max_hourly_rate = Some(parse_rate(&key, &value)?),
      "page" => query.page = Some(parse_index(&key, &value)?),
      "per_page" => query.per_page = Some(parse_index(&key, &value)?),
      _ => {}
    }
  }
  Ok(query)
}

fn parse_rate(field: &str, value: &str) -> Result<f64, ApiError> {
  value.parse().map_err(|_| ApiError::Validation {
    field:   field.to_owned(),
    message: "must be a number".to_owned(),
  })
}

fn parse_index(field: &str, value: &str) -> Result<usize, ApiError> {
  value.parse().map_err(|_| ApiError::Validation {
    field:   field.to_owned(),
    message: "must be a non-negative integer".to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn repeated_subject_params_stay_verbatim() {
    let q = build_query(pairs(&[
      ("subject", "Math"),
      ("subject", "Probability, Statistics"),
    ]))
    .unwrap();
    assert_eq!(q.subjects, ["Math", "Probability, Statistics"]);
  }

  #[test]
  fn comma_separated_shorthand_splits_and_trims() {
    let q = build_query(pairs(&[("subjects", "Math, Science,")])).unwrap();
    assert_eq!(q.subjects, ["Math", "Science"]);
  }

  #[test]
  fn zero_rate_bound_is_a_real_constraint() {
    let q = build_query(pairs(&[("min_hourly_rate", "0")])).unwrap();
    assert_eq!(q.min_hourly_rate, Some(0.0));
  }

  #[test]
  fn malformed_numbers_are_field_scoped_errors() {
    let err = build_query(pairs(&[("page", "two")])).unwrap_err();
    assert!(matches!(err, ApiError::Validation { field, .. } if field == "page"));

    let err = build_query(pairs(&[("max_hourly_rate", "lots")])).unwrap_err();
    assert!(
      matches!(err, ApiError::Validation { field, .. } if field == "max_hourly_rate")
    );
  }
}

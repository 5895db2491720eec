//! Rate-change audit records and the arithmetic behind rate adjustments.
//!
//! Audit records are append-only. They are emitted by the store's tutor
//! update path whenever the persisted hourly rate actually changes, and are
//! never updated or deleted except via cascade with the owning tutor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One before/after hourly-rate transition for a tutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateChange {
  pub rate_change_id: Uuid,
  pub tutor_id:       Uuid,
  pub old_rate:       f64,
  pub new_rate:       f64,
  /// Logical event time of the rate change — distinct from `created_at`,
  /// which is when the record itself was written.
  pub changed_at:     DateTime<Utc>,
  pub created_at:     DateTime<Utc>,
}

/// Normalise a rate to two decimal places (dollars and cents).
pub fn round_rate(rate: f64) -> f64 {
  (rate * 100.0).round() / 100.0
}

/// Apply a signed percentage to a rate: `rate * (1 + pct/100)`, clamped at
/// zero and rounded to cents. `pct <= -100` always yields `0.0`.
pub fn apply_percentage(rate: f64, pct: f64) -> f64 {
  round_rate((rate * (1.0 + pct / 100.0)).max(0.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn percentage_increase() {
    assert_eq!(apply_percentage(50.0, 10.0), 55.0);
    assert_eq!(apply_percentage(80.0, 10.0), 88.0);
  }

  #[test]
  fn percentage_decrease() {
    assert_eq!(apply_percentage(50.0, -5.0), 47.5);
  }

  #[test]
  fn zero_percent_is_identity() {
    assert_eq!(apply_percentage(42.37, 0.0), 42.37);
  }

  #[test]
  fn clamps_at_zero() {
    assert_eq!(apply_percentage(50.0, -100.0), 0.0);
    assert_eq!(apply_percentage(50.0, -200.0), 0.0);
  }

  #[test]
  fn rounds_to_cents() {
    // 33.33 * 1.1 = 36.663 → 36.66
    assert_eq!(apply_percentage(33.33, 10.0), 36.66);
    assert_eq!(round_rate(10.005), 10.01);
  }
}

//! Live filter session — the pure state machine behind the tutor browser.
//!
//! All filter mutations funnel through validating setters: a rejected value
//! leaves the session untouched, and any accepted filter change snaps the
//! page back to 1 so results never point past the (possibly shrunken) result
//! set. Page navigation is the one mutation that leaves filters alone.

use tutordesk_core::{
  Error, Result,
  store::{DEFAULT_PAGE_SIZE, TutorQuery},
};

/// Default upper rate bound shown when a session starts.
pub const DEFAULT_MAX_RATE: f64 = 100.0;

// ─── FilterSession ────────────────────────────────────────────────────────────

/// Current filter and pagination state of a tutor-browsing session.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSession {
  search_term:     String,
  subjects:        Vec<String>,
  min_hourly_rate: f64,
  max_hourly_rate: f64,
  page:            usize,
}

impl Default for FilterSession {
  fn default() -> Self {
    Self {
      search_term:     String::new(),
      subjects:        Vec::new(),
      min_hourly_rate: 0.0,
      max_hourly_rate: DEFAULT_MAX_RATE,
      page:            1,
    }
  }
}

impl FilterSession {
  pub fn new() -> Self { Self::default() }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn search_term(&self) -> &str { &self.search_term }
  pub fn subjects(&self) -> &[String] { &self.subjects }
  pub fn min_hourly_rate(&self) -> f64 { self.min_hourly_rate }
  pub fn max_hourly_rate(&self) -> f64 { self.max_hourly_rate }
  pub fn page(&self) -> usize { self.page }

  // ── Filter mutations (reset page) ─────────────────────────────────────────

  /// Replace the name search term. Always accepted.
  pub fn set_search_term(&mut self, term: impl Into<String>) {
    self.search_term = term.into();
    self.page = 1;
  }

  /// Add `subject` to the filter if absent, remove it if present.
  pub fn toggle_subject(&mut self, subject: &str) {
    if let Some(pos) = self.subjects.iter().position(|s| s == subject) {
      self.subjects.remove(pos);
    } else {
      self.subjects.push(subject.to_string());
    }
    self.page = 1;
  }

  /// Set the inclusive lower rate bound. Rejects negative or non-finite
  /// values without touching the session.
  pub fn set_min_hourly_rate(&mut self, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
      return Err(Error::validation(
        "min_hourly_rate",
        "must be a number of at least 0",
      ));
    }
    self.min_hourly_rate = rate;
    self.page = 1;
    Ok(())
  }

  /// Set the inclusive upper rate bound. Rejects negative or non-finite
  /// values without touching the session.
  pub fn set_max_hourly_rate(&mut self, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
      return Err(Error::validation(
        "max_hourly_rate",
        "must be a number of at least 0",
      ));
    }
    self.max_hourly_rate = rate;
    self.page = 1;
    Ok(())
  }

  // ── Page navigation (preserves filters) ───────────────────────────────────

  /// Jump to `page` (1-based). Filters are left untouched.
  pub fn set_page(&mut self, page: usize) -> Result<()> {
    if page == 0 {
      return Err(Error::validation("page", "pages are numbered from 1"));
    }
    self.page = page;
    Ok(())
  }

  // ── Query construction ────────────────────────────────────────────────────

  /// Render the session as a [`TutorQuery`]. An empty search term becomes
  /// `None`; both rate bounds are always carried, so a minimum of 0 is a
  /// real bound rather than "unset".
  pub fn to_query(&self) -> TutorQuery {
    TutorQuery {
      search:          (!self.search_term.is_empty()).then(|| self.search_term.clone()),
      subjects:        self.subjects.clone(),
      min_hourly_rate: Some(self.min_hourly_rate),
      max_hourly_rate: Some(self.max_hourly_rate),
      page:            Some(self.page),
      per_page:        Some(DEFAULT_PAGE_SIZE),
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_with_defaults() {
    let s = FilterSession::new();
    assert_eq!(s.search_term(), "");
    assert!(s.subjects().is_empty());
    assert_eq!(s.min_hourly_rate(), 0.0);
    assert_eq!(s.max_hourly_rate(), DEFAULT_MAX_RATE);
    assert_eq!(s.page(), 1);
  }

  #[test]
  fn filter_change_resets_page() {
    let mut s = FilterSession::new();
    s.set_page(4).unwrap();

    s.set_search_term("smith");
    assert_eq!(s.page(), 1);

    s.set_page(3).unwrap();
    s.toggle_subject("Math");
    assert_eq!(s.page(), 1);

    s.set_page(2).unwrap();
    s.set_min_hourly_rate(25.0).unwrap();
    assert_eq!(s.page(), 1);

    s.set_page(5).unwrap();
    s.set_max_hourly_rate(75.0).unwrap();
    assert_eq!(s.page(), 1);
  }

  #[test]
  fn page_navigation_preserves_filters() {
    let mut s = FilterSession::new();
    s.set_search_term("jane");
    s.toggle_subject("Physics");
    s.set_min_hourly_rate(10.0).unwrap();

    s.set_page(7).unwrap();
    assert_eq!(s.search_term(), "jane");
    assert_eq!(s.subjects(), ["Physics"]);
    assert_eq!(s.min_hourly_rate(), 10.0);
    assert_eq!(s.page(), 7);
  }

  #[test]
  fn rejected_rate_leaves_session_untouched() {
    let mut s = FilterSession::new();
    s.set_min_hourly_rate(20.0).unwrap();
    s.set_page(3).unwrap();
    let before = s.clone();

    assert!(s.set_min_hourly_rate(-10.0).is_err());
    assert!(s.set_min_hourly_rate(f64::NAN).is_err());
    assert!(s.set_max_hourly_rate(-1.0).is_err());
    assert_eq!(s, before);
  }

  #[test]
  fn page_zero_is_rejected() {
    let mut s = FilterSession::new();
    s.set_page(2).unwrap();
    assert!(s.set_page(0).is_err());
    assert_eq!(s.page(), 2);
  }

  #[test]
  fn toggle_subject_adds_and_removes() {
    let mut s = FilterSession::new();
    s.toggle_subject("Math");
    s.toggle_subject("Science");
    assert_eq!(s.subjects(), ["Math", "Science"]);
    s.toggle_subject("Math");
    assert_eq!(s.subjects(), ["Science"]);
  }

  #[test]
  fn query_carries_bounds_and_drops_empty_search() {
    let s = FilterSession::new();
    let q = s.to_query();
    assert_eq!(q.search, None);
    assert_eq!(q.min_hourly_rate, Some(0.0));
    assert_eq!(q.max_hourly_rate, Some(DEFAULT_MAX_RATE));
    assert_eq!(q.page, Some(1));
    assert_eq!(q.per_page, Some(DEFAULT_PAGE_SIZE));

    let mut s = FilterSession::new();
    s.set_search_term("ada");
    assert_eq!(s.to_query().search.as_deref(), Some("ada"));
  }
}

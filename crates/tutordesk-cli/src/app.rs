//! Application state machine and event dispatcher.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tutordesk_core::{
  rate::RateChange, store::TutorPage, tutor::{SUGGESTED_SUBJECTS, Tutor},
};
use uuid::Uuid;

use crate::{client::ApiClient, session::FilterSession};

/// How long after the last search-term keystroke before a query fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Step used by the rate-bound adjustment keys.
const RATE_STEP: f64 = 5.0;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the tutor list; right pane shows a preview.
  TutorList,
  /// Focus on the tutor detail pane.
  TutorDetail,
}

/// Which input surface receives printable keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  /// Typing into the search term; queries fire on a debounce.
  Search,
  /// Navigating the subject picker.
  Subjects,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Current input mode within the list screen.
  pub mode: InputMode,

  /// Filter and pagination state. All query construction goes through here.
  pub session: FilterSession,

  /// Last page of results returned by the API.
  pub results: Option<TutorPage>,

  /// Cursor position within the current result page.
  pub list_cursor: usize,

  /// Cursor position within the subject picker.
  pub subject_cursor: usize,

  /// Tutor shown in the detail pane.
  pub selected_tutor: Option<Tutor>,

  /// Rate history for the selected tutor, oldest first.
  pub rate_history: Vec<RateChange>,

  /// Scroll offset within the detail pane.
  pub detail_scroll: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Set when a search-term keystroke is waiting out the debounce window.
  pub pending_search: Option<Instant>,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with a fresh [`FilterSession`] and no results.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::TutorList,
      mode: InputMode::Normal,
      session: FilterSession::new(),
      results: None,
      list_cursor: 0,
      subject_cursor: 0,
      selected_tutor: None,
      rate_history: Vec::new(),
      detail_scroll: 0,
      status_msg: String::new(),
      pending_search: None,
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Run the session's current query and replace `self.results`.
  pub async fn refresh(&mut self) -> anyhow::Result<()> {
    self.pending_search = None;
    self.status_msg = "Loading…".into();
    match self.client.search(&self.session.to_query()).await {
      Ok(page) => {
        self.list_cursor = self.list_cursor.min(page.tutors.len().saturating_sub(1));
        self.results = Some(page);
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Fire the debounced query once the window has elapsed.
  pub async fn tick(&mut self) {
    if let Some(since) = self.pending_search {
      if since.elapsed() >= SEARCH_DEBOUNCE {
        // Errors already land in the status bar.
        let _ = self.refresh().await;
      }
    }
  }

  /// The tutor under the list cursor, if any.
  pub fn cursor_tutor(&self) -> Option<&Tutor> {
    self.results.as_ref()?.tutors.get(self.list_cursor)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.mode {
      InputMode::Search => return self.handle_search_key(key).await,
      InputMode::Subjects => return self.handle_subjects_key(key).await,
      InputMode::Normal => {}
    }

    match self.screen {
      Screen::TutorList => self.handle_list_key(key).await,
      Screen::TutorDetail => self.handle_detail_key(key).await,
    }
  }

  async fn handle_search_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.mode = InputMode::Normal;
        self.session.set_search_term("");
        self.list_cursor = 0;
        self.refresh().await.ok();
      }
      KeyCode::Enter => {
        self.mode = InputMode::Normal;
        // Flush immediately instead of waiting out the debounce.
        if self.pending_search.is_some() {
          self.refresh().await.ok();
        }
      }
      KeyCode::Backspace => {
        let mut term = self.session.search_term().to_string();
        term.pop();
        self.session.set_search_term(term);
        self.list_cursor = 0;
        self.pending_search = Some(Instant::now());
      }
      KeyCode::Char(c) => {
        let mut term = self.session.search_term().to_string();
        term.push(c);
        self.session.set_search_term(term);
        self.list_cursor = 0;
        self.pending_search = Some(Instant::now());
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_subjects_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc | KeyCode::Enter => {
        self.mode = InputMode::Normal;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.subject_cursor + 1 < SUGGESTED_SUBJECTS.len() {
          self.subject_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.subject_cursor = self.subject_cursor.saturating_sub(1);
      }
      KeyCode::Char(' ') => {
        let subject = SUGGESTED_SUBJECTS[self.subject_cursor];
        self.session.toggle_subject(subject);
        self.list_cursor = 0;
        self.refresh().await.ok();
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.results.as_ref().map_or(0, |p| p.tutors.len());
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_tutor().map(|t| t.tutor_id) {
          self.open_detail(id).await?;
        }
      }

      // Search term
      KeyCode::Char('/') => {
        self.mode = InputMode::Search;
      }

      // Subject picker
      KeyCode::Char('s') => {
        self.mode = InputMode::Subjects;
      }

      // Rate bounds
      KeyCode::Char('-') => {
        let candidate = (self.session.min_hourly_rate() - RATE_STEP).max(0.0);
        self.apply_rate(candidate, true).await;
      }
      KeyCode::Char('=') | KeyCode::Char('+') => {
        let candidate = self.session.min_hourly_rate() + RATE_STEP;
        self.apply_rate(candidate, true).await;
      }
      KeyCode::Char('[') => {
        let candidate = (self.session.max_hourly_rate() - RATE_STEP).max(0.0);
        self.apply_rate(candidate, false).await;
      }
      KeyCode::Char(']') => {
        let candidate = self.session.max_hourly_rate() + RATE_STEP;
        self.apply_rate(candidate, false).await;
      }

      // Page navigation
      KeyCode::Char('n') | KeyCode::PageDown => {
        let page_count = self.results.as_ref().map_or(1, |p| p.page_count);
        if self.session.page() < page_count {
          self.session.set_page(self.session.page() + 1)?;
          self.list_cursor = 0;
          self.refresh().await.ok();
        }
      }
      KeyCode::Char('p') | KeyCode::PageUp => {
        if self.session.page() > 1 {
          self.session.set_page(self.session.page() - 1)?;
          self.list_cursor = 0;
          self.refresh().await.ok();
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::TutorList;
        self.selected_tutor = None;
        self.rate_history.clear();
      }

      // Scroll detail
      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll += 1;
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      _ => {}
    }
    Ok(true)
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Push a new rate bound through the session, surfacing rejections in the
  /// status bar and refreshing on success.
  async fn apply_rate(&mut self, rate: f64, is_min: bool) {
    let result = if is_min {
      self.session.set_min_hourly_rate(rate)
    } else {
      self.session.set_max_hourly_rate(rate)
    };
    match result {
      Ok(()) => {
        self.list_cursor = 0;
        self.refresh().await.ok();
      }
      Err(e) => self.status_msg = format!("Rejected: {e}"),
    }
  }

  /// Transition to `TutorDetail` for `tutor_id`, loading the rate history.
  async fn open_detail(&mut self, tutor_id: Uuid) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    let tutor = match self.client.get_tutor(tutor_id).await {
      Ok(t) => t,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return Ok(());
      }
    };
    let history = match self.client.rate_history(tutor_id).await {
      Ok(h) => h,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return Ok(());
      }
    };
    self.selected_tutor = Some(tutor);
    self.rate_history = history;
    self.detail_scroll = 0;
    self.status_msg = String::new();
    self.screen = Screen::TutorDetail;
    Ok(())
  }
}

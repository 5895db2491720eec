//! TUI rendering — orchestrates all panes.

pub mod tutor_detail;
pub mod tutor_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tutordesk_core::tutor::SUGGESTED_SUBJECTS;

use crate::app::{App, InputMode, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, filter bar, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // filter bar
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_filter_bar(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " tutordesk  [/] search  [s] subjects  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Filter bar ───────────────────────────────────────────────────────────────

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
  let session = &app.session;

  let search_text = if app.mode == InputMode::Search {
    format!("/{}_", session.search_term())
  } else if session.search_term().is_empty() {
    "/".to_string()
  } else {
    format!("/{}", session.search_term())
  };

  let subjects_text = if session.subjects().is_empty() {
    "any subject".to_string()
  } else {
    session.subjects().join("+")
  };

  let (page, page_count, total) = app
    .results
    .as_ref()
    .map(|p| (p.page, p.page_count, p.total))
    .unwrap_or((session.page(), 1, 0));

  let line = Line::from(vec![
    Span::styled(
      format!(" {search_text}"),
      Style::default().fg(Color::Yellow),
    ),
    Span::raw("  "),
    Span::styled(subjects_text, Style::default().fg(Color::Cyan)),
    Span::raw("  "),
    Span::styled(
      format!(
        "${:.0}–${:.0}/hr",
        session.min_hourly_rate(),
        session.max_hourly_rate()
      ),
      Style::default().fg(Color::Green),
    ),
    Span::raw("  "),
    Span::styled(
      format!("page {page}/{page_count} ({total} tutors)"),
      Style::default().fg(Color::DarkGray),
    ),
  ]);

  f.render_widget(Paragraph::new(line), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Split into left list pane (40%) and right pane (60%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  tutor_list::draw(f, cols[0], app);

  if app.mode == InputMode::Subjects {
    draw_subject_picker(f, cols[1], app);
  } else if app.selected_tutor.is_some() {
    tutor_detail::draw(f, cols[1], app);
  } else {
    draw_empty_detail(f, cols[1]);
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Select a tutor and press Enter.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Subject picker ───────────────────────────────────────────────────────────

fn draw_subject_picker(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Subjects — space toggles, Esc closes ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = SUGGESTED_SUBJECTS
    .iter()
    .map(|subject| {
      let selected = app.session.subjects().iter().any(|s| s == subject);
      let marker = if selected { "[x] " } else { "[ ] " };
      let style = if selected {
        Style::default().fg(Color::Cyan)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(subject.to_string(), style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.subject_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (&app.screen, &app.mode) {
    (_, InputMode::Search) => ("SEARCH", "Type to filter  Esc clear  Enter apply"),
    (_, InputMode::Subjects) => ("SUBJECTS", "↑↓/jk move  space toggle  Esc close"),
    (Screen::TutorList, _) => (
      "NORMAL",
      "↑↓/jk navigate  / search  s subjects  -/= min  [/] max  n/p page  Enter detail  q quit",
    ),
    (Screen::TutorDetail, _) => ("DETAIL", "↑↓/jk scroll  Esc back  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

//! Tutor list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Render the current page of tutors into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let tutors = app
    .results
    .as_ref()
    .map(|p| p.tutors.as_slice())
    .unwrap_or_default();
  let total = app.results.as_ref().map_or(0, |p| p.total);

  let title = format!(" Tutors ({}/{total}) ", tutors.len());

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  if tutors.is_empty() {
    f.render_widget(
      ratatui::widgets::Paragraph::new("No tutors match the current filters.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let name_width = inner.width.saturating_sub(12) as usize;

  let items: Vec<ListItem> = tutors
    .iter()
    .map(|tutor| {
      let name = if tutor.name.chars().count() > name_width {
        let mut t: String = tutor
          .name
          .chars()
          .take(name_width.saturating_sub(1))
          .collect();
        t.push('…');
        t
      } else {
        tutor.name.clone()
      };

      ListItem::new(Line::from(vec![
        Span::raw(format!("{name:<name_width$}")),
        Span::styled(
          format!("${:>7.2}/hr", tutor.hourly_rate),
          Style::default().fg(Color::Green),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

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

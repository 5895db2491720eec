//! Tutor detail pane — right panel with profile and rate history.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(tutor) = &app.selected_tutor else {
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", tutor.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let label = |text: &str| {
    Span::styled(
      format!("{text:<10}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
  };

  let mut lines: Vec<Line> = vec![
    Line::from(vec![label("email"), Span::raw(tutor.email.clone())]),
    Line::from(vec![
      label("rate"),
      Span::styled(
        format!("${:.2}/hr", tutor.hourly_rate),
        Style::default().fg(Color::Green),
      ),
    ]),
    Line::from(vec![
      label("subjects"),
      Span::raw(if tutor.subjects.is_empty() {
        "(none)".to_string()
      } else {
        tutor.subjects.join(", ")
      }),
    ]),
  ];

  if let Some(bio) = &tutor.bio {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![label("bio"), Span::raw(bio.clone())]));
  }

  // Rate history, oldest first as the API returns it.
  lines.push(Line::from(""));
  lines.push(Line::from(vec![Span::styled(
    "Rate history",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )]));

  if app.rate_history.is_empty() {
    lines.push(Line::from(vec![Span::styled(
      "  (no recorded changes)",
      Style::default().fg(Color::DarkGray),
    )]));
  } else {
    for change in &app.rate_history {
      lines.push(Line::from(vec![
        Span::styled(
          format!("  {}  ", change.changed_at.format("%Y-%m-%d %H:%M")),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(
          "${:.2} → ${:.2}",
          change.old_rate, change.new_rate
        )),
      ]));
    }
  }

  let scroll_offset = app.detail_scroll as u16;
  let para = Paragraph::new(lines)
    .wrap(Wrap { trim: false })
    .scroll((scroll_offset, 0));
  f.render_widget(para, inner);
}

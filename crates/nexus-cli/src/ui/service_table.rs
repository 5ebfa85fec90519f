//! Service table pane — loading skeleton, error state, empty states, and the
//! paginated rows.

use chrono::Local;
use nexus_core::{
  dashboard::{Body, TableState},
  service::{ServiceRecord, ServiceStatus},
  sort::SortConfig,
  source::ServiceSource,
  table::{ServiceSortKey, TableView},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::sort_arrow;
use crate::app::{App, InputMode};

const WIDTHS: [Constraint; 6] = [
  Constraint::Percentage(24),
  Constraint::Percentage(15),
  Constraint::Percentage(18),
  Constraint::Percentage(15),
  Constraint::Percentage(12),
  Constraint::Percentage(16),
];

/// Render the table body for any non-region state into `area`.
pub fn draw<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, body: Body<'_>, app: &App<S>) {
  let block = Block::default()
    .title(" System Status ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Search bar, table, pagination footer.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  draw_search(f, rows[0], app);

  match body {
    Body::Loading { skeleton_rows } => draw_skeleton(f, rows[1], skeleton_rows, app),
    Body::Failed { message } => draw_error(f, rows[1], message),
    Body::Table { view, state } => {
      draw_rows(f, rows[1], &view, &state, app);
      if state == TableState::Populated {
        draw_footer(f, rows[2], &view);
      }
    }
    Body::Regions { .. } => {}
  }
}

fn draw_search<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let query = app.selection.search();
  let (text, style) = match app.input {
    InputMode::Search => (format!("/{query}_"), Style::default().fg(Color::Yellow)),
    InputMode::Normal if query.is_empty() => ("/ Search services...".to_string(), Style::default().fg(Color::DarkGray)),
    InputMode::Normal => (format!("/{query}"), Style::default().fg(Color::Yellow)),
  };
  f.render_widget(Paragraph::new(text).style(style), area);
}

fn header(sort: Option<SortConfig<ServiceSortKey>>) -> Row<'static> {
  let col = |label: &str, key: ServiceSortKey, hotkey: char| {
    Cell::from(format!(
      "{label} ({hotkey}){}",
      sort_arrow(SortConfig::direction_for(sort, key))
    ))
  };
  Row::new(vec![
    col("Service", ServiceSortKey::Name, 'n'),
    col("Status", ServiceSortKey::Status, 's'),
    col("Type", ServiceSortKey::Kind, 't'),
    col("Region", ServiceSortKey::Region, 'g'),
    col("Uptime", ServiceSortKey::Uptime, 'u'),
    col("Updated", ServiceSortKey::LastUpdated, 'd'),
  ])
  .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn status_color(status: ServiceStatus) -> Color {
  match status {
    ServiceStatus::Active => Color::Green,
    ServiceStatus::Maintenance => Color::Yellow,
    ServiceStatus::Degraded => Color::LightRed,
    ServiceStatus::Offline => Color::Red,
  }
}

fn record_row<'a>(r: &'a ServiceRecord) -> Row<'a> {
  let uptime_color = if r.uptime > 99.0 {
    Color::Green
  } else {
    Color::Yellow
  };
  Row::new(vec![
    Cell::from(r.name.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
    Cell::from(Span::styled(
      format!("● {}", r.status),
      Style::default().fg(status_color(r.status)),
    )),
    Cell::from(r.kind.as_str()),
    Cell::from(r.region.as_str()),
    Cell::from(Span::styled(format!("{:.2}%", r.uptime), Style::default().fg(uptime_color))),
    Cell::from(Span::styled(
      r.last_updated.with_timezone(&Local).format("%H:%M:%S").to_string(),
      Style::default().fg(Color::Gray),
    )),
  ])
}

fn draw_rows<S: ServiceSource + 'static>(
  f: &mut Frame,
  area: Rect,
  view: &TableView<'_>,
  state: &TableState,
  app: &App<S>,
) {
  let rows: Vec<Row> = match state {
    TableState::Populated => view.rows.iter().map(|&r| record_row(r)).collect(),
    TableState::NoData => vec![empty_row("No services are being monitored.".to_string())],
    TableState::NoMatches { query } if query.is_empty() => {
      vec![empty_row("No services match the current filter.".to_string())]
    }
    TableState::NoMatches { query } => vec![empty_row(format!("No services found matching \"{query}\""))],
  };

  let table = Table::new(rows, WIDTHS).header(header(app.selection.sort()));
  f.render_widget(table, area);
}

fn empty_row(message: String) -> Row<'static> {
  Row::new(vec![Cell::from(Span::styled(message, Style::default().fg(Color::DarkGray)))])
}

fn draw_skeleton<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, count: usize, app: &App<S>) {
  let placeholder = Style::default().fg(Color::DarkGray);
  let rows: Vec<Row> = (0..count)
    .map(|_| Row::new(WIDTHS.iter().map(|_| Cell::from(Span::styled("░░░░░░░░", placeholder)))))
    .collect();
  let table = Table::new(rows, WIDTHS).header(header(app.selection.sort()));
  f.render_widget(table, area);
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
  let lines = vec![
    Line::from(""),
    Line::from(Span::styled(
      "Failed to load services",
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      "We couldn't fetch the latest operational data.",
      Style::default().fg(Color::Gray),
    )),
    Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    Line::from(""),
    Line::from(Span::styled(
      "[Enter] Retry connection",
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )),
  ];
  f.render_widget(Paragraph::new(lines).centered(), area);
}

fn draw_footer(f: &mut Frame, area: Rect, view: &TableView<'_>) {
  let showing = view
    .showing()
    .map(|(first, last)| format!("Showing {first} - {last} of {}", view.filtered_count))
    .unwrap_or_default();
  let prev = if view.has_prev() { "◀" } else { " " };
  let next = if view.has_next() { "▶" } else { " " };
  let line = Line::from(vec![
    Span::raw(showing),
    Span::styled(format!("   Show {} (p)", view.page_size), Style::default().fg(Color::Gray)),
    Span::raw(format!("   {prev} Page {} of {} {next}", view.page, view.total_pages)),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

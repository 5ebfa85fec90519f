//! TUI rendering — orchestrates all panes.

pub mod metrics;
pub mod region_table;
pub mod service_table;

use chrono::Local;
use nexus_core::{
  dashboard::{Body, Dashboard},
  selection::ViewMode,
  source::ServiceSource,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, InputMode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: ServiceSource + 'static>(f: &mut Frame, app: &App<S>) {
  let area = f.area();
  let dashboard = app.dashboard();

  // Vertical stack: header, metric cards, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(4), // cards
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  metrics::draw(f, rows[1], dashboard.metrics.as_ref(), app.selection.active_card());
  draw_body(f, rows[2], app, dashboard);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d %H:%M").to_string();

  let mut left = vec![Span::styled(
    " Nexus Operations  Live Service Monitoring",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  if app.controller.is_fetching() && app.records().is_some() {
    left.push(Span::styled("  Updating…", Style::default().fg(Color::Yellow)));
  }
  if app.controller.force_failure() {
    left.push(Span::styled("  [simulate error]", Style::default().fg(Color::Red)));
  }
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.len());

  let mut spans = left;
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>, dashboard: Dashboard<'_>) {
  match dashboard.body {
    Body::Regions { rows } => region_table::draw(f, area, &rows, app),
    body => service_table::draw(f, area, body, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match (app.input, app.selection.mode()) {
    (InputMode::Search, _) => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    (InputMode::Normal, ViewMode::Table) => (
      "TABLE",
      "1-4 cards  / search  n s t g u d sort  ←→ page  p size  r refresh  e error  q quit",
    ),
    (InputMode::Normal, ViewMode::Regions) => (
      "REGIONS",
      "1-4 cards  ↑↓/jk move  Enter issues  n c h sort  r refresh  e error  q quit",
    ),
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
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

/// Arrow for a column header given its sort direction.
pub(crate) fn sort_arrow(direction: Option<nexus_core::sort::SortDirection>) -> &'static str {
  match direction {
    None => " ↕",
    Some(nexus_core::sort::SortDirection::Asc) => " ↑",
    Some(nexus_core::sort::SortDirection::Desc) => " ↓",
  }
}

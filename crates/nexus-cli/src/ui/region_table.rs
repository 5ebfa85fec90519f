//! Region table pane — per-region coverage with health bars.

use nexus_core::{
  region::{RegionSortKey, RegionSummary},
  sort::SortConfig,
  source::ServiceSource,
};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use super::sort_arrow;
use crate::app::App;

const BAR_WIDTH: usize = 10;

/// `"1 Service"` / `"N Services"`.
fn services_label(count: usize) -> String {
  if count == 1 {
    "1 Service".to_string()
  } else {
    format!("{count} Services")
  }
}

/// Text health bar, e.g. `███████░░░ 70%`.
fn health_bar(region: &RegionSummary) -> String {
  let filled = ((region.health_percentage() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
  format!(
    "{}{} {}%",
    "█".repeat(filled),
    "░".repeat(BAR_WIDTH - filled),
    region.health_rounded()
  )
}

fn breakdown(region: &RegionSummary) -> Line<'static> {
  let check = if region.is_healthy() { "✓ " } else { "" };
  let mut spans = vec![Span::styled(
    format!("{check}{} Active", region.active),
    Style::default().fg(Color::Green),
  )];
  if region.maintenance > 0 {
    spans.push(Span::styled(
      format!("  {} Maint.", region.maintenance),
      Style::default().fg(Color::Yellow),
    ));
  }
  if region.issues > 0 {
    let plural = if region.issues == 1 { "" } else { "s" };
    spans.push(Span::styled(
      format!("  ⚠ {} Issue{plural}", region.issues),
      Style::default().fg(Color::Red).add_modifier(Modifier::UNDERLINED),
    ));
  }
  Line::from(spans)
}

/// Render region summaries into `area` with the cursor row highlighted.
pub fn draw<S: ServiceSource + 'static>(f: &mut Frame, area: Rect, regions: &[RegionSummary], app: &App<S>) {
  let sort = app.selection.region_sort();
  let col = |label: &str, key: RegionSortKey, hotkey: char| {
    Cell::from(format!(
      "{label} ({hotkey}){}",
      sort_arrow(SortConfig::direction_for(sort, key))
    ))
  };
  let header = Row::new(vec![
    col("Region", RegionSortKey::Name, 'n'),
    col("Total Services", RegionSortKey::Count, 'c'),
    Cell::from("Status Breakdown"),
    col("Health", RegionSortKey::Health, 'h'),
  ])
  .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = regions
    .iter()
    .map(|r| {
      let bar_color = if r.is_healthy() {
        Color::Green
      } else {
        Color::Yellow
      };
      Row::new(vec![
        Cell::from(r.name.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(services_label(r.count)),
        Cell::from(breakdown(r)),
        Cell::from(Span::styled(health_bar(r), Style::default().fg(bar_color))),
      ])
    })
    .collect();

  let table = Table::new(rows, [
    Constraint::Percentage(22),
    Constraint::Percentage(18),
    Constraint::Percentage(35),
    Constraint::Percentage(25),
  ])
  .header(header)
  .block(
    Block::default()
      .title(" Global Coverage · Data Center Regional Performance ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray)),
  )
  .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
  .highlight_symbol("▶ ");

  let mut state = TableState::default().with_selected((!regions.is_empty()).then_some(app.region_cursor));
  f.render_stateful_widget(table, area, &mut state);
}

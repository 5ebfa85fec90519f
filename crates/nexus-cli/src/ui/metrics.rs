//! Metric cards — the row of four summary boxes, which double as view
//! selectors.

use nexus_core::{metrics::Metrics, selection::Card};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

struct CardText {
  label: &'static str,
  value: String,
  sub:   &'static str,
  color: Color,
}

fn card_text(card: Card, metrics: Option<&Metrics>) -> CardText {
  let dash = || "-".to_string();
  match card {
    Card::Total => CardText {
      label: "[1] Total Systems",
      value: metrics.map_or_else(dash, |m| m.total.to_string()),
      sub:   "Monitored Endpoints",
      color: Color::Blue,
    },
    Card::Active => CardText {
      label: "[2] Active Systems",
      value: metrics.map_or_else(dash, |m| m.active.to_string()),
      sub:   "Fully Operational",
      color: Color::Green,
    },
    Card::Issues => {
      let healthy = metrics.is_some_and(|m| m.issues == 0);
      CardText {
        label: "[3] System Issues",
        value: metrics.map_or_else(dash, Metrics::issues_label),
        sub:   if healthy {
          "All systems operational"
        } else {
          "Requires attention"
        },
        color: if healthy { Color::Green } else { Color::Red },
      }
    }
    Card::Coverage => CardText {
      label: "[4] Global Coverage",
      value: metrics.map_or_else(dash, |m| format!("{} Regions", m.regions)),
      sub:   "Active Data Centers",
      color: Color::Magenta,
    },
  }
}

/// Render the four cards across `area`, highlighting `active`.
pub fn draw(f: &mut Frame, area: Rect, metrics: Option<&Metrics>, active: Card) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(area);

  for (card, slot) in Card::ALL.into_iter().zip(cols.iter()) {
    let text = card_text(card, metrics);
    let is_active = card == active;

    let border = if is_active {
      Style::default().fg(text.color).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
      .title(format!(" {} ", text.label))
      .borders(Borders::ALL)
      .border_style(border);

    let mut value = text.value;
    if card == Card::Total && let Some(avg) = metrics.and_then(|m| m.avg_uptime) {
      value = format!("{value}  ·  {avg:.1}% avg uptime");
    }

    let lines = vec![
      Line::from(Span::styled(value, Style::default().fg(text.color).add_modifier(Modifier::BOLD))),
      Line::from(Span::styled(text.sub, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines).block(block), *slot);
  }
}

//! Metric Aggregator — the summary counts shown on the dashboard cards.

use std::collections::HashSet;

use serde::Serialize;

use crate::service::{ServiceRecord, ServiceStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
  pub total:      usize,
  pub active:     usize,
  /// Services that are offline or degraded.
  pub issues:     usize,
  /// Mean uptime rounded to one decimal. `None` for an empty record set.
  pub avg_uptime: Option<f64>,
  /// Number of distinct regions.
  pub regions:    usize,
}

impl Metrics {
  /// Summarise `records`; `None` while nothing has been loaded.
  pub fn compute(records: Option<&[ServiceRecord]>) -> Option<Self> {
    let records = records?;
    let mut active = 0;
    let mut issues = 0;
    let mut uptime_sum = 0.0;
    let mut regions = HashSet::new();

    for r in records {
      match r.status {
        ServiceStatus::Active => active += 1,
        s if s.is_issue() => issues += 1,
        _ => {}
      }
      uptime_sum += r.uptime;
      regions.insert(r.region.as_str());
    }

    let total = records.len();
    let avg_uptime = (total > 0).then(|| (uptime_sum / total as f64 * 10.0).round() / 10.0);

    Some(Self {
      total,
      active,
      issues,
      avg_uptime,
      regions: regions.len(),
    })
  }

  /// "None", "1 Issue", or "N Issues".
  pub fn issues_label(&self) -> String {
    match self.issues {
      0 => "None".to_string(),
      1 => "1 Issue".to_string(),
      n => format!("{n} Issues"),
    }
  }
}

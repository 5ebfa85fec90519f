//! Region Aggregation Engine — one summary row per region, always computed
//! over the whole dataset regardless of the table's filter or search.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::{
  service::{ServiceRecord, ServiceStatus},
  sort::{SortConfig, stable_sort_by},
};

/// Sortable columns of the region table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSortKey {
  Name,
  Count,
  /// The active column. Orders by health percentage (`active / count`), not
  /// by the raw active count.
  Health,
}

/// Per-region counts by status class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
  pub name:        String,
  pub count:       usize,
  pub active:      usize,
  pub issues:      usize,
  pub maintenance: usize,
}

impl RegionSummary {
  fn empty(name: &str) -> Self {
    Self {
      name:        name.to_owned(),
      count:       0,
      active:      0,
      issues:      0,
      maintenance: 0,
    }
  }

  fn tally(&mut self, status: ServiceStatus) {
    self.count += 1;
    match status {
      ServiceStatus::Active => self.active += 1,
      ServiceStatus::Offline | ServiceStatus::Degraded => self.issues += 1,
      ServiceStatus::Maintenance => self.maintenance += 1,
    }
  }

  /// Fraction of services in the region that are active, in `0.0..=1.0`.
  /// Regions are only built from existing records, so `count > 0`.
  pub fn health_percentage(&self) -> f64 {
    if self.count == 0 {
      return 0.0;
    }
    self.active as f64 / self.count as f64
  }

  /// Health rounded to a whole percent for display.
  pub fn health_rounded(&self) -> u32 { (self.health_percentage() * 100.0).round() as u32 }

  /// No issues and no maintenance.
  pub fn is_healthy(&self) -> bool { self.issues == 0 && self.maintenance == 0 }

  /// Group `records` by region in one pass, in first-appearance order.
  pub fn group(records: &[ServiceRecord]) -> Vec<Self> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<Self> = Vec::new();
    for record in records {
      let slot = *index.entry(record.region.as_str()).or_insert_with(|| {
        out.push(Self::empty(&record.region));
        out.len() - 1
      });
      out[slot].tally(record.status);
    }
    out
  }
}

impl RegionSortKey {
  pub fn compare(self, a: &RegionSummary, b: &RegionSummary) -> Ordering {
    match self {
      Self::Name => a.name.cmp(&b.name),
      Self::Count => a.count.cmp(&b.count),
      Self::Health => a.health_percentage().total_cmp(&b.health_percentage()),
    }
  }
}

/// Grouped and sorted region rows. Ties keep first-appearance order.
pub fn sorted(records: &[ServiceRecord], sort: Option<SortConfig<RegionSortKey>>) -> Vec<RegionSummary> {
  let mut rows = RegionSummary::group(records);
  stable_sort_by(&mut rows, sort, |key, a, b| key.compare(a, b));
  rows
}

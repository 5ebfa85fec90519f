//! Table View Engine — the filtered, searched, sorted, paginated slice of
//! service records shown in the main table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
  selection::ViewSelection,
  service::{ServiceRecord, StatusClass},
  sort::{SortConfig, stable_sort_by},
};

/// Sortable columns of the service table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSortKey {
  Name,
  Status,
  Kind,
  Region,
  Uptime,
  LastUpdated,
}

impl ServiceSortKey {
  /// Natural ascending order of two records on this column.
  pub fn compare(self, a: &ServiceRecord, b: &ServiceRecord) -> Ordering {
    match self {
      Self::Name => a.name.cmp(&b.name),
      Self::Status => a.status.as_ref().cmp(b.status.as_ref()),
      Self::Kind => a.kind.cmp(&b.kind),
      Self::Region => a.region.cmp(&b.region),
      Self::Uptime => a.uptime.total_cmp(&b.uptime),
      Self::LastUpdated => a.last_updated.cmp(&b.last_updated),
    }
  }
}

// ─── Pipeline stages ─────────────────────────────────────────────────────────

/// Stage 1: keep records in `class`, or all of them for `None`.
pub fn filter_by_class<'a>(
  records: impl IntoIterator<Item = &'a ServiceRecord>,
  class: Option<StatusClass>,
) -> Vec<&'a ServiceRecord> {
  records
    .into_iter()
    .filter(|r| class.is_none_or(|c| c.contains(r.status)))
    .collect()
}

/// Stage 2: case-insensitive substring search over name, kind, and region.
pub fn filter_by_search<'a>(
  records: impl IntoIterator<Item = &'a ServiceRecord>,
  query: &str,
) -> Vec<&'a ServiceRecord> {
  let needle = query.to_lowercase();
  records
    .into_iter()
    .filter(|r| r.matches_lowercase(&needle))
    .collect()
}

/// Stage 3: stable sort. `None` keeps the incoming order.
pub fn sort_records(records: &mut [&ServiceRecord], sort: Option<SortConfig<ServiceSortKey>>) {
  stable_sort_by(records, sort, |key, a, b| key.compare(a, b));
}

/// Stage 4: the 1-indexed `page` of `size` rows. Out of range yields an
/// empty slice.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
  let start = page.saturating_sub(1).saturating_mul(size);
  if start >= items.len() {
    return &[];
  }
  let end = start.saturating_add(size).min(items.len());
  &items[start..end]
}

/// `ceil(count / size)`, never less than 1.
pub fn total_pages(count: usize, size: usize) -> usize {
  if size == 0 {
    return 1;
  }
  count.div_ceil(size).max(1)
}

// ─── View ────────────────────────────────────────────────────────────────────

/// The rows to render for the current page plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
  pub rows:           Vec<&'a ServiceRecord>,
  /// Records that survived the filter and search stages.
  pub filtered_count: usize,
  /// Records in the source set before any filtering.
  pub total_records:  usize,
  pub page:           usize,
  pub page_size:      usize,
  pub total_pages:    usize,
}

impl<'a> TableView<'a> {
  /// Run the full filter → search → sort → paginate pipeline.
  pub fn compute(records: &'a [ServiceRecord], selection: &ViewSelection) -> Self {
    let filtered = filtered_sorted(records, selection);
    let filtered_count = filtered.len();
    let page_size = selection.page_size();
    let page = selection.page();
    let rows = paginate(&filtered, page, page_size).to_vec();

    Self {
      rows,
      filtered_count,
      total_records: records.len(),
      page,
      page_size,
      total_pages: total_pages(filtered_count, page_size),
    }
  }

  /// 1-indexed `(first, last)` positions of the current rows within the
  /// filtered set, for "Showing X – Y of Z". `None` when no rows are shown.
  pub fn showing(&self) -> Option<(usize, usize)> {
    if self.rows.is_empty() {
      return None;
    }
    let first = (self.page - 1) * self.page_size + 1;
    Some((first, first + self.rows.len() - 1))
  }

  pub fn has_prev(&self) -> bool { self.page > 1 }

  pub fn has_next(&self) -> bool { self.page < self.total_pages }
}

/// Stages 1–3 without pagination: the full ordered result set.
pub fn filtered_sorted<'a>(
  records: &'a [ServiceRecord],
  selection: &ViewSelection,
) -> Vec<&'a ServiceRecord> {
  let by_class = filter_by_class(records, selection.status_filter());
  let mut found = filter_by_search(by_class, selection.search());
  sort_records(&mut found, selection.sort());
  found
}

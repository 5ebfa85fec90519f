//! `ViewSelection` — the user-controlled parameters that drive every derived
//! view.
//!
//! The selection is owned by the presentation layer. Its setters enforce the
//! page-reset contract: changing the search text, the page size, or the status
//! filter sends the user back to page 1. Changing the sort does not.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  region::RegionSortKey,
  service::StatusClass,
  sort::SortConfig,
  table::ServiceSortKey,
};

/// Page sizes offered to the user.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Validate a requested page size against [`PAGE_SIZES`].
pub fn check_page_size(size: usize) -> Result<usize> {
  if PAGE_SIZES.contains(&size) {
    Ok(size)
  } else {
    Err(Error::UnsupportedPageSize(size))
  }
}

/// Which body the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
  /// The paginated service table.
  #[default]
  Table,
  /// Per-region summary rows over the whole dataset.
  Regions,
}

/// The four metric cards, each of which doubles as a view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
  Total,
  Active,
  Issues,
  Coverage,
}

impl Card {
  pub const ALL: [Card; 4] = [Card::Total, Card::Active, Card::Issues, Card::Coverage];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
  search:        String,
  status_filter: Option<StatusClass>,
  mode:          ViewMode,
  sort:          Option<SortConfig<ServiceSortKey>>,
  region_sort:   Option<SortConfig<RegionSortKey>>,
  page:          usize,
  page_size:     usize,
}

impl Default for ViewSelection {
  fn default() -> Self {
    Self {
      search:        String::new(),
      status_filter: None,
      mode:          ViewMode::Table,
      sort:          None,
      region_sort:   None,
      page:          1,
      page_size:     DEFAULT_PAGE_SIZE,
    }
  }
}

impl ViewSelection {
  /// A fresh selection with the given initial page size.
  pub fn new(page_size: usize) -> Result<Self> {
    Ok(Self {
      page_size: check_page_size(page_size)?,
      ..Self::default()
    })
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn search(&self) -> &str { &self.search }

  pub fn status_filter(&self) -> Option<StatusClass> { self.status_filter }

  pub fn mode(&self) -> ViewMode { self.mode }

  pub fn sort(&self) -> Option<SortConfig<ServiceSortKey>> { self.sort }

  pub fn region_sort(&self) -> Option<SortConfig<RegionSortKey>> { self.region_sort }

  /// 1-indexed page number.
  pub fn page(&self) -> usize { self.page }

  pub fn page_size(&self) -> usize { self.page_size }

  // ── Search ────────────────────────────────────────────────────────────

  pub fn set_search(&mut self, query: impl Into<String>) {
    let query = query.into();
    if query != self.search {
      self.search = query;
      self.reset_page();
    }
  }

  pub fn push_search_char(&mut self, c: char) {
    self.search.push(c);
    self.reset_page();
  }

  pub fn pop_search_char(&mut self) {
    if self.search.pop().is_some() {
      self.reset_page();
    }
  }

  pub fn clear_search(&mut self) { self.set_search(String::new()); }

  // ── Filter / mode ─────────────────────────────────────────────────────

  /// Show the service table filtered to `filter`.
  pub fn set_status_filter(&mut self, filter: Option<StatusClass>) {
    if filter != self.status_filter || self.mode != ViewMode::Table {
      self.status_filter = filter;
      self.mode = ViewMode::Table;
      self.reset_page();
    }
  }

  /// The card that corresponds to the current filter and mode.
  pub fn active_card(&self) -> Card {
    match (self.mode, self.status_filter) {
      (ViewMode::Regions, _) => Card::Coverage,
      (ViewMode::Table, None) => Card::Total,
      (ViewMode::Table, Some(StatusClass::Active)) => Card::Active,
      (ViewMode::Table, Some(StatusClass::Issue)) => Card::Issues,
    }
  }

  /// Select a metric card. Selecting the card that is already active falls
  /// back to [`Card::Total`].
  pub fn select_card(&mut self, card: Card) {
    let card = if card == self.active_card() {
      Card::Total
    } else {
      card
    };
    match card {
      Card::Total => self.set_status_filter(None),
      Card::Active => self.set_status_filter(Some(StatusClass::Active)),
      Card::Issues => self.set_status_filter(Some(StatusClass::Issue)),
      Card::Coverage => {
        if self.mode != ViewMode::Regions {
          self.mode = ViewMode::Regions;
          self.status_filter = None;
          self.reset_page();
        }
      }
    }
  }

  /// Leave the region view for the service table filtered to issues.
  pub fn pivot_to_issues(&mut self) { self.set_status_filter(Some(StatusClass::Issue)); }

  // ── Sort ──────────────────────────────────────────────────────────────

  /// Cycle the service table sort for `key`. The page is kept.
  pub fn toggle_sort(&mut self, key: ServiceSortKey) { self.sort = SortConfig::cycle(self.sort, key); }

  pub fn toggle_region_sort(&mut self, key: RegionSortKey) {
    self.region_sort = SortConfig::cycle(self.region_sort, key);
  }

  // ── Pagination ────────────────────────────────────────────────────────

  pub fn set_page_size(&mut self, size: usize) -> Result<()> {
    let size = check_page_size(size)?;
    if size != self.page_size {
      self.page_size = size;
      self.reset_page();
    }
    Ok(())
  }

  /// Advance to the next entry of [`PAGE_SIZES`], wrapping around.
  pub fn cycle_page_size(&mut self) {
    let idx = PAGE_SIZES
      .iter()
      .position(|&s| s == self.page_size)
      .map_or(0, |i| (i + 1) % PAGE_SIZES.len());
    self.page_size = PAGE_SIZES[idx];
    self.reset_page();
  }

  pub fn reset_page(&mut self) { self.page = 1; }

  /// Move forward one page, never past `total_pages`.
  pub fn next_page(&mut self, total_pages: usize) {
    self.page = (self.page + 1).min(total_pages.max(1));
  }

  /// Move back one page, never before page 1.
  pub fn prev_page(&mut self) { self.page = self.page.saturating_sub(1).max(1); }

  /// Jump to `page`, clamped into `[1, total_pages]`.
  pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
    self.page = page.clamp(1, total_pages.max(1));
  }
}

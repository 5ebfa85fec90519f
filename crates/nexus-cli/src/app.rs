//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nexus_core::{
  dashboard::{Body, Dashboard},
  load::{LoadController, LoadTicket},
  region::{self, RegionSortKey, RegionSummary},
  selection::{Card, ViewMode, ViewSelection},
  service::ServiceRecord,
  source::ServiceSource,
  table::ServiceSortKey,
};
use tokio::sync::mpsc;

/// A finished load on its way back to the event loop.
type LoadOutcome = (LoadTicket, Result<Vec<ServiceRecord>, String>);

// ─── Input mode ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  /// Printable keys go into the search box.
  Search,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Loading/error/success state of the record set.
  pub controller: LoadController,

  /// Search, filter, sort, and pagination chosen by the user.
  pub selection: ViewSelection,

  pub input: InputMode,

  /// Highlighted row in the region table.
  pub region_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  source: Arc<S>,
  tx:     mpsc::UnboundedSender<LoadOutcome>,
  rx:     mpsc::UnboundedReceiver<LoadOutcome>,
}

impl<S> App<S>
where
  S: ServiceSource + 'static,
{
  pub fn new(source: S, selection: ViewSelection, simulate_error: bool) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      controller: LoadController::new(simulate_error),
      selection,
      input: InputMode::Normal,
      region_cursor: 0,
      status_msg: String::new(),
      source: Arc::new(source),
      tx,
      rx,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Issue a load and run it on a background task.
  pub fn request_load(&mut self) {
    let ticket = self.controller.request();
    self.spawn_load(ticket);
  }

  /// Clear simulated failure and load again.
  pub fn retry(&mut self) {
    let ticket = self.controller.retry();
    self.status_msg.clear();
    self.spawn_load(ticket);
  }

  pub fn toggle_simulate_error(&mut self) {
    let ticket = self.controller.toggle_force_failure();
    self.status_msg = if self.controller.force_failure() {
      "Simulate error mode on".into()
    } else {
      "Simulate error mode off".into()
    };
    self.spawn_load(ticket);
  }

  fn spawn_load(&self, ticket: LoadTicket) {
    let source = Arc::clone(&self.source);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = source
        .load(ticket.force_failure)
        .await
        .map_err(|e| e.to_string());
      // The receiver only goes away when the app is shutting down.
      let _ = tx.send((ticket, result));
    });
  }

  /// Apply any finished loads. Returns `true` if the state changed.
  pub fn poll_loads(&mut self) -> bool {
    let mut changed = false;
    while let Ok((ticket, result)) = self.rx.try_recv() {
      changed |= self.apply_load(ticket, result);
    }
    changed
  }

  /// Wait for the next finished load and apply it.
  #[cfg(test)]
  pub async fn next_load(&mut self) -> bool {
    match self.rx.recv().await {
      Some((ticket, result)) => self.apply_load(ticket, result),
      None => false,
    }
  }

  fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<ServiceRecord>, String>) -> bool {
    let before = self.records().map(<[_]>::len);
    if !self.controller.complete(ticket, result) {
      return false;
    }
    // A different record count changes the filtered set; start over.
    if self.records().map(<[_]>::len) != before {
      self.selection.reset_page();
    }
    self.region_cursor = self.region_cursor.min(self.region_rows().len().saturating_sub(1));
    true
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn records(&self) -> Option<&[ServiceRecord]> { self.controller.state().records() }

  /// Snapshot of everything the UI renders this frame.
  pub fn dashboard(&self) -> Dashboard<'_> { Dashboard::compute(self.controller.state(), &self.selection) }

  fn region_rows(&self) -> Vec<RegionSummary> {
    self
      .records()
      .map(|r| region::sorted(r, self.selection.region_sort()))
      .unwrap_or_default()
  }

  fn total_pages(&self) -> usize {
    match self.dashboard().body {
      Body::Table { view, .. } => view.total_pages,
      _ => 1,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    self.status_msg.clear();

    if self.input == InputMode::Search {
      self.handle_search_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,

      // Cards
      KeyCode::Char('1') => self.select_card(Card::Total),
      KeyCode::Char('2') => self.select_card(Card::Active),
      KeyCode::Char('3') => self.select_card(Card::Issues),
      KeyCode::Char('4') => self.select_card(Card::Coverage),

      // Data
      KeyCode::Char('r') | KeyCode::F(5) => self.request_load(),
      KeyCode::Char('e') => self.toggle_simulate_error(),

      // Retry after a failed load, whichever view is selected.
      KeyCode::Enter if self.controller.state().records().is_none() && !self.controller.is_fetching() => {
        self.retry()
      }

      _ => match self.selection.mode() {
        ViewMode::Table => self.handle_table_key(key),
        ViewMode::Regions => self.handle_region_key(key),
      },
    }
    true
  }

  fn select_card(&mut self, card: Card) {
    self.selection.select_card(card);
    self.region_cursor = 0;
  }

  fn sort_regions(&mut self, key: RegionSortKey) {
    self.selection.toggle_region_sort(key);
    self.region_cursor = 0;
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input = InputMode::Normal;
        self.selection.clear_search();
      }
      KeyCode::Enter => self.input = InputMode::Normal,
      KeyCode::Backspace => self.selection.pop_search_char(),
      KeyCode::Char(c) => self.selection.push_search_char(c),
      _ => {}
    }
  }

  fn handle_table_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('/') => self.input = InputMode::Search,
      KeyCode::Esc => self.selection.clear_search(),

      // Sort
      KeyCode::Char('n') => self.selection.toggle_sort(ServiceSortKey::Name),
      KeyCode::Char('s') => self.selection.toggle_sort(ServiceSortKey::Status),
      KeyCode::Char('t') => self.selection.toggle_sort(ServiceSortKey::Kind),
      KeyCode::Char('g') => self.selection.toggle_sort(ServiceSortKey::Region),
      KeyCode::Char('u') => self.selection.toggle_sort(ServiceSortKey::Uptime),
      KeyCode::Char('d') => self.selection.toggle_sort(ServiceSortKey::LastUpdated),

      // Pagination
      KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => self.selection.prev_page(),
      KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
        let total = self.total_pages();
        self.selection.next_page(total);
      }
      KeyCode::Char('p') => self.selection.cycle_page_size(),

      _ => {}
    }
  }

  fn handle_region_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('n') => self.sort_regions(RegionSortKey::Name),
      KeyCode::Char('c') => self.sort_regions(RegionSortKey::Count),
      KeyCode::Char('h') => self.sort_regions(RegionSortKey::Health),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.region_rows().len();
        if self.region_cursor + 1 < len {
          self.region_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.region_cursor = self.region_cursor.saturating_sub(1);
      }

      // Jump to the issue table from a region that has issues.
      KeyCode::Enter | KeyCode::Char('i') => {
        let has_issues = self
          .region_rows()
          .get(self.region_cursor)
          .is_some_and(|r| r.issues > 0);
        if has_issues {
          self.selection.pivot_to_issues();
          self.region_cursor = 0;
        } else {
          self.status_msg = "No issues in this region".into();
        }
      }

      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use nexus_core::{dashboard::TableState, load::LoadState, service::StatusClass};
  use nexus_mock::MockSource;

  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn press(app: &mut App<MockSource>, keys: &str) {
    for c in keys.chars() {
      assert!(app.handle_key(key(KeyCode::Char(c))));
    }
  }

  async fn loaded_app() -> App<MockSource> {
    let source = MockSource::builtin(Duration::ZERO).unwrap();
    let mut app = App::new(source, ViewSelection::default(), false);
    app.request_load();
    assert!(app.next_load().await);
    app
  }

  #[tokio::test]
  async fn initial_load_populates_table() {
    let app = loaded_app().await;
    match app.dashboard().body {
      Body::Table { view, state } => {
        assert_eq!(state, TableState::Populated);
        assert_eq!(view.filtered_count, 15);
      }
      other => panic!("unexpected body {other:?}"),
    }
  }

  #[tokio::test]
  async fn simulated_error_then_retry() {
    let source = MockSource::builtin(Duration::ZERO).unwrap();
    let mut app = App::new(source, ViewSelection::default(), true);
    app.request_load();
    assert!(app.next_load().await);
    assert!(matches!(app.controller.state(), LoadState::Failed { .. }));

    assert!(app.handle_key(key(KeyCode::Enter)));
    assert!(app.controller.state().is_loading());
    assert!(app.next_load().await);
    assert_eq!(app.records().map(<[_]>::len), Some(15));
  }

  #[tokio::test]
  async fn retry_from_error_screen_in_region_view() {
    let mut app = loaded_app().await;
    press(&mut app, "4e");
    assert!(app.next_load().await);
    assert!(matches!(app.dashboard().body, Body::Failed { .. }));
    assert_eq!(app.selection.mode(), ViewMode::Regions);

    assert!(app.handle_key(key(KeyCode::Enter)));
    assert!(!app.controller.force_failure());
    assert!(app.controller.is_fetching());
    assert!(app.controller.state().is_loading());
    assert!(app.status_msg.is_empty());

    assert!(app.next_load().await);
    assert_eq!(app.records().map(<[_]>::len), Some(15));
    assert!(matches!(app.dashboard().body, Body::Regions { .. }));
  }

  #[tokio::test]
  async fn search_mode_captures_keys_and_resets_page() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.selection.page(), 2);

    press(&mut app, "/us");
    assert_eq!(app.input, InputMode::Search);
    assert_eq!(app.selection.search(), "us");
    assert_eq!(app.selection.page(), 1);

    // 'q' is text while searching, not quit.
    assert!(app.handle_key(key(KeyCode::Char('q'))));
    assert_eq!(app.selection.search(), "usq");

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.input, InputMode::Normal);
    assert_eq!(app.selection.search(), "");
  }

  #[tokio::test]
  async fn paging_is_clamped_and_survives_sort() {
    let mut app = loaded_app().await;
    for _ in 0..5 {
      app.handle_key(key(KeyCode::Right));
    }
    assert_eq!(app.selection.page(), 2);
    press(&mut app, "uu");
    assert_eq!(app.selection.page(), 2);
    press(&mut app, "p");
    assert_eq!(app.selection.page_size(), 20);
    assert_eq!(app.selection.page(), 1);
  }

  #[tokio::test]
  async fn cards_toggle_filters() {
    let mut app = loaded_app().await;
    press(&mut app, "3");
    assert_eq!(app.selection.status_filter(), Some(StatusClass::Issue));
    press(&mut app, "3");
    assert_eq!(app.selection.status_filter(), None);
    press(&mut app, "4");
    assert_eq!(app.selection.mode(), ViewMode::Regions);
  }

  #[tokio::test]
  async fn region_pivot_only_from_rows_with_issues() {
    let mut app = loaded_app().await;
    press(&mut app, "4");

    // US-East is first and has no issues.
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.selection.mode(), ViewMode::Regions);

    // EU-Central (third) has a degraded service.
    press(&mut app, "jj");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.selection.mode(), ViewMode::Table);
    assert_eq!(app.selection.status_filter(), Some(StatusClass::Issue));
  }

  #[tokio::test]
  async fn region_sort_resets_cursor() {
    let mut app = loaded_app().await;
    press(&mut app, "4jj");
    assert_eq!(app.region_cursor, 2);
    press(&mut app, "c");
    assert_eq!(app.region_cursor, 0);
    press(&mut app, "j");
    press(&mut app, "h");
    assert_eq!(app.region_cursor, 0);
  }

  #[tokio::test]
  async fn reload_with_new_count_resets_page() {
    let mut app = loaded_app().await;
    let fleet = app.records().unwrap().to_vec();

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.selection.page(), 2);

    // Same count keeps the page.
    let same = app.controller.request();
    assert!(app.apply_load(same, Ok(fleet.clone())));
    assert_eq!(app.selection.page(), 2);

    let fewer = app.controller.request();
    assert!(app.apply_load(fewer, Ok(fleet[..5].to_vec())));
    assert_eq!(app.records().map(<[_]>::len), Some(5));
    assert_eq!(app.selection.page(), 1);
  }

  #[tokio::test]
  async fn stale_refresh_is_ignored() {
    let mut app = loaded_app().await;
    let stale = app.controller.request();
    let fresh = app.controller.request();
    assert!(app.apply_load(fresh, Ok(Vec::new())));
    assert!(!app.apply_load(stale, Err("late".into())));
    assert_eq!(app.records().map(<[_]>::len), Some(0));
  }

  #[tokio::test]
  async fn quit_keys() {
    let mut app = loaded_app().await;
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
  }
}

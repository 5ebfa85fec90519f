//! Dashboard snapshot — everything the presentation layer renders, derived
//! in one pass from the load state and the current selection.

use crate::{
  load::LoadState,
  metrics::Metrics,
  region::{self, RegionSummary},
  selection::{ViewMode, ViewSelection},
  table::TableView,
};

/// How the service table should present a computed [`TableView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
  /// The source returned no records at all.
  NoData,
  /// Records exist but none match the filter and search.
  NoMatches { query: String },
  Populated,
}

/// The main body of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
  /// No records yet; render skeleton rows.
  Loading { skeleton_rows: usize },
  /// The load failed; render the message and a retry affordance.
  Failed { message: &'a str },
  Table { view: TableView<'a>, state: TableState },
  Regions { rows: Vec<RegionSummary> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
  /// `None` until records are loaded.
  pub metrics: Option<Metrics>,
  pub body:    Body<'a>,
}

impl<'a> Dashboard<'a> {
  /// Recompute every derived view for this snapshot.
  pub fn compute(load: &'a LoadState, selection: &ViewSelection) -> Self {
    let records = load.records();
    let metrics = Metrics::compute(records);

    let body = match load {
      LoadState::Loading => Body::Loading {
        skeleton_rows: selection.page_size(),
      },
      LoadState::Failed { message } => Body::Failed {
        message: message.as_str(),
      },
      LoadState::Loaded { records } => match selection.mode() {
        ViewMode::Regions => Body::Regions {
          rows: region::sorted(records, selection.region_sort()),
        },
        ViewMode::Table => {
          let view = TableView::compute(records, selection);
          let state = if view.total_records == 0 {
            TableState::NoData
          } else if view.filtered_count == 0 {
            TableState::NoMatches {
              query: selection.search().to_owned(),
            }
          } else {
            TableState::Populated
          };
          Body::Table { view, state }
        }
      },
    };

    Self { metrics, body }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    fixtures::fleet,
    selection::Card,
    service::StatusClass,
  };

  fn loaded() -> LoadState { LoadState::Loaded { records: fleet() } }

  #[test]
  fn loading_renders_skeleton_sized_to_page() {
    let sel = ViewSelection::new(20).unwrap();
    let d = Dashboard::compute(&LoadState::Loading, &sel);
    assert_eq!(d.metrics, None);
    assert_eq!(d.body, Body::Loading { skeleton_rows: 20 });
  }

  #[test]
  fn failure_carries_message() {
    let load = LoadState::Failed {
      message: "nope".into(),
    };
    let d = Dashboard::compute(&load, &ViewSelection::default());
    assert_eq!(d.body, Body::Failed { message: "nope" });
  }

  #[test]
  fn failure_wins_over_region_mode() {
    let load = LoadState::Failed {
      message: "nope".into(),
    };
    let mut sel = ViewSelection::default();
    sel.select_card(Card::Coverage);
    assert!(matches!(Dashboard::compute(&load, &sel).body, Body::Failed { .. }));
  }

  #[test]
  fn distinguishes_no_data_from_no_matches() {
    let empty = LoadState::Loaded { records: vec![] };
    let d = Dashboard::compute(&empty, &ViewSelection::default());
    assert!(matches!(d.body, Body::Table { state: TableState::NoData, .. }));

    let load = loaded();
    let mut sel = ViewSelection::default();
    sel.set_search("no such service");
    let d = Dashboard::compute(&load, &sel);
    match d.body {
      Body::Table { view, state } => {
        assert!(view.rows.is_empty());
        assert_eq!(state, TableState::NoMatches {
          query: "no such service".into(),
        });
      }
      other => panic!("unexpected body {other:?}"),
    }
  }

  #[test]
  fn populated_table() {
    let load = loaded();
    let d = Dashboard::compute(&load, &ViewSelection::default());
    assert_eq!(d.metrics.as_ref().map(|m| m.total), Some(15));
    match d.body {
      Body::Table { view, state } => {
        assert_eq!(state, TableState::Populated);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.total_pages, 2);
      }
      other => panic!("unexpected body {other:?}"),
    }
  }

  #[test]
  fn regions_ignore_filter_and_search() {
    let load = loaded();
    let mut sel = ViewSelection::default();
    sel.set_status_filter(Some(StatusClass::Issue));
    sel.set_search("chat");
    sel.select_card(Card::Coverage);
    match Dashboard::compute(&load, &sel).body {
      Body::Regions { rows } => {
        assert_eq!(rows.len(), 8);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 15);
      }
      other => panic!("unexpected body {other:?}"),
    }
  }
}

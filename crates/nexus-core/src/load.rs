//! Data Load Controller — loading/error/success state around a
//! [`ServiceSource`](crate::source::ServiceSource) load.
//!
//! The controller never performs I/O. The caller asks it for a
//! [`LoadTicket`], runs the load however it likes, and hands the result back
//! through [`LoadController::complete`]. Only the result for the most recently
//! issued ticket is applied; anything older is discarded.

use std::fmt::Display;

use crate::service::ServiceRecord;

/// What the presentation layer can observe about the record set.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
  /// No records yet; a load is pending.
  Loading,
  /// The last load failed. Terminal until a new request is made.
  Failed { message: String },
  Loaded { records: Vec<ServiceRecord> },
}

impl LoadState {
  pub fn records(&self) -> Option<&[ServiceRecord]> {
    match self {
      Self::Loaded { records } => Some(records),
      _ => None,
    }
  }

  pub fn is_loading(&self) -> bool { matches!(self, Self::Loading) }
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
  pub generation:    u64,
  /// Ask the source to fail this load.
  pub force_failure: bool,
}

#[derive(Debug)]
pub struct LoadController {
  state:         LoadState,
  generation:    u64,
  in_flight:     Option<u64>,
  force_failure: bool,
}

impl LoadController {
  /// A controller in the `Loading` state. Call [`request`](Self::request) to
  /// issue the first load.
  pub fn new(force_failure: bool) -> Self {
    Self {
      state: LoadState::Loading,
      generation: 0,
      in_flight: None,
      force_failure,
    }
  }

  pub fn state(&self) -> &LoadState { &self.state }

  /// A request is outstanding, including a background refresh over data
  /// that is still being shown.
  pub fn is_fetching(&self) -> bool { self.in_flight.is_some() }

  pub fn force_failure(&self) -> bool { self.force_failure }

  /// Issue a new load. Existing records stay visible while it runs; a
  /// failed state goes back to `Loading`.
  pub fn request(&mut self) -> LoadTicket {
    self.generation += 1;
    self.in_flight = Some(self.generation);
    if matches!(self.state, LoadState::Failed { .. }) {
      self.state = LoadState::Loading;
    }
    tracing::debug!(
      generation = self.generation,
      force_failure = self.force_failure,
      "load requested"
    );
    LoadTicket {
      generation:    self.generation,
      force_failure: self.force_failure,
    }
  }

  /// Clear the failure flag and issue a new load.
  pub fn retry(&mut self) -> LoadTicket {
    self.force_failure = false;
    self.request()
  }

  /// Flip the failure flag and reload with the new setting.
  pub fn toggle_force_failure(&mut self) -> LoadTicket {
    self.force_failure = !self.force_failure;
    self.request()
  }

  /// Apply the outcome of `ticket`'s load. Returns `false` if the ticket was
  /// superseded by a later request and the result was dropped.
  pub fn complete<E: Display>(
    &mut self,
    ticket: LoadTicket,
    result: Result<Vec<ServiceRecord>, E>,
  ) -> bool {
    if self.in_flight != Some(ticket.generation) {
      tracing::debug!(
        generation = ticket.generation,
        latest = self.generation,
        "stale load discarded"
      );
      return false;
    }
    self.in_flight = None;

    self.state = match result {
      Ok(records) => {
        tracing::info!(generation = ticket.generation, records = records.len(), "load applied");
        LoadState::Loaded { records }
      }
      Err(e) => {
        let mut message = e.to_string();
        if message.is_empty() {
          message = "failed to load services".to_string();
        }
        tracing::warn!(generation = ticket.generation, error = %message, "load failed");
        LoadState::Failed { message }
      }
    };
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures::fleet;

  #[test]
  fn starts_loading_with_nothing_in_flight() {
    let c = LoadController::new(false);
    assert!(c.state().is_loading());
    assert!(!c.is_fetching());
    assert_eq!(c.state().records(), None);
  }

  #[test]
  fn success_populates_records() {
    let mut c = LoadController::new(false);
    let t = c.request();
    assert!(c.is_fetching());
    assert!(c.complete::<String>(t, Ok(fleet())));
    assert!(!c.is_fetching());
    assert_eq!(c.state().records().map(<[_]>::len), Some(15));
  }

  #[test]
  fn forced_failure_then_retry() {
    let mut c = LoadController::new(true);
    let t = c.request();
    assert!(t.force_failure);
    c.complete::<String>(t, Err("Failed to fetch service status.".into()));
    match c.state() {
      LoadState::Failed { message } => assert!(!message.is_empty()),
      other => panic!("expected failure, got {other:?}"),
    }

    let t = c.retry();
    assert!(!t.force_failure);
    assert!(c.state().is_loading());
    c.complete::<String>(t, Ok(fleet()));
    assert_eq!(c.state().records().map(<[_]>::len), Some(15));
  }

  #[test]
  fn empty_error_message_is_replaced() {
    let mut c = LoadController::new(false);
    let t = c.request();
    c.complete::<String>(t, Err(String::new()));
    assert!(matches!(c.state(), LoadState::Failed { message } if !message.is_empty()));
  }

  #[test]
  fn stale_result_is_discarded() {
    let mut c = LoadController::new(false);
    let first = c.request();
    let second = c.request();

    assert!(c.complete::<String>(second, Ok(fleet()[..2].to_vec())));
    assert!(!c.complete::<String>(first, Ok(fleet())));
    assert_eq!(c.state().records().map(<[_]>::len), Some(2));
  }

  #[test]
  fn older_result_arriving_first_is_ignored() {
    let mut c = LoadController::new(false);
    let first = c.request();
    let second = c.request();

    assert!(!c.complete::<String>(first, Err("boom".into())));
    assert!(c.state().is_loading());
    assert!(c.is_fetching());
    assert!(c.complete::<String>(second, Ok(fleet())));
  }

  #[test]
  fn refresh_keeps_existing_records_visible() {
    let mut c = LoadController::new(false);
    let t = c.request();
    c.complete::<String>(t, Ok(fleet()));

    c.request();
    assert!(c.is_fetching());
    assert_eq!(c.state().records().map(<[_]>::len), Some(15));
  }

  #[test]
  fn toggling_failure_reloads() {
    let mut c = LoadController::new(false);
    let t = c.toggle_force_failure();
    assert!(c.force_failure());
    assert!(t.force_failure);
    let t = c.toggle_force_failure();
    assert!(!t.force_failure);
  }
}

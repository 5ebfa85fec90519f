//! Column sort configuration shared by the service table and the region
//! table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  Asc,
  Desc,
}

impl SortDirection {
  /// Apply this direction to an ascending comparison result.
  pub fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      Self::Asc => ordering,
      Self::Desc => ordering.reverse(),
    }
  }
}

/// The active sort column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig<K> {
  pub key:       K,
  pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortConfig<K> {
  pub fn asc(key: K) -> Self {
    Self {
      key,
      direction: SortDirection::Asc,
    }
  }

  /// Tri-state toggle for selecting column `key`.
  ///
  /// Same column cycles `none → asc → desc → none`; a different column
  /// always starts at `asc`.
  pub fn cycle(current: Option<Self>, key: K) -> Option<Self> {
    match current {
      Some(c) if c.key == key => match c.direction {
        SortDirection::Asc => Some(Self {
          key,
          direction: SortDirection::Desc,
        }),
        SortDirection::Desc => None,
      },
      _ => Some(Self::asc(key)),
    }
  }

  /// Direction for `key` if it is the active column.
  pub fn direction_for(current: Option<Self>, key: K) -> Option<SortDirection> {
    current.filter(|c| c.key == key).map(|c| c.direction)
  }
}

/// Stable in-place sort of `items` by `config`; `None` leaves the order
/// untouched. Equal keys keep their relative order in both directions.
pub fn stable_sort_by<T, K, F>(items: &mut [T], config: Option<SortConfig<K>>, mut compare: F)
where
  F: FnMut(K, &T, &T) -> Ordering,
  K: Copy,
{
  if let Some(SortConfig { key, direction }) = config {
    items.sort_by(|a, b| direction.apply(compare(key, a, b)));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  enum Col {
    A,
    B,
  }

  #[test]
  fn same_column_cycles_with_period_three() {
    let mut state = None;
    state = SortConfig::cycle(state, Col::A);
    assert_eq!(state, Some(SortConfig::asc(Col::A)));
    state = SortConfig::cycle(state, Col::A);
    assert_eq!(
      state,
      Some(SortConfig {
        key:       Col::A,
        direction: SortDirection::Desc,
      })
    );
    state = SortConfig::cycle(state, Col::A);
    assert_eq!(state, None);
    state = SortConfig::cycle(state, Col::A);
    assert_eq!(state, Some(SortConfig::asc(Col::A)));
  }

  #[test]
  fn other_column_resets_to_ascending() {
    let desc_a = Some(SortConfig {
      key:       Col::A,
      direction: SortDirection::Desc,
    });
    assert_eq!(SortConfig::cycle(desc_a, Col::B), Some(SortConfig::asc(Col::B)));
  }

  #[test]
  fn descending_keeps_ties_in_original_order() {
    let mut items = vec![(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
    stable_sort_by(
      &mut items,
      Some(SortConfig {
        key:       Col::A,
        direction: SortDirection::Desc,
      }),
      |_, x, y| x.0.cmp(&y.0),
    );
    assert_eq!(items, vec![(2, 'b'), (2, 'd'), (1, 'a'), (1, 'c')]);
  }

  #[test]
  fn no_config_preserves_order() {
    let mut items = vec![3, 1, 2];
    stable_sort_by(&mut items, None::<SortConfig<Col>>, |_, x, y| x.cmp(y));
    assert_eq!(items, vec![3, 1, 2]);
  }
}

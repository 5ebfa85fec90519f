//! Service records — the flat, externally sourced rows every view is
//! derived from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::Result;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Operational status reported for a service.
///
/// Orders lexicographically by its lowercase name when sorted as a column,
/// not by declaration order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceStatus {
  Active,
  Maintenance,
  Offline,
  Degraded,
}

impl ServiceStatus {
  /// The filter class this status belongs to, if any. `Maintenance` belongs
  /// to none.
  pub fn class(self) -> Option<StatusClass> {
    match self {
      Self::Active => Some(StatusClass::Active),
      Self::Offline | Self::Degraded => Some(StatusClass::Issue),
      Self::Maintenance => None,
    }
  }

  pub fn is_issue(self) -> bool { self.class() == Some(StatusClass::Issue) }
}

/// A named grouping of raw statuses used for filtering and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusClass {
  /// `active`.
  Active,
  /// `offline` or `degraded`.
  Issue,
}

impl StatusClass {
  pub fn contains(self, status: ServiceStatus) -> bool { status.class() == Some(self) }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One monitored service. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
  /// Opaque unique identifier.
  pub id:           String,
  pub name:         String,
  /// Service category, e.g. "Authentication". `type` on the wire.
  #[serde(rename = "type")]
  pub kind:         String,
  pub status:       ServiceStatus,
  /// Uptime percentage in `0.0..=100.0`.
  pub uptime:       f64,
  pub last_updated: DateTime<Utc>,
  pub region:       String,
}

impl ServiceRecord {
  /// Case-insensitive substring match against name, kind, or region.
  ///
  /// `needle` must already be lowercased.
  pub fn matches_lowercase(&self, needle: &str) -> bool {
    needle.is_empty()
      || self.name.to_lowercase().contains(needle)
      || self.kind.to_lowercase().contains(needle)
      || self.region.to_lowercase().contains(needle)
  }
}

/// Decode a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<ServiceRecord>> {
  Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_classes() {
    assert_eq!(ServiceStatus::Active.class(), Some(StatusClass::Active));
    assert_eq!(ServiceStatus::Offline.class(), Some(StatusClass::Issue));
    assert_eq!(ServiceStatus::Degraded.class(), Some(StatusClass::Issue));
    assert_eq!(ServiceStatus::Maintenance.class(), None);
    assert!(StatusClass::Issue.contains(ServiceStatus::Degraded));
    assert!(!StatusClass::Active.contains(ServiceStatus::Maintenance));
  }

  #[test]
  fn status_renders_lowercase() {
    assert_eq!(ServiceStatus::Maintenance.to_string(), "maintenance");
    assert_eq!(ServiceStatus::Degraded.as_ref(), "degraded");
  }

  #[test]
  fn status_parses_from_lowercase_name() {
    assert_eq!("degraded".parse::<ServiceStatus>().unwrap(), ServiceStatus::Degraded);
    assert_eq!("maintenance".parse::<ServiceStatus>().unwrap(), ServiceStatus::Maintenance);
    assert!("Exploded".parse::<ServiceStatus>().is_err());
  }

  #[test]
  fn parses_wire_format() {
    let json = r#"[{
      "id": "1",
      "name": "Auth Service",
      "type": "Authentication",
      "status": "active",
      "uptime": 99.99,
      "lastUpdated": "2026-01-06T10:00:00Z",
      "region": "US-East"
    }]"#;
    let records = parse_records(json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, "Authentication");
    assert_eq!(records[0].status, ServiceStatus::Active);
    assert_eq!(records[0].last_updated.to_rfc3339(), "2026-01-06T10:00:00+00:00");
  }

  #[test]
  fn rejects_unknown_status() {
    let json = r#"[{"id":"1","name":"a","type":"b","status":"exploded",
      "uptime":1.0,"lastUpdated":"2026-01-06T10:00:00Z","region":"r"}]"#;
    assert!(parse_records(json).is_err());
  }
}

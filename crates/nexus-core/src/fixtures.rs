//! Shared record builders for unit tests.

use chrono::{TimeZone, Utc};

use crate::service::{ServiceRecord, ServiceStatus};

pub fn record(
  id: &str,
  name: &str,
  kind: &str,
  region: &str,
  status: ServiceStatus,
  uptime: f64,
) -> ServiceRecord {
  ServiceRecord {
    id: id.into(),
    name: name.into(),
    kind: kind.into(),
    status,
    uptime,
    last_updated: Utc.with_ymd_and_hms(2026, 1, 6, 10, 0, 0).unwrap(),
    region: region.into(),
  }
}

/// Fifteen services; four of them offline or degraded.
pub fn fleet() -> Vec<ServiceRecord> {
  use ServiceStatus::*;
  vec![
    record("1", "Auth Service", "Authentication", "US-East", Active, 99.99),
    record("2", "Payment Gateway", "Transactions", "US-West", Active, 99.95),
    record("3", "Analytics Engine", "Data Processing", "EU-Central", Degraded, 98.5),
    record("4", "File Storage", "Storage", "US-East", Maintenance, 100.0),
    record("5", "Notification Service", "Messaging", "Asia-Pacific", Active, 99.9),
    record("6", "User Profile DB", "Database", "US-East", Active, 99.99),
    record("7", "Search Index", "Search", "EU-West", Offline, 95.0),
    record("8", "CDN Facade", "Content Delivery", "Global", Active, 99.99),
    record("9", "Invoice Generator", "Billing", "US-West", Active, 99.98),
    record("10", "Email Dispatcher", "Messaging", "Asia-South", Degraded, 97.2),
    record("11", "Log Aggregator", "Logging", "US-East", Active, 99.95),
    record("12", "Recommendation AI", "ML", "EU-Central", Maintenance, 98.0),
    record("13", "Order Processing", "Transactions", "US-East", Active, 99.99),
    record("14", "Inventory Sync", "Inventory", "US-West", Active, 99.92),
    record("15", "Chat Service", "Realtime", "SA-East", Offline, 89.5),
  ]
}

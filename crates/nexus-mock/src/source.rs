//! [`MockSource`] — an in-memory [`ServiceSource`] with artificial latency.

use std::{path::Path, sync::Arc, time::Duration};

use nexus_core::{service::ServiceRecord, source::ServiceSource};

use crate::{Error, Result};

/// Latency applied to every load unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

const BUILTIN_FIXTURE: &str = include_str!("../fixtures/services.json");

/// Serves a fixed record set after `delay`.
///
/// Cheap to clone — the records are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MockSource {
  records: Arc<[ServiceRecord]>,
  delay:   Duration,
}

impl MockSource {
  /// The built-in fifteen-service fleet.
  pub fn builtin(delay: Duration) -> Result<Self> {
    let records = serde_json::from_str(BUILTIN_FIXTURE)?;
    Ok(Self::with_records(records, delay))
  }

  /// Records read from a JSON array on disk.
  pub async fn from_path(path: &Path, delay: Duration) -> Result<Self> {
    let raw = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
      })?;
    let records: Vec<ServiceRecord> = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded fixture file");
    Ok(Self::with_records(records, delay))
  }

  pub fn with_records(records: Vec<ServiceRecord>, delay: Duration) -> Self {
    Self {
      records: records.into(),
      delay,
    }
  }

  pub fn delay(&self) -> Duration { self.delay }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

impl ServiceSource for MockSource {
  type Error = Error;

  fn load(
    &self,
    force_failure: bool,
  ) -> impl Future<Output = Result<Vec<ServiceRecord>, Self::Error>> + Send + '_ {
    async move {
      if !self.delay.is_zero() {
        tokio::time::sleep(self.delay).await;
      }
      if force_failure {
        tracing::debug!("simulated load failure");
        return Err(Error::Simulated);
      }
      Ok(self.records.to_vec())
    }
  }
}

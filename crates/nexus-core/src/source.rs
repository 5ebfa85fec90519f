//! The `ServiceSource` trait — where service records come from.
//!
//! Implemented by backends (e.g. `nexus-mock`). The dashboard depends on this
//! abstraction, not on any concrete source, so views can be exercised with a
//! plain in-memory record list.

use std::future::Future;

use crate::service::ServiceRecord;

/// An asynchronous provider of the full service record set.
///
/// Futures are `Send` so loads can run on a multi-threaded tokio runtime.
pub trait ServiceSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every record. When `force_failure` is set the source must fail
  /// with a human-readable error instead.
  fn load(
    &self,
    force_failure: bool,
  ) -> impl Future<Output = Result<Vec<ServiceRecord>, Self::Error>> + Send + '_;
}

//! Error types for `nexus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported page size {0} (expected one of 5, 10, 20, 50)")]
  UnsupportedPageSize(usize),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

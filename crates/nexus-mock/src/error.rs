//! Error type for `nexus-mock`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller asked for the load to fail.
  #[error("Failed to fetch service status. Please try again later.")]
  Simulated,

  #[error("malformed fixture: {0}")]
  Fixture(#[from] serde_json::Error),

  #[error("reading {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Layered runtime settings: defaults, optional TOML file, `NEXUS_*`
//! environment variables, then command-line flags.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use nexus_core::selection::{DEFAULT_PAGE_SIZE, check_page_size};
use serde::Deserialize;

/// Resolved settings for one dashboard session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Artificial latency of every load, in milliseconds.
  pub delay_ms:       u64,
  /// Initial page size; one of 5, 10, 20, 50.
  pub page_size:      usize,
  /// Start with loads forced to fail.
  pub simulate_error: bool,
  /// JSON record file replacing the built-in fleet.
  pub data_path:      Option<PathBuf>,
  /// Where to write tracing output. Nothing is logged without it.
  pub log_file:       Option<PathBuf>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      delay_ms:       1000,
      page_size:      DEFAULT_PAGE_SIZE,
      simulate_error: false,
      data_path:      None,
      log_file:       None,
    }
  }
}

impl Settings {
  /// Read the optional config file and the environment.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings: Self = builder
      .add_source(config::Environment::with_prefix("NEXUS").try_parsing(true))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.validate()
  }

  /// Reject values the dashboard cannot honour.
  pub fn validate(self) -> Result<Self> {
    check_page_size(self.page_size).context("invalid page_size")?;
    Ok(self)
  }

  pub fn delay(&self) -> Duration { Duration::from_millis(self.delay_ms) }
}

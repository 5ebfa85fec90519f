//! Simulated backend for the Nexus dashboard.
//!
//! [`MockSource`] serves a fixed record set after an artificial delay, or
//! fails on request, so the dashboard's loading and error paths can be
//! exercised without a real service.

mod source;

pub mod error;

pub use error::{Error, Result};
pub use source::{DEFAULT_DELAY, MockSource};

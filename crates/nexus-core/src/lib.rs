//! Core types and derived-view computation for the Nexus operations
//! dashboard.
//!
//! This crate has no terminal, runtime, or I/O dependencies. Everything here
//! is a pure function of a record set and a [`selection::ViewSelection`],
//! except the [`load::LoadController`] state machine, which only records
//! results handed to it.

pub mod dashboard;
pub mod error;
pub mod load;
pub mod metrics;
pub mod region;
pub mod selection;
pub mod service;
pub mod sort;
pub mod source;
pub mod table;

pub use error::{Error, Result};

#[cfg(test)]
mod fixtures;

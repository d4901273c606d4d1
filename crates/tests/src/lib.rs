//! Integration tests for the explorer caches.
//!
//! The caches run against real HTTP clients pointed at mockito servers:
//!
//! - `block_history_tests`: history window, delegate statistics and persistence
//! - `chain_stats_tests`: rich list and market snapshot publication
//! - `runtime_tests`: runtime startup, background refresh and shutdown
//! - `config_tests`: layered configuration loading
//! - `mock_infrastructure`: reusable daemon and market mocks
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```

pub mod mock_infrastructure;


#[cfg(test)]
mod chain_stats_tests;

#[cfg(test)]
mod config_tests;

#[cfg(test)]
mod runtime_tests;

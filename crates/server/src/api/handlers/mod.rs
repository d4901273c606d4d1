//! Route handlers.
//!
//! Cached views never touch the daemon. Lookups of individual blocks, transactions and
//! accounts are forwarded to it.

pub mod cache;
pub mod lookup;
pub mod system;

//! Display helpers shared by the caches and the HTTP layer.

pub mod format;

pub use format::{format_coin, format_unit, is_hex64};

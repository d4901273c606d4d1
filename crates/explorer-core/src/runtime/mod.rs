//! Explorer runtime initialization and lifecycle management.
//!
//! # Example
//!
//! ```no_run
//! use explorer_core::{config::AppConfig, runtime::ExplorerRuntime};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let runtime = ExplorerRuntime::builder().with_config(config).build()?;
//!
//!     let snapshot = runtime.block_history().read_snapshot();
//!     println!("{} blocks cached", snapshot.blocks.len());
//!
//!     runtime.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod lifecycle;

pub use builder::{ExplorerRuntimeBuilder, RuntimeError};
pub use lifecycle::ExplorerRuntime;

//! Logging setup and the activity log.
//!
//! Console output goes through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG`. The same events are appended to a JSONL activity log so an
//! administrator can see what was created, changed and deleted.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/logs/
//! ├── 2026-10-17_desktop.jsonl
//! └── 2026-10-17_cli.jsonl
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use ktm_core::logging::LoggingBuilder;
//!
//! let log_path = LoggingBuilder::new("desktop")
//!     .with_logs_dir(config.logs_dir())
//!     .init();
//! ```
//!
//! ```bash
//! # Every failed request
//! jq 'select(.level == "error")' logs/*.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::ActivityEntry;
pub use layer::{ActivityLayer, LoggingBuilder, DEFAULT_FILTER};
pub use writer::{read_entries, ActivityWriter};

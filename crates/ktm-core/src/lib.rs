//! KTM Admin Core Library
//!
//! Student identity-card (KTM) records: the data model, the faculty catalog,
//! form and table logic, the student gateway client, and card rendering.
//!
//! ## Overview
//!
//! All persistence lives behind a remote REST gateway. This crate owns what
//! the client is responsible for:
//!
//! - **Validation**: a record needs NIM, name, faculty and major
//! - **Catalog**: which majors belong to which faculty
//! - **Filtering**: case-insensitive search over name and NIM
//! - **Card export**: laying out a card, rasterizing it at 2x and saving a PNG
//!
//! ## Quick Start
//!
//! ```ignore
//! use ktm_core::{table, ClientConfig, HttpGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default();
//!     let gateway = HttpGateway::new(&config)?;
//!
//!     let records = table::load_records(&gateway).await;
//!     for record in table::filter_records(&records, "ilham") {
//!         println!("{} {}", record.nim, record.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod card;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod logging;
pub mod notice;
pub mod photo;
pub mod table;
pub mod types;

// Re-exports
pub use card::{
    export_file_name, CardExporter, CardPreview, CardRenderer, DirectorySink, ExportSink,
    ExportedCard, PreviewState, PreviewSurface,
};
pub use config::ClientConfig;
pub use error::{KtmError, KtmResult};
pub use form::{RecordDraft, RecordForm, RequiredField, SubmitOutcome};
pub use gateway::{resolve_photo_url, HttpGateway, MemoryGateway, StudentGateway};
pub use notice::{Notice, NoticeKind};
pub use photo::PhotoAttachment;
pub use table::{Confirm, DeleteOutcome, EmptyState, RecordTable};
pub use types::*;

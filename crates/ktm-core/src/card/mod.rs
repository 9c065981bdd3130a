//! Card preview and export.
//!
//! ## Export flow
//!
//! ```text
//! show(record) ──▶ surface attached? ──no──▶ wait settle delay
//!                        │                          │
//!                        ▼                          ▼
//!              fetch photo (best effort) ──▶ layout SVG ──▶ rasterize 2x
//!                                                               │
//!                    clear preview ◀── sink.save(KTM_<name>.png) ◀── PNG
//! ```
//!
//! The preview is cleared whatever the outcome.

pub mod export;
pub mod layout;
pub mod preview;
pub mod raster;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub use export::{export_file_name, DirectorySink, ExportSink};
pub use layout::{card_svg, CARD_HEIGHT, CARD_WIDTH};
pub use preview::{CardPreview, PreviewState, PreviewSurface};
pub use raster::{CardRenderer, RenderedPng, EXPORT_SCALE};

use crate::error::{KtmError, KtmResult};
use crate::gateway::StudentGateway;
use crate::photo;
use crate::types::StudentRecord;

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCard {
    pub file_name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Renders cards and hands them to a sink.
#[derive(Clone)]
pub struct CardExporter {
    renderer: Arc<CardRenderer>,
    settle_delay: Duration,
}

impl CardExporter {
    pub fn new(renderer: Arc<CardRenderer>, settle_delay: Duration) -> Self {
        Self {
            renderer,
            settle_delay,
        }
    }

    /// Render `record` to PNG at the export scale.
    ///
    /// A photo that cannot be fetched or decoded is left out.
    pub async fn render<G: StudentGateway>(
        &self,
        gateway: &G,
        record: &StudentRecord,
    ) -> KtmResult<RenderedPng> {
        let photo = embedded_photo(gateway, record).await;
        let svg = card_svg(record, photo.as_deref());

        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.render_png(&svg, EXPORT_SCALE))
            .await
            .map_err(|e| KtmError::Render(format!("render task failed: {}", e)))?
    }

    /// Full export: show, settle, render, save, clear.
    pub async fn export<G, S, P>(
        &self,
        gateway: &G,
        surface: &P,
        sink: &S,
        record: &StudentRecord,
    ) -> KtmResult<ExportedCard>
    where
        G: StudentGateway,
        S: ExportSink,
        P: PreviewSurface,
    {
        surface.show(record);
        if !surface.is_attached() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let result = self.render_and_save(gateway, sink, record).await;
        surface.clear();

        if let Err(e) = &result {
            tracing::error!(id = %record.id, "Error downloading KTM: {}", e);
        }
        result
    }

    async fn render_and_save<G: StudentGateway, S: ExportSink>(
        &self,
        gateway: &G,
        sink: &S,
        record: &StudentRecord,
    ) -> KtmResult<ExportedCard> {
        let png = self.render(gateway, record).await?;
        let file_name = export_file_name(&record.name);
        let path = sink.save(&file_name, png.bytes).await?;
        Ok(ExportedCard {
            file_name,
            path,
            width: png.width,
            height: png.height,
        })
    }
}

/// Photo as a PNG data URI sized for the card slot at export scale.
async fn embedded_photo<G: StudentGateway>(gateway: &G, record: &StudentRecord) -> Option<String> {
    let path = record.photo_url.as_deref()?;
    let bytes = match gateway.fetch_photo(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path, "Photo left out of card: {}", e);
            return None;
        }
    };

    let scale = EXPORT_SCALE as u32;
    match photo::fit_png(&bytes, layout::PHOTO_WIDTH * scale, layout::PHOTO_HEIGHT * scale) {
        Ok(png) => Some(photo::data_uri("image/png", &png)),
        Err(e) => {
            tracing::warn!(path, "Photo left out of card: {}", e);
            None
        }
    }
}

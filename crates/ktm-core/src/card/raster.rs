//! Card rasterization (resvg) and PNG encoding (image).

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia;
use resvg::usvg;

use crate::error::{KtmError, KtmResult};

/// Fixed export scale factor.
pub const EXPORT_SCALE: f32 = 2.0;

/// Families tried, in order, for the document's `sans-serif`.
const SANS_CANDIDATES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];

/// Turns card documents into bitmaps.
///
/// Loading system fonts is slow, so one renderer is built at startup and
/// shared.
pub struct CardRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRenderer {
    /// Renderer using the system's installed fonts.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let family = SANS_CANDIDATES.iter().find(|name| {
            db.faces()
                .any(|face| face.families.iter().any(|(family, _)| family.as_str() == **name))
        });
        match family {
            Some(name) => db.set_sans_serif_family(*name),
            None => tracing::warn!("No known sans-serif font installed; card text may be missing"),
        }
        tracing::debug!(faces = db.len(), "Card renderer fonts loaded");

        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Renderer with no fonts; text is skipped. Shapes and images still draw.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Rasterize `svg` at `scale` into a straight-alpha RGBA bitmap.
    pub fn rasterize(&self, svg: &str, scale: f32) -> KtmResult<RgbaImage> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| KtmError::Render(format!("invalid card document: {}", e)))?;

        let size = tree.size();
        let width = (size.width() * scale).round() as u32;
        let height = (size.height() * scale).round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            KtmError::Render(format!("cannot allocate {}x{} bitmap", width, height))
        })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let mut img = RgbaImage::new(width, height);
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(img)
    }

    /// Rasterize and encode as PNG.
    pub fn render_png(&self, svg: &str, scale: f32) -> KtmResult<RenderedPng> {
        let img = self.rasterize(svg, scale)?;
        let (width, height) = img.dimensions();
        let bytes = encode_png(&img)?;
        Ok(RenderedPng {
            bytes,
            width,
            height,
        })
    }
}

/// Encoded card image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPng {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Lossless PNG encoding.
pub fn encode_png(img: &RgbaImage) -> KtmResult<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="4"><rect width="10" height="4" fill="#ff0000"/></svg>"##;

    #[test]
    fn scales_dimensions() {
        let renderer = CardRenderer::without_fonts();
        let img = renderer.rasterize(SQUARE, 2.0).unwrap();
        assert_eq!(img.dimensions(), (20, 8));
        assert_eq!(img.get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn invalid_document_is_render_error() {
        let renderer = CardRenderer::without_fonts();
        let err = renderer.rasterize("<not-svg", 2.0).unwrap_err();
        assert!(matches!(err, KtmError::Render(_)));
    }

    #[test]
    fn png_output_decodes() {
        let renderer = CardRenderer::without_fonts();
        let png = renderer.render_png(SQUARE, 1.0).unwrap();
        assert_eq!(&png.bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&png.bytes).unwrap();
        assert_eq!((png.width, png.height), (10, 4));
        assert_eq!(decoded.width(), 10);
    }
}

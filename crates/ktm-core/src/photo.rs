//! Photo attachments and image preparation.
//!
//! A chosen photo is kept as raw bytes for upload. Previews and the card's
//! photo slot use center-cropped copies ("object-cover").

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::KtmResult;

/// Edge length of the square form preview, in pixels.
pub const PREVIEW_SIZE: u32 = 160;

/// A photo file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PhotoAttachment {
    /// Wrap bytes, guessing the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Read a photo from disk, blocking the calling thread.
    pub fn from_path(path: impl AsRef<Path>) -> KtmResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(file_name_of(path), bytes))
    }

    /// Read a photo from disk without blocking the runtime.
    pub async fn read(path: impl AsRef<Path>) -> KtmResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name_of(path), bytes))
    }

    /// Data URI for the local form preview.
    ///
    /// Decodable images become a square PNG thumbnail; anything else is
    /// shown as-is and left to the renderer.
    pub fn preview_data_uri(&self) -> String {
        match thumbnail_png(&self.bytes, PREVIEW_SIZE) {
            Ok(png) => data_uri("image/png", &png),
            Err(e) => {
                tracing::debug!(file = %self.file_name, "Preview thumbnail failed: {}", e);
                data_uri(&self.mime_type, &self.bytes)
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo")
        .to_string()
}

/// MIME type for a file name, based on its extension.
pub fn guess_mime(file_name: &str) -> &'static str {
    ImageFormat::from_path(file_name)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, encoded)
}

/// Square, center-cropped PNG thumbnail.
pub fn thumbnail_png(bytes: &[u8], size: u32) -> KtmResult<Vec<u8>> {
    fit_png(bytes, size, size)
}

/// Decode `bytes`, crop to the `width`:`height` aspect and scale to exactly
/// that size, re-encoded as PNG.
pub fn fit_png(bytes: &[u8], width: u32, height: u32) -> KtmResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    let fitted = crop_to_aspect(img, width, height).resize_exact(width, height, FilterType::Triangle);
    encode_png(&fitted)
}

/// Center crop to the given aspect ratio without scaling.
pub fn crop_to_aspect(img: DynamicImage, aspect_w: u32, aspect_h: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || aspect_w == 0 || aspect_h == 0 {
        return img;
    }

    // Compare width/height against aspect_w/aspect_h without floats
    let (target_w, target_h) = if (width as u64) * (aspect_h as u64) > (height as u64) * (aspect_w as u64) {
        // Too wide
        let new_w = ((height as u64) * (aspect_w as u64) / (aspect_h as u64)) as u32;
        (new_w.max(1), height)
    } else {
        let new_h = ((width as u64) * (aspect_h as u64) / (aspect_w as u64)) as u32;
        (width, new_h.max(1))
    };

    let x = (width.saturating_sub(target_w)) / 2;
    let y = (height.saturating_sub(target_h)) / 2;

    img.crop_imm(x, y, target_w, target_h)
}

fn encode_png(img: &DynamicImage) -> KtmResult<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
        encode_png(&DynamicImage::ImageRgba8(img)).unwrap()
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime("me.png"), "image/png");
        assert_eq!(guess_mime("me.JPG"), "image/jpeg");
        assert_eq!(guess_mime("notes"), "application/octet-stream");
    }

    #[test]
    fn crop_wide_image_to_portrait() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(400, 200));
        let cropped = crop_to_aspect(img, 3, 4);
        assert_eq!(cropped.dimensions(), (150, 200));
    }

    #[test]
    fn crop_tall_image_to_square() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(100, 300));
        let cropped = crop_to_aspect(img, 1, 1);
        assert_eq!(cropped.dimensions(), (100, 100));
    }

    #[test]
    fn fit_png_has_exact_size() {
        let png = fit_png(&sample_png(640, 480), 150, 200).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (150, 200));
    }

    #[test]
    fn preview_of_valid_image_is_png_thumbnail() {
        let photo = PhotoAttachment::new("face.png", sample_png(300, 300));
        assert!(photo.preview_data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn preview_of_garbage_falls_back_to_raw_bytes() {
        let photo = PhotoAttachment::new("face.jpg", b"not an image".to_vec());
        assert!(photo.preview_data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn read_takes_name_and_mime_from_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("sari.jpeg");
        std::fs::write(&path, [7u8, 8, 9]).unwrap();

        let photo = PhotoAttachment::read(&path).await.unwrap();
        assert_eq!(photo.file_name, "sari.jpeg");
        assert_eq!(photo.mime_type, "image/jpeg");
        assert_eq!(photo.bytes, vec![7, 8, 9]);
        assert_eq!(photo, PhotoAttachment::from_path(&path).unwrap());
    }

    #[tokio::test]
    async fn read_missing_file_is_io_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = PhotoAttachment::read(temp.path().join("gone.png")).await.unwrap_err();
        assert!(matches!(err, crate::error::KtmError::Io(_)));
    }

    #[test]
    fn debug_hides_bytes() {
        let photo = PhotoAttachment::new("a.png", vec![1, 2, 3]);
        let dbg = format!("{:?}", photo);
        assert!(dbg.contains("len: 3"));
    }
}

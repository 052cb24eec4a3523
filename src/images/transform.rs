//! Decode, stretch-resize and JPEG encoding of in-memory images.
//!
//! The target size is fixed at 100x100 and the source aspect ratio is ignored.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thumbforge_common::{Error, ObjectRef, Result};

/// Output width in pixels.
pub const TARGET_WIDTH: u32 = 100;

/// Output height in pixels.
pub const TARGET_HEIGHT: u32 = 100;

/// JPEG quality used for the re-encoded output.
pub const JPEG_QUALITY: u8 = 75;

/// Content type recorded for every stored output.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Decode raw bytes into an image, guessing the format from its magic bytes.
pub fn decode(object: &ObjectRef, data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(data).map_err(|e| Error::decode(object, e.to_string()))
}

/// Resize to exactly `TARGET_WIDTH` x `TARGET_HEIGHT`, stretching as needed.
pub fn stretch_resize(img: &DynamicImage) -> DynamicImage {
    img.resize_exact(TARGET_WIDTH, TARGET_HEIGHT, FilterType::CatmullRom)
}

/// Encode as baseline JPEG.
///
/// JPEG carries no alpha channel and only 8-bit samples, so the image is
/// flattened to RGB8 first.
pub fn encode_jpeg(object: &ObjectRef, img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| Error::encode(object, e.to_string()))?;
    Ok(buf.into_inner())
}

/// Full transform for one object: decode, stretch to 100x100, encode as JPEG.
pub fn resize_to_jpeg(object: &ObjectRef, data: &[u8]) -> Result<Vec<u8>> {
    let img = decode(object, data)?;
    tracing::debug!(
        "Decoded {} ({}x{}, {:?})",
        object,
        img.width(),
        img.height(),
        img.color()
    );

    let resized = stretch_resize(&img);
    encode_jpeg(object, &resized)
}

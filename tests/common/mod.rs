//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], an [`ImageResizeHandler`] wired to an in-memory
//! store that plays both the source and the destination side.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use thumbforge::store::{MemoryStore, ObjectStore};
use thumbforge::ImageResizeHandler;
use thumbforge_common::ObjectRef;

pub const SOURCE_BUCKET: &str = "in";
pub const DESTINATION_BUCKET: &str = "out";

pub struct TestHarness {
    pub store: MemoryStore,
    pub handler: ImageResizeHandler,
}

impl TestHarness {
    /// Handler reading `in` and writing `out` on one shared memory store.
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let shared: Arc<dyn ObjectStore> = Arc::new(store.clone());
        let handler = ImageResizeHandler::new(shared.clone(), shared, DESTINATION_BUCKET);
        Self { store, handler }
    }

    /// Seed an encoded image of the given size into the source bucket.
    pub fn seed_image(&self, key: &str, width: u32, height: u32, format: ImageFormat) {
        self.store.insert(
            ObjectRef::new(SOURCE_BUCKET, key),
            encode_image(width, height, format),
            "application/octet-stream",
        );
    }

    /// Seed arbitrary bytes into the source bucket.
    pub fn seed_bytes(&self, key: &str, data: &'static [u8]) {
        self.store
            .insert(ObjectRef::new(SOURCE_BUCKET, key), data, "application/octet-stream");
    }

    /// Decoded output for `key`, if the handler wrote one.
    pub fn output(&self, key: &str) -> Option<DynamicImage> {
        self.store
            .object(&ObjectRef::new(DESTINATION_BUCKET, format!("resized-{key}")))
            .map(|stored| image::load_from_memory(&stored.body).expect("output decodes"))
    }
}

/// Encode a gradient image in `format`, so resizing has real content to work on.
pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = match format {
        ImageFormat::Png | ImageFormat::Gif => {
            DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
            }))
        }
        _ => DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        })),
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode test image");
    buf.into_inner()
}

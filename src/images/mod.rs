//! Image transformation for the resize handler.
//!
//! Decoding, the fixed stretch-resize and JPEG re-encoding live here so the
//! handler only sequences store calls around [`resize_to_jpeg`].

mod transform;

pub use transform::{
    decode, encode_jpeg, resize_to_jpeg, stretch_resize, JPEG_CONTENT_TYPE, JPEG_QUALITY,
    TARGET_HEIGHT, TARGET_WIDTH,
};

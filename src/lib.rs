//! Thumbforge - resize newly stored images into fixed-size JPEG thumbnails
//!
//! This library crate exposes the handler and its collaborators for the
//! binary and for integration testing.

pub mod config;
pub mod event;
pub mod handler;
pub mod images;
pub mod store;

pub use event::NotificationBatch;
pub use handler::{HandlerResponse, ImageResizeHandler};
pub use store::ObjectStore;

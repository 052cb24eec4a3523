//! Thumbforge-Common: Shared types used across thumbforge.
//!
//! - **Error Handling**: The error taxonomy for the resize handler and stores
//! - **Object References**: `(location, key)` pairs addressing stored objects
//!
//! # Examples
//!
//! ```
//! use thumbforge_common::{Error, ObjectRef, Result};
//!
//! let source = ObjectRef::new("in", "photo.png");
//! assert_eq!(source.to_string(), "in/photo.png");
//!
//! fn fetch() -> Result<()> {
//!     Err(Error::retrieval("in/photo.png", "no such key"))
//! }
//! assert!(fetch().is_err());
//! ```

pub mod error;
pub mod object;

pub use error::{Error, Result};
pub use object::ObjectRef;

//! Image encoding for cropped pages.
//!
//! This module provides functionality for:
//! - Encoding crops to JPEG with configurable quality
//!
//! All operations are synchronous; the caller decides where they run.

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};

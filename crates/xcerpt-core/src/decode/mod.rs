//! Decoding of photographed pages.
//!
//! This module provides functionality for:
//! - Decoding captured JPEG photos while keeping the stored pixel buffer
//! - Reading the EXIF orientation that makes the buffer upright
//!
//! # Architecture
//!
//! Camera buffers are usually stored sideways with an orientation tag. The
//! crop pipeline cuts from the stored buffer and only rotates the final crop,
//! so the orientation travels with the pixels in [`CapturedImage`].

mod jpeg;
mod types;

pub use jpeg::{decode_capture, decode_jpeg, get_orientation};
pub use types::{CapturedImage, DecodeError, DecodedImage, Orientation};

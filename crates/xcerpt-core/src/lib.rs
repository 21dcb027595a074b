//! Xcerpt Core - Book excerpt capture library
//!
//! This crate provides the core functionality for Xcerpt, including the
//! interactive crop rectangle, orientation-aware image cropping, captured
//! photo decoding, and the book/excerpt catalog.

pub mod capture;
pub mod catalog;
pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod transform;

pub use capture::{
    CaptureError, CaptureSession, CaptureStage, ExcerptDraft, RecognitionError, TextRecognizer,
};
pub use catalog::{Book, BookId, CatalogError, Excerpt, ExcerptId, Library, NewBook, NewExcerpt, Rgba};
pub use config::{CaptureConfig, CropConfig};
pub use decode::{CapturedImage, DecodedImage, Orientation};
pub use geometry::{
    reduce, CropRegion, DisplayRect, DragTarget, Extent, GestureEvent, Handle,
};
pub use transform::{crop_or_original, crop_to_region, CropError, PixelRect};

//! Image cropping for captured pages.
//!
//! This module turns the on-screen crop selection into a new image cut from
//! the captured page.
//!
//! # Coordinate System
//!
//! - Selections arrive in display space (upright, scaled to fit)
//! - Crops are cut from the stored pixel buffer, whatever its orientation
//! - Origin is top-left corner in both spaces

mod crop;

pub use crop::{
    crop_captured, crop_or_original, crop_to_region, map_to_source, scale_factor,
    source_crop_rect, CropError, PixelRect,
};

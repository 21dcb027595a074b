//! Cropping a captured page to the on-screen selection.
//!
//! The crop rectangle lives in the coordinate space of the *displayed*
//! image: upright and scaled to fit the view. The pixels live in the
//! *stored* buffer, which may be rotated or mirrored relative to the
//! display. Cropping therefore takes two steps:
//!
//! 1. Map the display rectangle into buffer space through the orientation
//!    and a single uniform scale factor
//! 2. Copy the covered rows out of the buffer into a new image
//!
//! # Mapping
//!
//! With display extent `(W, H)`, display rectangle `(x, y, w, h)` and scale
//! `s`, the stored-buffer rectangle is:
//!
//! ```text
//! Normal          ( x,          y,          w, h ) * s
//! FlipHorizontal  ( W - x - w,  y,          w, h ) * s
//! Rotate180       ( W - x - w,  H - y - h,  w, h ) * s
//! FlipVertical    ( x,          H - y - h,  w, h ) * s
//! Transpose       ( y,          x,          h, w ) * s
//! Rotate90CW      ( y,          W - x - w,  h, w ) * s
//! Transverse      ( H - y - h,  W - x - w,  h, w ) * s
//! Rotate270CW     ( H - y - h,  x,          h, w ) * s
//! ```
//!
//! The scale is the buffer width over the display extent on the matching
//! axis; the display preserves aspect ratio so one axis is enough.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{CapturedImage, DecodedImage, Orientation};
use crate::geometry::{CropRegion, DisplayRect, Extent};

/// Errors that can occur while cropping.
///
/// None of these reach the user as a failure: callers fall back to the
/// uncropped image (see [`crop_or_original`]).
#[derive(Debug, Error, PartialEq)]
pub enum CropError {
    /// The source has no usable pixel buffer.
    #[error("Source image has no pixel buffer")]
    NoPixelBuffer,

    /// The rectangle or display extent cannot produce a crop.
    #[error("Invalid crop geometry: {0}")]
    InvalidGeometry(String),

    /// The mapped rectangle does not overlap the source.
    #[error(
        "Crop rectangle ({x}, {y}, {width}x{height}) lies outside the {image_width}x{image_height} source"
    )]
    OutOfBounds {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    },
}

/// Integer crop rectangle in stored-buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Buffer pixels per display point for a captured image shown at `displayed`.
///
/// Returns `None` when the display extent is degenerate.
pub fn scale_factor(source: &CapturedImage, displayed: Extent) -> Option<f64> {
    if !displayed.is_drawable() {
        return None;
    }
    let along = if source.orientation.swaps_dimensions() {
        displayed.height
    } else {
        displayed.width
    };
    let scale = source.image.width as f64 / along;
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// Map a display rectangle into stored-buffer space (unclipped).
pub fn map_to_source(
    rect: DisplayRect,
    displayed: Extent,
    orientation: Orientation,
    scale: f64,
) -> DisplayRect {
    let DisplayRect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let (dw, dh) = (displayed.width, displayed.height);

    let (sx, sy, sw, sh) = match orientation {
        Orientation::Normal => (x, y, w, h),
        Orientation::FlipHorizontal => (dw - x - w, y, w, h),
        Orientation::Rotate180 => (dw - x - w, dh - y - h, w, h),
        Orientation::FlipVertical => (x, dh - y - h, w, h),
        Orientation::Transpose => (y, x, h, w),
        Orientation::Rotate90CW => (y, dw - x - w, h, w),
        Orientation::Transverse => (dh - y - h, dw - x - w, h, w),
        Orientation::Rotate270CW => (dh - y - h, x, h, w),
    };

    DisplayRect::new(sx * scale, sy * scale, sw * scale, sh * scale)
}

/// Compute the stored-buffer pixel rectangle covered by a display rectangle.
///
/// The mapped rectangle is expanded outward to whole pixels and clipped to
/// the buffer. Partial overlap is fine; no overlap is an error.
pub fn source_crop_rect(
    source: &CapturedImage,
    rect: DisplayRect,
    displayed: Extent,
) -> Result<PixelRect, CropError> {
    if !source.image.has_pixel_buffer() {
        return Err(CropError::NoPixelBuffer);
    }

    let finite = [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(CropError::InvalidGeometry(format!(
            "rectangle {}x{} at ({}, {})",
            rect.width, rect.height, rect.x, rect.y
        )));
    }

    let scale = scale_factor(source, displayed).ok_or_else(|| {
        CropError::InvalidGeometry(format!(
            "display extent {}x{}",
            displayed.width, displayed.height
        ))
    })?;

    let mapped = map_to_source(rect, displayed, source.orientation, scale);
    let (img_w, img_h) = (source.image.width, source.image.height);

    let left = mapped.x.floor().clamp(0.0, img_w as f64);
    let top = mapped.y.floor().clamp(0.0, img_h as f64);
    let right = mapped.right().ceil().clamp(0.0, img_w as f64);
    let bottom = mapped.bottom().ceil().clamp(0.0, img_h as f64);

    if right <= left || bottom <= top {
        return Err(CropError::OutOfBounds {
            x: mapped.x,
            y: mapped.y,
            width: mapped.width,
            height: mapped.height,
            image_width: img_w,
            image_height: img_h,
        });
    }

    Ok(PixelRect {
        x: left as u32,
        y: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}

/// Crop a captured page to a display rectangle.
///
/// # Arguments
///
/// * `source` - The captured page; never modified
/// * `rect` - Selection in display space
/// * `displayed` - Extent the page is displayed at
///
/// # Returns
///
/// A new `CapturedImage` cut from the stored buffer. It keeps the source
/// orientation, so [`CapturedImage::to_upright`] shows it the same way up as
/// the selection was drawn.
pub fn crop_captured(
    source: &CapturedImage,
    rect: DisplayRect,
    displayed: Extent,
) -> Result<CapturedImage, CropError> {
    let region = source_crop_rect(source, rect, displayed)?;
    let image = extract(&source.image, region);
    log::debug!(
        "Cropped {}x{} source to {}x{} at ({}, {})",
        source.image.width,
        source.image.height,
        region.width,
        region.height,
        region.x,
        region.y
    );
    Ok(CapturedImage::new(image, source.orientation))
}

/// Crop a captured page to the current state of a crop region.
pub fn crop_to_region(
    source: &CapturedImage,
    region: &CropRegion,
) -> Result<CapturedImage, CropError> {
    crop_captured(source, region.display_rect(), region.extent())
}

/// Crop, or hand back a copy of the original when the crop cannot be made.
pub fn crop_or_original(
    source: &CapturedImage,
    rect: DisplayRect,
    displayed: Extent,
) -> CapturedImage {
    match crop_captured(source, rect, displayed) {
        Ok(cropped) => cropped,
        Err(e) => {
            log::warn!("Crop failed, keeping original image: {e}");
            source.clone()
        }
    }
}

/// Copy a pixel rectangle out of an RGB buffer. `region` must lie inside.
fn extract(image: &DecodedImage, region: PixelRect) -> DecodedImage {
    let row_bytes = region.width as usize * 3;
    let stride = image.width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * region.height as usize);

    for y in region.y..region.y + region.height {
        let start = y as usize * stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(region.width, region.height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

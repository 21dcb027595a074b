//! WASM bindings for cropping a captured page.
//!
//! Crops are cut from the stored buffer and keep the page's orientation, so
//! call `upright()` on the result before drawing it.

use crate::region::JsCropRegion;
use crate::types::JsCapturedImage;
use wasm_bindgen::prelude::*;
use xcerpt_core::geometry::{DisplayRect, Extent};
use xcerpt_core::transform;

/// Crop a page to the current state of a crop region.
///
/// # Errors
///
/// Returns an error if the page has no pixel buffer or the rectangle misses
/// the page entirely.
///
/// # Example (TypeScript)
///
/// ```typescript
/// try {
///   const crop = crop_to_region(page, region);
///   show(crop.upright());
/// } catch (e) {
///   // stay on the crop view
/// }
/// ```
#[wasm_bindgen]
pub fn crop_to_region(
    image: &JsCapturedImage,
    region: &JsCropRegion,
) -> Result<JsCapturedImage, JsValue> {
    transform::crop_to_region(&image.to_captured(), region.inner())
        .map(JsCapturedImage::from_captured)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop a page to a view-space rectangle over an image displayed at
/// `display_width` x `display_height`.
#[wasm_bindgen]
pub fn crop_to_rect(
    image: &JsCapturedImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    display_width: f64,
    display_height: f64,
) -> Result<JsCapturedImage, JsValue> {
    transform::crop_captured(
        &image.to_captured(),
        DisplayRect::new(x, y, width, height),
        Extent::new(display_width, display_height),
    )
    .map(JsCapturedImage::from_captured)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop a page to a region, or return a copy of the page when the crop
/// cannot be made.
#[wasm_bindgen]
pub fn crop_or_original(image: &JsCapturedImage, region: &JsCropRegion) -> JsCapturedImage {
    let inner = region.inner();
    JsCapturedImage::from_captured(transform::crop_or_original(
        &image.to_captured(),
        inner.display_rect(),
        inner.extent(),
    ))
}

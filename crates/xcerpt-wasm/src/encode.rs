//! Image encoding WASM bindings.
//!
//! Crops are encoded upright so an out-of-process recognizer or the host's
//! storage never has to deal with EXIF orientation.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_upright_jpeg`] - Encode a captured image with orientation applied
//!
//! # Example
//!
//! ```typescript
//! import { crop_to_region, encode_upright_jpeg } from '@xcerpt/wasm';
//!
//! const crop = crop_to_region(page, region);
//! const jpeg = encode_upright_jpeg(crop, 90);
//! ```

use crate::types::JsCapturedImage;
use wasm_bindgen::prelude::*;
use xcerpt_core::encode;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, recommended: 90)
///
/// # Errors
///
/// Returns an error if the dimensions are zero or the pixel data length
/// doesn't match width * height * 3.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a captured image to JPEG with its orientation applied.
#[wasm_bindgen]
pub fn encode_upright_jpeg(image: &JsCapturedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let upright = image
        .to_captured()
        .to_upright()
        .ok_or_else(|| JsValue::from_str("Captured image has no pixel buffer"))?;
    encode::encode_image(&upright, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_capture`] - Decode a camera JPEG, keeping orientation separate
//! - [`decode_jpeg`] - Decode a JPEG with orientation applied
//! - [`get_orientation`] - Read the EXIF orientation value only
//!
//! # Example
//!
//! ```typescript
//! import { decode_capture } from '@xcerpt/wasm';
//!
//! const bytes = new Uint8Array(await photo.arrayBuffer());
//! const page = decode_capture(bytes);
//! console.log(`Page shows as ${page.display_width}x${page.display_height}`);
//! ```

use crate::types::JsCapturedImage;
use wasm_bindgen::prelude::*;
use xcerpt_core::decode;

/// Decode a photographed page.
///
/// The pixel buffer is returned as stored; the EXIF orientation is carried
/// alongside so crops can be cut from the raw buffer.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not an image, or truncated.
#[wasm_bindgen]
pub fn decode_capture(bytes: &[u8]) -> Result<JsCapturedImage, JsValue> {
    decode::decode_capture(bytes)
        .map(JsCapturedImage::from_captured)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a JPEG with EXIF orientation already applied.
///
/// The result always reports orientation 1.
#[wasm_bindgen]
pub fn decode_jpeg(bytes: &[u8]) -> Result<JsCapturedImage, JsValue> {
    decode::decode_jpeg(bytes)
        .map(JsCapturedImage::from_upright)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of an encoded image; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_orientation_without_exif() {
        assert_eq!(get_orientation(&[0xFF, 0xD8, 0xFF, 0xD9]), 1);
        assert_eq!(get_orientation(&[]), 1);
    }
}

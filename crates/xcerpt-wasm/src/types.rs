//! WASM-compatible wrapper types for captured pages and gestures.
//!
//! JavaScript sees plain numbers: orientations as EXIF values (1-8) and drag
//! targets as small integer codes (see [`target_from_u8`]).

use wasm_bindgen::prelude::*;
use xcerpt_core::decode::{CapturedImage, DecodedImage, Orientation};
use xcerpt_core::geometry::{DragTarget, GestureEvent, Handle};

/// Drag target code for the rectangle body (translate gesture).
pub(crate) const BODY_TARGET: u8 = 8;

/// A captured page for JavaScript: raw RGB buffer plus EXIF orientation.
///
/// The buffer is never rotated in place. Call [`JsCapturedImage::upright`]
/// for display-ready pixels.
#[wasm_bindgen]
pub struct JsCapturedImage {
    width: u32,
    height: u32,
    orientation: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsCapturedImage {
    /// Create from raw RGB pixels (3 bytes per pixel, row-major).
    ///
    /// Unknown orientation values are treated as upright.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, orientation: u8, pixels: Vec<u8>) -> JsCapturedImage {
        JsCapturedImage {
            width,
            height,
            orientation: orientation_from_u8(orientation) as u8,
            pixels,
        }
    }

    /// Stored buffer width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Stored buffer height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// EXIF orientation value (1-8)
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Width as displayed, after orientation.
    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> u32 {
        self.oriented_dimensions().0
    }

    /// Height as displayed, after orientation.
    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> u32 {
        self.oriented_dimensions().1
    }

    /// Copy of the raw RGB pixels as a Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Upright copy with orientation applied to the pixels.
    pub fn upright(&self) -> Result<JsCapturedImage, JsValue> {
        self.to_captured()
            .to_upright()
            .map(JsCapturedImage::from_upright)
            .ok_or_else(|| JsValue::from_str("Captured image has no pixel buffer"))
    }
}

impl JsCapturedImage {
    pub(crate) fn from_captured(captured: CapturedImage) -> Self {
        Self {
            width: captured.image.width,
            height: captured.image.height,
            orientation: captured.orientation as u8,
            pixels: captured.image.pixels,
        }
    }

    pub(crate) fn from_upright(image: DecodedImage) -> Self {
        Self::from_captured(CapturedImage::new(image, Orientation::Normal))
    }

    /// Convert to the core type. Clones the pixel data.
    pub(crate) fn to_captured(&self) -> CapturedImage {
        CapturedImage::new(
            DecodedImage {
                width: self.width,
                height: self.height,
                pixels: self.pixels.clone(),
            },
            orientation_from_u8(self.orientation),
        )
    }

    fn oriented_dimensions(&self) -> (u32, u32) {
        if orientation_from_u8(self.orientation).swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Convert an EXIF orientation value. Anything outside 1-8 is upright.
pub(crate) fn orientation_from_u8(value: u8) -> Orientation {
    Orientation::from(value as u32)
}

/// Convert a drag target code to the core `DragTarget`.
///
/// Values:
/// - 0-3 = Left, Right, Top, Bottom edges
/// - 4-7 = TopLeft, TopRight, BottomLeft, BottomRight corners
/// - 8 = rectangle body
///
/// Any other value is `None`.
pub(crate) fn target_from_u8(value: u8) -> Option<DragTarget> {
    if value == BODY_TARGET {
        return Some(DragTarget::Body);
    }
    Handle::ALL
        .get(value as usize)
        .copied()
        .map(DragTarget::Handle)
}

/// Inverse of [`target_from_u8`].
pub(crate) fn target_to_u8(target: DragTarget) -> u8 {
    match target {
        DragTarget::Body => BODY_TARGET,
        DragTarget::Handle(handle) => Handle::ALL
            .iter()
            .position(|h| *h == handle)
            .map_or(BODY_TARGET, |i| i as u8),
    }
}

/// Build a gesture event from JavaScript arguments.
///
/// Unknown target codes are logged and dropped.
pub(crate) fn gesture_event(target: u8, dx: f64, dy: f64, ended: bool) -> Option<GestureEvent> {
    let Some(target) = target_from_u8(target) else {
        log::warn!("Ignoring gesture on unknown target {target}");
        return None;
    };
    Some(if ended {
        GestureEvent::Ended { target, dx, dy }
    } else {
        GestureEvent::Changed { target, dx, dy }
    })
}

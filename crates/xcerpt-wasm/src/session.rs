//! WASM bindings for the camera-to-excerpt capture session.
//!
//! Text recognition stays in JavaScript: the host passes a function that
//! receives an upright `JsCapturedImage` and returns an array of lines.

use crate::types::{gesture_event, target_to_u8, JsCapturedImage};
use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;
use xcerpt_core::capture::{CaptureSession, CaptureStage, RecognitionError};
use xcerpt_core::config::CaptureConfig;
use xcerpt_core::decode::DecodedImage;
use xcerpt_core::geometry::{Extent, GestureEvent};

/// One photographed page on its way to becoming an excerpt.
#[wasm_bindgen]
pub struct JsCaptureSession {
    inner: CaptureSession,
}

#[wasm_bindgen]
impl JsCaptureSession {
    /// Start a session for a page displayed at the given extent.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsCapturedImage, display_width: f64, display_height: f64) -> JsCaptureSession {
        Self::from_config(image, display_width, display_height, CaptureConfig::default())
    }

    /// Start a session with a configuration object (missing fields use defaults).
    pub fn with_config(
        image: &JsCapturedImage,
        display_width: f64,
        display_height: f64,
        config: JsValue,
    ) -> Result<JsCaptureSession, JsValue> {
        let config: CaptureConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(image, display_width, display_height, config))
    }

    /// True once the crop has been cut.
    #[wasm_bindgen(getter)]
    pub fn is_cropped(&self) -> bool {
        self.inner.stage() == CaptureStage::Cropped
    }

    /// See `JsCropRegion::drag_changed`.
    pub fn drag_changed(&mut self, target: u8, dx: f64, dy: f64) {
        if let Some(event) = gesture_event(target, dx, dy, false) {
            self.inner.apply(event);
        }
    }

    /// See `JsCropRegion::drag_ended`.
    pub fn drag_ended(&mut self, target: u8, dx: f64, dy: f64) {
        if let Some(event) = gesture_event(target, dx, dy, true) {
            self.inner.apply(event);
        }
    }

    pub fn cancel(&mut self) {
        self.inner.apply(GestureEvent::Cancelled);
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<u8> {
        self.inner.region().hit_test(x, y).map(target_to_u8)
    }

    pub fn set_display_extent(&mut self, display_width: f64, display_height: f64) {
        self.inner
            .set_displayed_extent(Extent::new(display_width, display_height));
    }

    /// Current crop rectangle as `{ x, y, width, height }`.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.region().display_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cut the crop. Returns false and stays on the crop view on failure.
    pub fn confirm_crop(&mut self) -> bool {
        self.inner.confirm_crop()
    }

    /// Go back to the full page, keeping the rectangle.
    pub fn revert(&mut self) {
        self.inner.revert();
    }

    /// The image currently shown, upright.
    pub fn current(&self) -> Result<JsCapturedImage, JsValue> {
        self.inner
            .current()
            .to_upright()
            .map(JsCapturedImage::from_upright)
            .ok_or_else(|| JsValue::from_str("Captured image has no pixel buffer"))
    }

    /// Run `recognizer(image) -> string[]` over the upright current image.
    ///
    /// Lines are joined with single spaces. Non-string entries are skipped.
    pub fn recognize_text(&self, recognizer: &Function) -> Result<String, JsValue> {
        let recognize = |image: &DecodedImage| call_recognizer(recognizer, image);
        self.inner
            .recognize_text(&recognize)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// JPEG bytes of the upright current image.
    pub fn encode_current(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .encode_current()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsCaptureSession {
    pub(crate) fn from_config(
        image: &JsCapturedImage,
        display_width: f64,
        display_height: f64,
        config: CaptureConfig,
    ) -> Self {
        Self {
            inner: CaptureSession::new(
                image.to_captured(),
                Extent::new(display_width, display_height),
                config,
            ),
        }
    }
}

fn call_recognizer(
    recognizer: &Function,
    image: &DecodedImage,
) -> Result<Vec<String>, RecognitionError> {
    let arg = JsValue::from(JsCapturedImage::from_upright(image.clone()));
    let result = recognizer
        .call1(&JsValue::NULL, &arg)
        .map_err(|e| RecognitionError(describe(&e)))?;
    if !Array::is_array(&result) {
        return Err(RecognitionError(
            "recognizer must return an array of strings".to_string(),
        ));
    }
    Ok(Array::from(&result)
        .iter()
        .filter_map(|line| line.as_string())
        .collect())
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> JsCapturedImage {
        JsCapturedImage::new(400, 300, 1, vec![90u8; 400 * 300 * 3])
    }

    #[test]
    fn test_confirm_and_revert() {
        let mut session = JsCaptureSession::new(&page(), 400.0, 300.0);
        assert!(!session.is_cropped());

        session.drag_ended(3, 0.0, -50.0);
        assert!(session.confirm_crop());
        assert!(session.is_cropped());

        let current = session.current().unwrap();
        assert_eq!((current.width(), current.height()), (300, 150));

        session.revert();
        assert!(!session.is_cropped());
        assert_eq!(session.current().unwrap().height(), 300);
    }

    #[test]
    fn test_confirm_without_buffer() {
        let image = JsCapturedImage::new(400, 300, 1, vec![]);
        let mut session = JsCaptureSession::new(&image, 400.0, 300.0);
        assert!(!session.confirm_crop());
        assert!(!session.is_cropped());
    }

    #[test]
    fn test_hit_test_and_cancel() {
        let mut session = JsCaptureSession::new(&page(), 400.0, 300.0);
        assert_eq!(session.hit_test(200.0, 150.0), Some(8));

        session.drag_changed(8, 10.0, 10.0);
        session.cancel();
        assert_eq!(session.hit_test(55.0, 150.0), Some(0));
    }

    #[test]
    fn test_encode_current() {
        let mut session = JsCaptureSession::new(&page(), 400.0, 300.0);
        assert!(session.confirm_crop());
        let jpeg = session.encode_current().unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

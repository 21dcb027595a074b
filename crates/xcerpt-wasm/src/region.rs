//! WASM bindings for the interactive crop rectangle.
//!
//! The host view forwards pointer events and redraws from [`JsCropRegion::rect`]
//! (or the `x`/`y`/`width`/`height` getters) after every call.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const region = new JsCropRegion(page.display_width, page.display_height);
//!
//! let target: number | undefined;
//! onPointerDown = (e) => { target = region.hit_test(e.x, e.y); };
//! onPointerMove = (e) => { if (target !== undefined) region.drag_changed(target, e.dx, e.dy); };
//! onPointerUp = (e) => { if (target !== undefined) region.drag_ended(target, e.dx, e.dy); };
//! ```

use crate::types::{gesture_event, target_to_u8};
use wasm_bindgen::prelude::*;
use xcerpt_core::config::CropConfig;
use xcerpt_core::geometry::{fit_extent, CropRegion, Extent, GestureEvent};

/// Crop rectangle state for JavaScript.
#[wasm_bindgen]
pub struct JsCropRegion {
    inner: CropRegion,
}

#[wasm_bindgen]
impl JsCropRegion {
    /// Create a rectangle over an image displayed at the given extent, using
    /// the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(display_width: f64, display_height: f64) -> JsCropRegion {
        Self::from_config(display_width, display_height, CropConfig::default())
    }

    /// Create with a configuration object (missing fields use defaults).
    pub fn with_config(
        display_width: f64,
        display_height: f64,
        config: JsValue,
    ) -> Result<JsCropRegion, JsValue> {
        let config: CropConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(display_width, display_height, config))
    }

    /// Live update while a drag is in progress.
    ///
    /// `target` is a handle code (0-7) or 8 for the body; `dx`/`dy` are
    /// cumulative since the drag began.
    pub fn drag_changed(&mut self, target: u8, dx: f64, dy: f64) {
        if let Some(event) = gesture_event(target, dx, dy, false) {
            self.inner.apply(event);
        }
    }

    /// Commit a finished drag.
    pub fn drag_ended(&mut self, target: u8, dx: f64, dy: f64) {
        if let Some(event) = gesture_event(target, dx, dy, true) {
            self.inner.apply(event);
        }
    }

    /// Abandon the drag in progress.
    pub fn cancel(&mut self) {
        self.inner.apply(GestureEvent::Cancelled);
    }

    /// Drag target code under a point, or undefined.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<u8> {
        self.inner.hit_test(x, y).map(target_to_u8)
    }

    /// True while any live offset is non-zero.
    pub fn is_gesture_active(&self) -> bool {
        self.inner.is_gesture_active()
    }

    /// Update the displayed image extent after a layout change.
    pub fn set_display_extent(&mut self, display_width: f64, display_height: f64) {
        self.inner
            .set_extent(Extent::new(display_width, display_height));
    }

    /// Drop all offsets and recenter at the default size.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.display_rect().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.display_rect().y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height()
    }

    /// Current rectangle as `{ x, y, width, height }`.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.display_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Full state (configuration, extent, offsets) for debugging or storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsCropRegion {
    pub(crate) fn from_config(display_width: f64, display_height: f64, config: CropConfig) -> Self {
        Self {
            inner: CropRegion::new(Extent::new(display_width, display_height), config),
        }
    }

    pub(crate) fn inner(&self) -> &CropRegion {
        &self.inner
    }
}

/// Aspect-fit size of an image inside a container, as `[width, height]`.
#[wasm_bindgen]
pub fn fit_display_extent(
    image_width: u32,
    image_height: u32,
    container_width: f64,
    container_height: f64,
) -> Vec<f64> {
    let fitted = fit_extent(
        image_width,
        image_height,
        Extent::new(container_width, container_height),
    );
    vec![fitted.width, fitted.height]
}

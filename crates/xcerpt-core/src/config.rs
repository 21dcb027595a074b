//! Tunable constants for the crop overlay and capture pipeline.
//!
//! Both structs are plain data with serde support so the host can keep them
//! alongside its own preferences. Nothing here is global; every consumer
//! receives its configuration by value.

use serde::{Deserialize, Serialize};

/// Geometry settings for the interactive crop rectangle.
///
/// All values are in view-space points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Width of the rectangle when the crop view first appears.
    pub default_width: f64,
    /// Height of the rectangle when the crop view first appears.
    pub default_height: f64,
    /// The rectangle is never narrower than this.
    pub min_width: f64,
    /// The rectangle is never shorter than this.
    pub min_height: f64,
    /// Thickness of the drawn border around the rectangle.
    pub border_width: f64,
    /// Radius of the corner handles, also used as the edge grab tolerance.
    pub handle_radius: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            default_width: 300.0,
            default_height: 200.0,
            min_width: 20.0,
            min_height: 20.0,
            border_width: 3.0,
            handle_radius: 12.0,
        }
    }
}

impl CropConfig {
    /// Create a new CropConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting extent, never smaller than the minimum.
    pub fn initial_extent(&self) -> (f64, f64) {
        (
            self.default_width.max(self.min_width),
            self.default_height.max(self.min_height),
        )
    }
}

/// Settings for the camera-to-excerpt pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Crop overlay geometry.
    pub crop: CropConfig,
    /// JPEG quality (1-100) used when a crop is encoded for a recognizer.
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            crop: CropConfig::default(),
            jpeg_quality: 90,
        }
    }
}

//! Xcerpt WASM - WebAssembly bindings for Xcerpt
//!
//! This crate exposes the xcerpt-core crop rectangle, image cropping and
//! excerpt catalog to a JavaScript/TypeScript host view.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for captured pages and gesture codes
//! - `decode` - Camera JPEG decoding
//! - `encode` - JPEG encoding of upright crops
//! - `region` - Interactive crop rectangle
//! - `transform` - Cropping a page to a region
//! - `session` - Camera-to-excerpt capture flow
//! - `catalog` - Books and excerpts
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_capture, JsCaptureSession } from '@xcerpt/wasm';
//!
//! await init();
//!
//! const page = decode_capture(new Uint8Array(await photo.arrayBuffer()));
//! const session = new JsCaptureSession(page, viewWidth, viewHeight);
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod console;
mod decode;
mod encode;
mod region;
mod session;
mod transform;
mod types;

// Re-export public types
pub use catalog::JsLibrary;
pub use decode::{decode_capture, decode_jpeg, get_orientation};
pub use encode::{encode_jpeg, encode_upright_jpeg};
pub use region::{fit_display_extent, JsCropRegion};
pub use session::JsCaptureSession;
pub use transform::{crop_or_original, crop_to_rect, crop_to_region};
pub use types::JsCapturedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    console::init(level);
}

/// Change how much the core logs to the browser console.
///
/// 0 = off, 1 = error, 2 = warn, 3 = info, 4 = debug, 5+ = trace.
#[wasm_bindgen]
pub fn set_log_level(level: u8) {
    log::set_max_level(level_filter_from_u8(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn level_filter_from_u8(level: u8) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_level_filter_from_u8() {
        assert_eq!(level_filter_from_u8(0), log::LevelFilter::Off);
        assert_eq!(level_filter_from_u8(2), log::LevelFilter::Warn);
        assert_eq!(level_filter_from_u8(4), log::LevelFilter::Debug);
        assert_eq!(level_filter_from_u8(200), log::LevelFilter::Trace);
    }
}

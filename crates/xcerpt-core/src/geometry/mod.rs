//! Interactive crop rectangle over a displayed image.
//!
//! This module tracks a resizable, draggable rectangle in view space and
//! exposes its bounds so [`crate::transform`] can crop the source image.
//!
//! # Coordinate System
//!
//! - View-space points, origin at the top-left of the displayed image
//! - The rectangle starts centered at its default extent
//! - Pointer translations are cumulative since the drag began
//!
//! # Gesture Flow
//!
//! 1. The host hit-tests a pointer-down with [`CropRegion::hit_test`]
//! 2. Each pointer move is applied as [`GestureEvent::Changed`]
//! 3. Pointer-up is applied as [`GestureEvent::Ended`]
//! 4. The host redraws from [`CropRegion::display_rect`] after every event

mod gesture;
mod handle;
mod region;

pub use gesture::{reduce, DragTarget, GestureEvent};
pub use handle::{Axis, Edge, Handle};
pub use region::{
    fit_extent, CenterTranslation, CropRegion, DisplayRect, EdgeOffsets, Extent,
    RectangleGeometry, Translation,
};

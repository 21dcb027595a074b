//! Gesture reducer for the crop rectangle.
//!
//! Drags arrive as a stream of [`GestureEvent`]s carrying the pointer
//! translation accumulated since the drag began. `Changed` rewrites the live
//! offsets so the rectangle follows the pointer; `Ended` folds the final
//! translation into the committed offsets and clears the live ones;
//! `Cancelled` drops the live offsets, returning to the last committed state.
//!
//! All events run on the host's UI thread. The reducer is pure: the host
//! redraws from [`CropRegion::display_rect`] after every event.

use serde::{Deserialize, Serialize};

use super::handle::Handle;
use super::region::{CropRegion, EdgeOffsets, Translation};

/// What a drag is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    /// Resize through an edge or corner.
    Handle(Handle),
    /// Translate the whole rectangle.
    Body,
}

/// One step of a drag gesture. `dx`/`dy` are cumulative since drag start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Changed { target: DragTarget, dx: f64, dy: f64 },
    Ended { target: DragTarget, dx: f64, dy: f64 },
    Cancelled,
}

/// Apply `event` to a copy of `region` and return it.
pub fn reduce(mut region: CropRegion, event: GestureEvent) -> CropRegion {
    region.apply(event);
    region
}

impl CropRegion {
    /// Apply a gesture event in place.
    ///
    /// Events with a non-finite translation are dropped so a bad pointer
    /// sample cannot poison the offsets.
    pub fn apply(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Changed { target, dx, dy } => {
                if !(dx.is_finite() && dy.is_finite()) {
                    log::warn!("Ignoring non-finite drag update ({dx}, {dy})");
                    return;
                }
                match target {
                    DragTarget::Handle(handle) => {
                        for edge in handle.edges() {
                            self.geometry.set_live(edge, edge.growth(dx, dy));
                        }
                    }
                    DragTarget::Body => self.center.set_live(dx, dy),
                }
            }
            GestureEvent::Ended { target, dx, dy } => {
                if !(dx.is_finite() && dy.is_finite()) {
                    log::warn!("Ignoring non-finite drag end ({dx}, {dy}), cancelling");
                    self.cancel();
                    return;
                }
                match target {
                    DragTarget::Handle(handle) => {
                        for edge in handle.edges() {
                            self.geometry.commit(edge, edge.growth(dx, dy));
                        }
                    }
                    DragTarget::Body => self.center.commit(dx, dy),
                }
                log::debug!(
                    "Committed {:?} drag: rect now {}x{}",
                    target,
                    self.width(),
                    self.height()
                );
            }
            GestureEvent::Cancelled => self.cancel(),
        }
    }

    fn cancel(&mut self) {
        self.geometry.live = EdgeOffsets::ZERO;
        self.center.live = Translation::ZERO;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Crop rectangle state: committed offsets plus the in-flight gesture.
//!
//! The rectangle starts centered in the displayed image at its default
//! extent. Every edge carries two offsets:
//!
//! - **committed**: accumulated from completed gestures
//! - **live**: the gesture currently in progress, zero when idle
//!
//! The visible extent along an axis is the baseline plus all four offsets on
//! that axis. The minimum extent is enforced by shrinking the live component
//! as it is written, so committed state is never rewritten to satisfy it.

use serde::{Deserialize, Serialize};

use super::handle::{Axis, Edge, Handle};
use super::DragTarget;
use crate::config::CropConfig;

/// Width and height of a view-space area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in view space, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Per-edge offsets in view-space points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeOffsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl EdgeOffsets {
    pub const ZERO: EdgeOffsets = EdgeOffsets {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Edge, value: f64) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
            Edge::Top => self.top = value,
            Edge::Bottom => self.bottom = value,
        }
    }

    /// Sum of both offsets on an axis.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left + self.right,
            Axis::Vertical => self.top + self.bottom,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Pan of the rectangle's center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

impl Translation {
    pub const ZERO: Translation = Translation { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl std::ops::Add for Translation {
    type Output = Translation;

    fn add(self, rhs: Translation) -> Translation {
        Translation::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::AddAssign for Translation {
    fn add_assign(&mut self, rhs: Translation) {
        *self = *self + rhs;
    }
}

/// Extent bookkeeping for the rectangle: baseline plus committed and live
/// edge offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleGeometry {
    pub original_width: f64,
    pub original_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub committed: EdgeOffsets,
    pub live: EdgeOffsets,
}

impl RectangleGeometry {
    pub fn new(config: &CropConfig) -> Self {
        let (original_width, original_height) = config.initial_extent();
        Self {
            original_width,
            original_height,
            min_width: config.min_width,
            min_height: config.min_height,
            committed: EdgeOffsets::ZERO,
            live: EdgeOffsets::ZERO,
        }
    }

    pub fn width(&self) -> f64 {
        self.original_width
            + self.committed.along(Axis::Horizontal)
            + self.live.along(Axis::Horizontal)
    }

    pub fn height(&self) -> f64 {
        self.original_height + self.committed.along(Axis::Vertical) + self.live.along(Axis::Vertical)
    }

    /// Width including committed offsets only.
    pub fn committed_width(&self) -> f64 {
        self.original_width + self.committed.along(Axis::Horizontal)
    }

    /// Height including committed offsets only.
    pub fn committed_height(&self) -> f64 {
        self.original_height + self.committed.along(Axis::Vertical)
    }

    fn baseline(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.original_width,
            Axis::Vertical => self.original_height,
        }
    }

    fn minimum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// Write the live offset for `edge`, shrinking it just enough that the
    /// extent on its axis lands exactly on the minimum.
    pub(crate) fn set_live(&mut self, edge: Edge, growth: f64) {
        let axis = edge.axis();
        let rest = self.baseline(axis)
            + self.committed.along(axis)
            + self.live.get(edge.opposite());
        let min = self.minimum(axis);
        let value = if rest + growth < min { min - rest } else { growth };
        self.live.set(edge, value);
    }

    /// Fold the final growth for `edge` into the committed offset under the
    /// same clamp, then clear its live offset.
    pub(crate) fn commit(&mut self, edge: Edge, growth: f64) {
        let axis = edge.axis();
        self.live.set(edge, 0.0);
        let rest = self.baseline(axis)
            + self.committed.get(edge.opposite())
            + self.live.get(edge.opposite());
        let min = self.minimum(axis);
        let candidate = self.committed.get(edge) + growth;
        let value = if rest + candidate < min { min - rest } else { candidate };
        self.committed.set(edge, value);
    }
}

/// Pan of the rectangle, split the same way as the edge offsets. Never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CenterTranslation {
    pub committed: Translation,
    pub live: Translation,
}

impl CenterTranslation {
    pub fn total(&self) -> Translation {
        self.committed + self.live
    }

    pub(crate) fn set_live(&mut self, dx: f64, dy: f64) {
        self.live = Translation::new(dx, dy);
    }

    pub(crate) fn commit(&mut self, dx: f64, dy: f64) {
        self.live = Translation::ZERO;
        self.committed += Translation::new(dx, dy);
    }
}

/// The crop rectangle laid over a displayed image.
///
/// Created when the crop view appears and dropped with it. Only gesture
/// events mutate it (see [`CropRegion::apply`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub(super) config: CropConfig,
    pub(super) extent: Extent,
    pub(super) geometry: RectangleGeometry,
    pub(super) center: CenterTranslation,
}

impl CropRegion {
    /// Create a rectangle centered in a displayed image of the given extent.
    pub fn new(extent: Extent, config: CropConfig) -> Self {
        Self {
            config,
            extent,
            geometry: RectangleGeometry::new(&config),
            center: CenterTranslation::default(),
        }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Extent of the displayed image the rectangle is drawn over.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Update the displayed extent (e.g. after a layout pass). Offsets are
    /// kept, so the rectangle stays put relative to the image center.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    pub fn geometry(&self) -> &RectangleGeometry {
        &self.geometry
    }

    pub fn center(&self) -> &CenterTranslation {
        &self.center
    }

    pub fn width(&self) -> f64 {
        self.geometry.width()
    }

    pub fn height(&self) -> f64 {
        self.geometry.height()
    }

    /// Current rectangle in view space, committed and live state combined.
    pub fn display_rect(&self) -> DisplayRect {
        let g = &self.geometry;
        let pan = self.center.total();
        let x = self.extent.width / 2.0 - g.original_width / 2.0 - g.committed.left - g.live.left
            + pan.dx;
        let y = self.extent.height / 2.0 - g.original_height / 2.0 - g.committed.top - g.live.top
            + pan.dy;
        DisplayRect::new(x, y, g.width(), g.height())
    }

    /// True while a drag has produced an uncommitted delta.
    pub fn is_gesture_active(&self) -> bool {
        !self.geometry.live.is_zero() || self.center.live != Translation::ZERO
    }

    /// Drop every offset and return to the initial centered rectangle.
    pub fn reset(&mut self) {
        *self = Self::new(self.extent, self.config);
    }

    /// Find what a pointer-down at `(px, py)` grabs.
    ///
    /// Corner handles win over edges and edges over the body. Within a class
    /// the nearest candidate is chosen, which matters once the rectangle is
    /// narrower than two handle radii.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<DragTarget> {
        let rect = self.display_rect();
        let reach = self.config.handle_radius;
        let inset = self.config.border_width / 2.0;

        // Handles sit on the border's centerline, just outside the fill.
        let left = rect.x - inset;
        let right = rect.right() + inset;
        let top = rect.y - inset;
        let bottom = rect.bottom() + inset;

        let corners = [
            (Handle::TopLeft, (px - left).hypot(py - top)),
            (Handle::TopRight, (px - right).hypot(py - top)),
            (Handle::BottomLeft, (px - left).hypot(py - bottom)),
            (Handle::BottomRight, (px - right).hypot(py - bottom)),
        ];
        if let Some(handle) = nearest_within(&corners, reach) {
            return Some(DragTarget::Handle(handle));
        }

        let within_rows = py >= rect.y && py <= rect.bottom();
        let within_cols = px >= rect.x && px <= rect.right();
        let edges = [
            (Handle::Left, within_rows.then(|| (px - left).abs())),
            (Handle::Right, within_rows.then(|| (px - right).abs())),
            (Handle::Top, within_cols.then(|| (py - top).abs())),
            (Handle::Bottom, within_cols.then(|| (py - bottom).abs())),
        ];
        let edges: Vec<(Handle, f64)> = edges
            .into_iter()
            .filter_map(|(handle, distance)| distance.map(|d| (handle, d)))
            .collect();
        if let Some(handle) = nearest_within(&edges, reach) {
            return Some(DragTarget::Handle(handle));
        }

        rect.contains(px, py).then_some(DragTarget::Body)
    }
}

fn nearest_within(candidates: &[(Handle, f64)], reach: f64) -> Option<Handle> {
    candidates
        .iter()
        .filter(|(_, distance)| *distance <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| *handle)
}

/// Aspect-fit an image of `image_width` x `image_height` pixels inside a
/// container, returning the displayed extent.
///
/// Degenerate inputs yield an empty extent.
pub fn fit_extent(image_width: u32, image_height: u32, container: Extent) -> Extent {
    if image_width == 0 || image_height == 0 || !container.is_drawable() {
        return Extent::default();
    }

    let img_w = image_width as f64;
    let img_h = image_height as f64;
    let scale = (container.width / img_w).min(container.height / img_h);
    Extent::new(img_w * scale, img_h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> CropRegion {
        CropRegion::new(Extent::new(400.0, 600.0), CropConfig::default())
    }

    #[test]
    fn test_initial_rect_is_centered() {
        let rect = region().display_rect();
        assert_eq!(rect, DisplayRect::new(50.0, 200.0, 300.0, 200.0));
    }

    #[test]
    fn test_initial_state_is_idle() {
        let r = region();
        assert!(!r.is_gesture_active());
        assert!(r.geometry().committed.is_zero());
        assert_eq!(r.center().total(), Translation::ZERO);
    }

    #[test]
    fn test_set_live_clamps_to_exact_minimum() {
        let mut g = RectangleGeometry::new(&CropConfig::default());
        // Left edge dragged 400pt to the right shrinks the rectangle.
        g.set_live(Edge::Left, -400.0);
        assert_eq!(g.live.left, -280.0);
        assert_eq!(g.width(), 20.0);
    }

    #[test]
    fn test_set_live_accounts_for_opposite_live_offset() {
        let mut g = RectangleGeometry::new(&CropConfig::default());
        g.set_live(Edge::Right, -200.0);
        g.set_live(Edge::Left, -200.0);
        assert_eq!(g.width(), 20.0);
        assert_eq!(g.live.right, -200.0);
        assert_eq!(g.live.left, -80.0);
    }

    #[test]
    fn test_set_live_never_touches_committed() {
        let mut g = RectangleGeometry::new(&CropConfig::default());
        g.commit(Edge::Top, 50.0);
        g.set_live(Edge::Top, -1000.0);
        assert_eq!(g.committed.top, 50.0);
        assert_eq!(g.height(), 20.0);
    }

    #[test]
    fn test_commit_clears_live_and_accumulates() {
        let mut g = RectangleGeometry::new(&CropConfig::default());
        g.set_live(Edge::Bottom, 30.0);
        g.commit(Edge::Bottom, 30.0);
        g.set_live(Edge::Bottom, 20.0);
        g.commit(Edge::Bottom, 20.0);
        assert_eq!(g.live.bottom, 0.0);
        assert_eq!(g.committed.bottom, 50.0);
        assert_eq!(g.height(), 250.0);
    }

    #[test]
    fn test_commit_clamps_to_minimum() {
        let mut g = RectangleGeometry::new(&CropConfig::default());
        g.commit(Edge::Right, -500.0);
        assert_eq!(g.committed.right, -280.0);
        assert_eq!(g.committed_width(), 20.0);
    }

    #[test]
    fn test_center_translation_split() {
        let mut c = CenterTranslation::default();
        c.set_live(5.0, -3.0);
        assert_eq!(c.total(), Translation::new(5.0, -3.0));
        c.commit(5.0, -3.0);
        c.set_live(1.0, 1.0);
        assert_eq!(c.committed, Translation::new(5.0, -3.0));
        assert_eq!(c.total(), Translation::new(6.0, -2.0));
    }

    #[test]
    fn test_hit_test_corners_and_edges() {
        let r = region();
        // Rect spans x 50..350, y 200..400, border inset 1.5.
        assert_eq!(
            r.hit_test(48.5, 198.5),
            Some(DragTarget::Handle(Handle::TopLeft))
        );
        assert_eq!(
            r.hit_test(351.5, 401.5),
            Some(DragTarget::Handle(Handle::BottomRight))
        );
        assert_eq!(
            r.hit_test(50.0, 300.0),
            Some(DragTarget::Handle(Handle::Left))
        );
        assert_eq!(
            r.hit_test(200.0, 405.0),
            Some(DragTarget::Handle(Handle::Bottom))
        );
    }

    #[test]
    fn test_hit_test_body_and_miss() {
        let r = region();
        assert_eq!(r.hit_test(200.0, 300.0), Some(DragTarget::Body));
        assert_eq!(r.hit_test(5.0, 5.0), None);
        assert_eq!(r.hit_test(200.0, 450.0), None);
    }

    #[test]
    fn test_reset_restores_initial_rect() {
        let mut r = region();
        r.geometry.commit(Edge::Left, 40.0);
        r.center.commit(10.0, 10.0);
        r.reset();
        assert_eq!(r, region());
    }

    #[test]
    fn test_fit_extent_landscape_in_portrait() {
        let fitted = fit_extent(4000, 3000, Extent::new(400.0, 600.0));
        assert!((fitted.width - 400.0).abs() < 1e-9);
        assert!((fitted.height - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_extent_portrait_in_portrait() {
        let fitted = fit_extent(3000, 4000, Extent::new(390.0, 844.0));
        assert!((fitted.width - 390.0).abs() < 1e-9);
        assert!((fitted.height - 520.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_extent_degenerate() {
        assert_eq!(fit_extent(0, 10, Extent::new(10.0, 10.0)), Extent::default());
        assert_eq!(fit_extent(10, 10, Extent::new(0.0, 10.0)), Extent::default());
    }
}

//! Handle identities on the crop rectangle.

use serde::{Deserialize, Serialize};

/// Which way an edge moves the rectangle's extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One side of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Horizontal,
            Edge::Top | Edge::Bottom => Axis::Vertical,
        }
    }

    /// The edge sharing this edge's axis.
    #[inline]
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Growth of the rectangle produced by a pointer translation.
    ///
    /// Dragging the right edge rightward grows the width, dragging the left
    /// edge leftward grows it, so the leading edges (left, top) negate the raw
    /// pointer delta on their axis.
    #[inline]
    pub fn growth(self, dx: f64, dy: f64) -> f64 {
        match self {
            Edge::Left => -dx,
            Edge::Right => dx,
            Edge::Top => -dy,
            Edge::Bottom => dy,
        }
    }
}

/// A draggable part of the crop rectangle.
///
/// Corner handles move two edges at once, one per axis. The two components
/// are recognized simultaneously and never influence each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Left,
        Handle::Right,
        Handle::Top,
        Handle::Bottom,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Edge moved along the horizontal axis, if any.
    pub fn horizontal_edge(self) -> Option<Edge> {
        match self {
            Handle::Left | Handle::TopLeft | Handle::BottomLeft => Some(Edge::Left),
            Handle::Right | Handle::TopRight | Handle::BottomRight => Some(Edge::Right),
            Handle::Top | Handle::Bottom => None,
        }
    }

    /// Edge moved along the vertical axis, if any.
    pub fn vertical_edge(self) -> Option<Edge> {
        match self {
            Handle::Top | Handle::TopLeft | Handle::TopRight => Some(Edge::Top),
            Handle::Bottom | Handle::BottomLeft | Handle::BottomRight => Some(Edge::Bottom),
            Handle::Left | Handle::Right => None,
        }
    }

    /// All edges this handle moves.
    pub fn edges(self) -> impl Iterator<Item = Edge> {
        self.horizontal_edge().into_iter().chain(self.vertical_edge())
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        self.horizontal_edge().is_some() && self.vertical_edge().is_some()
    }
}

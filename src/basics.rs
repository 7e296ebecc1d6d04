//! Foundation types for banded regions: integer boxes, points, and the
//! polygon filling rule.
//!
//! Everything in this crate measures in `i32` device coordinates. Boxes are
//! half-open: `[x1, x2) x [y1, y2)`, so a box covers pixel columns
//! `x1..x2-1` and rows `y1..y2-1`, and two boxes that merely touch share no
//! pixels.

// ============================================================================
// BoxI — half-open axis-aligned box
// ============================================================================

/// An axis-aligned half-open box `[x1, x2) x [y1, y2)`.
///
/// A box is *degenerate* (covers nothing) when `x1 >= x2` or `y1 >= y2`.
/// Degenerate boxes are never stored inside a [`Region`](crate::region::Region);
/// the all-zero box doubles as the extents of the empty region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoxI {
    /// The zero box: empty, and the canonical extents of an empty region.
    pub const ZERO: BoxI = BoxI {
        x1: 0,
        y1: 0,
        x2: 0,
        y2: 0,
    };

    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the box covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Returns `true` if the point `(x, y)` lies inside the box.
    /// Half-open: the right and bottom edges are outside.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Returns `true` if `other` lies entirely inside this box.
    #[inline]
    pub fn contains(&self, other: &BoxI) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Returns `true` if the two boxes share at least one pixel.
    #[inline]
    pub fn overlaps(&self, other: &BoxI) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Shift the box by `(dx, dy)`.
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }
}

// ============================================================================
// PointI — integer point
// ============================================================================

/// A 2D point in device coordinates. Polygon vertices are points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

impl PointI {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Filling rule
// ============================================================================

/// Filling rule for polygon scan conversion.
///
/// `EvenOdd` toggles inside/outside at every edge crossing; `NonZero`
/// considers a span inside while the signed winding count of the edges to
/// its left is non-zero. The two differ only for self-intersecting or
/// self-overlapping polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}

// ============================================================================
// RectOverlap — result of a rectangle-vs-region query
// ============================================================================

/// Classification of a rectangle against a region:
/// fully outside, fully inside, or partially covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectOverlap {
    Out,
    In,
    Part,
}

// ============================================================================
// Tests
// ============================================================================

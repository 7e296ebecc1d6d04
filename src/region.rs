//! The banded region type: an arbitrary 2D area stored as a minimal set of
//! non-overlapping rectangles.
//!
//! A `Region` keeps its boxes in *Y-X banded* canonical form:
//!
//! - Boxes are sorted by `y1`, then by `x1`.
//! - Boxes are partitioned into maximal horizontal bands; every box in a
//!   band has the same `y1` and `y2`.
//! - Within a band, boxes are strictly separated (`box[i].x2 < box[i+1].x1`);
//!   touching boxes are merged into one wider box by construction.
//! - Two vertically adjacent bands never have identical X structure; such
//!   bands are coalesced into one taller band.
//!
//! Canonical form is unique for a given point set, which is what makes the
//! structural `PartialEq` below a true set-equality test. The boolean
//! operators that produce regions live in [`crate::region_op`]; polygon
//! scan conversion lives in [`crate::poly_region`].

use crate::basics::{BoxI, FillingRule, PointI, RectOverlap};
use crate::poly_region;

// ============================================================================
// Region
// ============================================================================

/// A 2D point set represented as a sorted, Y-X banded list of half-open
/// boxes plus a cached tight bounding box.
#[derive(Debug, Clone)]
pub struct Region {
    boxes: Vec<BoxI>,
    extents: BoxI,
}

impl Region {
    /// Create an empty region with a single slot of backing capacity.
    pub fn new() -> Self {
        Self {
            boxes: Vec::with_capacity(1),
            extents: BoxI::ZERO,
        }
    }

    /// Create a region covering a single box. A degenerate box yields the
    /// empty region.
    pub fn from_box(b: BoxI) -> Self {
        if b.is_empty() {
            return Self::new();
        }
        Self {
            boxes: vec![b],
            extents: b,
        }
    }

    /// Scan-convert a polygon into a region. See [`poly_region::polygon_region`].
    pub fn from_polygon(pts: &[PointI], rule: FillingRule) -> Self {
        poly_region::polygon_region(pts, rule)
    }

    /// Internal constructor for the sweep machinery: takes a box list that
    /// is already in canonical form and computes its extents.
    pub(crate) fn from_canonical_boxes(boxes: Vec<BoxI>) -> Self {
        let mut r = Self {
            boxes,
            extents: BoxI::ZERO,
        };
        r.recompute_extents();
        r
    }

    /// Internal constructor for operators that can derive the extents from
    /// their inputs (union) instead of scanning the result.
    pub(crate) fn from_boxes_with_extents(boxes: Vec<BoxI>, extents: BoxI) -> Self {
        if boxes.is_empty() {
            return Self::new();
        }
        Self { boxes, extents }
    }

    pub(crate) fn boxes(&self) -> &[BoxI] {
        &self.boxes
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns `true` if the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Number of boxes in the canonical representation.
    #[inline]
    pub fn num_rects(&self) -> usize {
        self.boxes.len()
    }

    /// Read-only view of the boxes in storage (Y-X band) order.
    #[inline]
    pub fn rects(&self) -> &[BoxI] {
        &self.boxes
    }

    /// The cached tight bounding box, or the zero box for an empty region.
    /// This is the clip box a compositor starts from.
    #[inline]
    pub fn extents(&self) -> BoxI {
        self.extents
    }

    /// Reset to the empty region, keeping the backing allocation.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.extents = BoxI::ZERO;
    }

    // ========================================================================
    // Geometry queries
    // ========================================================================

    /// Returns `true` if the point `(x, y)` lies inside the region.
    ///
    /// Rejects against the extents first, then walks the band-ordered box
    /// list. Bands are maximal, so at most one band can contain `y`; once a
    /// band starting below `y` is reached the point was missed.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        if self.boxes.is_empty() || !self.extents.contains_point(x, y) {
            return false;
        }
        for b in &self.boxes {
            if y >= b.y2 {
                continue; // not down to the right band yet
            }
            if y < b.y1 {
                break; // past it: no band contains y
            }
            if x >= b.x2 {
                continue; // not far enough over yet
            }
            if x < b.x1 {
                break; // boxes in a band are X-sorted: missed
            }
            return true;
        }
        false
    }

    /// Classify `rect` against the region: fully inside, fully outside, or
    /// partially covered.
    ///
    /// Walks the boxes in band order with a moving cursor `(x, y)` marking
    /// the first not-yet-accounted-for point of `rect`, tracking whether any
    /// part of `rect` has been found covered (`part_in`) and whether any
    /// part has been found uncovered (`part_out`). Short-circuits as soon as
    /// both are known.
    pub fn rect_in(&self, rect: &BoxI) -> RectOverlap {
        if self.boxes.is_empty() || !self.extents.overlaps(rect) {
            return RectOverlap::Out;
        }

        if self.boxes.len() == 1 {
            // One box: it either subsumes the rectangle or splits it.
            return if self.extents.contains(rect) {
                RectOverlap::In
            } else {
                RectOverlap::Part
            };
        }

        let mut part_in = false;
        let mut part_out = false;
        let mut x = rect.x1;
        let mut y = rect.y1;

        for b in &self.boxes {
            if b.y2 <= y {
                continue; // band is above the cursor
            }

            if b.y1 > y {
                part_out = true; // rows [y, b.y1) of the rectangle are uncovered
                if part_in || b.y1 >= rect.y2 {
                    break;
                }
                y = b.y1; // cursor x is still rect.x1 at a fresh band
            }

            if b.x2 <= x {
                continue; // box is left of the cursor
            }

            if b.x1 > x {
                part_out = true; // a gap inside the band
                if part_in {
                    break;
                }
            }

            if b.x1 < rect.x2 {
                part_in = true;
                if part_out {
                    break;
                }
            }

            if b.x2 >= rect.x2 {
                // This band covers the rectangle out to its right edge.
                y = b.y2;
                if y >= rect.y2 {
                    break;
                }
                x = rect.x1;
            } else {
                // Boxes in a band are maximal in width, so if the first
                // overlapping box doesn't reach the rectangle's right edge
                // some of this band is uncovered.
                break;
            }
        }

        if part_in {
            if y < rect.y2 {
                RectOverlap::Part
            } else {
                RectOverlap::In
            }
        } else {
            RectOverlap::Out
        }
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Shift the whole region by `(dx, dy)`.
    ///
    /// A translation preserves banding, separation, and coalescing, so this
    /// is a plain O(n) shift of every box and the extents.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if self.boxes.is_empty() {
            return;
        }
        for b in &mut self.boxes {
            b.translate(dx, dy);
        }
        self.extents.translate(dx, dy);
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Recompute the extents from the stored boxes.
    ///
    /// Bands are sorted and vertically disjoint, so the first box gives
    /// `y1` and the last gives `y2`; only the X bounds need a full scan.
    pub(crate) fn recompute_extents(&mut self) {
        match (self.boxes.first(), self.boxes.last()) {
            (Some(first), Some(last)) => {
                let mut ext = BoxI::new(first.x1, first.y1, first.x2, last.y2);
                for b in &self.boxes {
                    if b.x1 < ext.x1 {
                        ext.x1 = b.x1;
                    }
                    if b.x2 > ext.x2 {
                        ext.x2 = b.x2;
                    }
                }
                self.extents = ext;
            }
            _ => self.extents = BoxI::ZERO,
        }
    }

    /// Verify canonical form. Intended as a debugging aid; every public
    /// operation must leave the region in a state where this returns `true`.
    ///
    /// Checks, in order: no degenerate boxes, Y-X sort order, uniform
    /// `y1`/`y2` within each band, strict X separation within a band,
    /// vertically disjoint bands, no pair of adjacent bands that should have
    /// been coalesced, and tight extents.
    pub fn selfcheck(&self) -> bool {
        if self.boxes.is_empty() {
            return self.extents == BoxI::ZERO;
        }

        for b in &self.boxes {
            if b.is_empty() {
                return false;
            }
        }

        // Collect band boundaries as (start_index, end_index) pairs.
        let mut bands: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for i in 1..self.boxes.len() {
            if self.boxes[i].y1 != self.boxes[start].y1 {
                bands.push((start, i));
                start = i;
            }
        }
        bands.push((start, self.boxes.len()));

        for &(s, e) in &bands {
            let band = &self.boxes[s..e];
            for pair in band.windows(2) {
                if pair[0].y2 != pair[1].y2 || pair[0].y1 != pair[1].y1 {
                    return false; // mixed Y extents within one band
                }
                if pair[0].x2 >= pair[1].x1 {
                    return false; // overlap or touch within a band
                }
            }
        }

        for w in bands.windows(2) {
            let (ps, pe) = w[0];
            let (cs, ce) = w[1];
            let prev = &self.boxes[ps..pe];
            let cur = &self.boxes[cs..ce];
            if cur[0].y1 < prev[0].y2 {
                return false; // bands overlap vertically
            }
            if cur[0].y1 == prev[0].y2 && prev.len() == cur.len() {
                // Identical X structure here means the bands should have
                // been merged into one.
                let mergeable = prev
                    .iter()
                    .zip(cur.iter())
                    .all(|(a, b)| a.x1 == b.x1 && a.x2 == b.x2);
                if mergeable {
                    return false;
                }
            }
        }

        let mut tight = self.clone();
        tight.recompute_extents();
        tight.extents == self.extents
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality over the canonical representation. Because canonical
/// form is unique for a point set, this is exact set equality no matter
/// which operation sequences produced the two regions.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        if self.boxes.len() != other.boxes.len() {
            return false;
        }
        if self.boxes.is_empty() {
            return true;
        }
        if self.extents != other.extents {
            return false;
        }
        self.boxes == other.boxes
    }
}

impl Eq for Region {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let r = Region::new();
        assert!(r.is_empty());
        assert_eq!(r.num_rects(), 0);
        assert_eq!(r.extents(), BoxI::ZERO);
        assert!(r.selfcheck());
    }

    #[test]
    fn test_from_box() {
        let r = Region::from_box(BoxI::new(1, 2, 11, 12));
        assert_eq!(r.num_rects(), 1);
        assert_eq!(r.extents(), BoxI::new(1, 2, 11, 12));
        assert!(r.selfcheck());
    }

    #[test]
    fn test_from_degenerate_box_is_empty() {
        assert!(Region::from_box(BoxI::new(5, 5, 5, 10)).is_empty());
        assert!(Region::from_box(BoxI::new(5, 10, 10, 10)).is_empty());
        assert!(Region::from_box(BoxI::new(10, 0, 5, 5)).is_empty());
    }

    #[test]
    fn test_contains_point() {
        let r = Region::from_box(BoxI::new(0, 0, 10, 10));
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(9, 9));
        assert!(!r.contains_point(10, 10));
        assert!(!r.contains_point(-1, 0));
        assert!(!Region::new().contains_point(0, 0));
    }

    #[test]
    fn test_contains_point_multi_band() {
        // Two bands: a wide top band and a narrower bottom band.
        let r = Region::from_canonical_boxes(vec![
            BoxI::new(0, 0, 20, 5),
            BoxI::new(5, 5, 10, 10),
        ]);
        assert!(r.selfcheck());
        assert!(r.contains_point(15, 2));
        assert!(r.contains_point(7, 7));
        assert!(!r.contains_point(15, 7));
        assert!(!r.contains_point(2, 7));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut r = Region::from_canonical_boxes(vec![
            BoxI::new(0, 0, 20, 5),
            BoxI::new(5, 5, 10, 10),
        ]);
        let orig = r.clone();
        r.translate(13, -7);
        assert!(r.selfcheck());
        assert!(r.contains_point(13, -7));
        assert_ne!(r, orig);
        r.translate(-13, 7);
        assert_eq!(r, orig);
    }

    #[test]
    fn test_translate_empty_keeps_zero_extents() {
        let mut r = Region::new();
        r.translate(100, 100);
        assert_eq!(r.extents(), BoxI::ZERO);
    }

    #[test]
    fn test_rect_in_out_via_extents() {
        let r = Region::from_box(BoxI::new(0, 0, 10, 10));
        // Disjoint from the extents: answered without scanning boxes.
        assert_eq!(r.rect_in(&BoxI::new(20, 20, 30, 30)), RectOverlap::Out);
        assert_eq!(Region::new().rect_in(&BoxI::new(0, 0, 1, 1)), RectOverlap::Out);
    }

    #[test]
    fn test_rect_in_exact_box() {
        let r = Region::from_canonical_boxes(vec![
            BoxI::new(0, 0, 10, 10),
            BoxI::new(20, 0, 30, 10),
        ]);
        assert!(r.selfcheck());
        // A rectangle exactly equal to one stored box is fully inside.
        assert_eq!(r.rect_in(&BoxI::new(0, 0, 10, 10)), RectOverlap::In);
        assert_eq!(r.rect_in(&BoxI::new(20, 0, 30, 10)), RectOverlap::In);
        // Straddling the gap between them is partial.
        assert_eq!(r.rect_in(&BoxI::new(5, 0, 25, 10)), RectOverlap::Part);
        // Entirely inside the gap (but inside the extents) is out.
        assert_eq!(r.rect_in(&BoxI::new(12, 2, 18, 8)), RectOverlap::Out);
    }

    #[test]
    fn test_rect_in_straddles_boundary() {
        let r = Region::from_box(BoxI::new(0, 0, 10, 10));
        assert_eq!(r.rect_in(&BoxI::new(5, 5, 15, 15)), RectOverlap::Part);
    }

    #[test]
    fn test_rect_in_across_bands() {
        // Two stacked bands of different widths (equal widths would have
        // coalesced into one band).
        let r = Region::from_canonical_boxes(vec![
            BoxI::new(0, 0, 12, 5),
            BoxI::new(0, 5, 10, 12),
        ]);
        assert!(r.selfcheck());
        assert_eq!(r.rect_in(&BoxI::new(2, 2, 8, 10)), RectOverlap::In);
        assert_eq!(r.rect_in(&BoxI::new(2, 2, 11, 10)), RectOverlap::Part);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Region::from_box(BoxI::new(0, 0, 10, 10));
        let b = Region::from_box(BoxI::new(0, 0, 10, 10));
        assert_eq!(a, b);
        let c = Region::from_box(BoxI::new(0, 0, 10, 11));
        assert_ne!(a, c);
        assert_eq!(Region::new(), Region::new());
    }

    #[test]
    fn test_clear() {
        let mut r = Region::from_box(BoxI::new(0, 0, 10, 10));
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.extents(), BoxI::ZERO);
        assert!(r.selfcheck());
    }

    #[test]
    fn test_selfcheck_rejects_bad_structure() {
        // Degenerate box.
        let r = Region {
            boxes: vec![BoxI::new(0, 0, 0, 10)],
            extents: BoxI::new(0, 0, 0, 10),
        };
        assert!(!r.selfcheck());

        // Touching boxes in one band must have been merged.
        let r = Region {
            boxes: vec![BoxI::new(0, 0, 5, 10), BoxI::new(5, 0, 10, 10)],
            extents: BoxI::new(0, 0, 10, 10),
        };
        assert!(!r.selfcheck());

        // Adjacent bands with identical X structure must have coalesced.
        let r = Region {
            boxes: vec![BoxI::new(0, 0, 10, 5), BoxI::new(0, 5, 10, 10)],
            extents: BoxI::new(0, 0, 10, 10),
        };
        assert!(!r.selfcheck());

        // Stale extents.
        let r = Region {
            boxes: vec![BoxI::new(0, 0, 10, 10)],
            extents: BoxI::new(0, 0, 11, 10),
        };
        assert!(!r.selfcheck());
    }
}

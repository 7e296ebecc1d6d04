//! Polygon to region scan conversion.
//!
//! Converts an arbitrary closed polygon — concave and self-intersecting
//! included — into a canonical banded [`Region`] by sweeping scanlines over
//! an edge table. Per scanline the sweep keeps the X-sorted active edge
//! list, emits the crossings selected by the fill rule, steps every edge's
//! Bresenham state, and drops edges whose range has ended. Emitted
//! crossings pair up into spans; the packer folds runs of identical
//! scanlines into taller bands so a straight-sided polygon doesn't cost one
//! box per scanline.

use crate::basics::{BoxI, FillingRule, PointI};
use crate::edge_table::{compute_waet, insertion_sort, load_aet, EdgeTable};
use crate::region::Region;

// ============================================================================
// Entry point
// ============================================================================

/// Scan-convert a closed polygon into a region.
///
/// Fewer than three points can enclose nothing and yield the empty region.
/// An axis-aligned rectangle (4 points, or 5 with the last repeating the
/// first) skips the sweep entirely — rectangles dominate real clip setup,
/// so this path is load-bearing, not a nicety.
pub fn polygon_region(pts: &[PointI], rule: FillingRule) -> Region {
    if pts.len() < 3 {
        return Region::new();
    }
    if let Some(b) = as_rectangle(pts) {
        return Region::from_box(b);
    }

    let mut et = EdgeTable::build(pts);
    if et.edges.is_empty() {
        return Region::new();
    }

    let mut aet: Vec<u32> = Vec::new();
    let mut packer = SpanPacker::new();
    let mut next_bucket = 0;
    let mut xs: Vec<i32> = Vec::new();

    for y in et.ymin..et.ymax {
        if next_bucket < et.buckets.len() && et.buckets[next_bucket].scanline == y {
            load_aet(&mut aet, &et.edges, &et.buckets[next_bucket].edges);
            next_bucket += 1;
            if rule == FillingRule::NonZero {
                compute_waet(&aet, &mut et.edges);
            }
        }

        // Emit this scanline's crossings, then step or retire each edge.
        xs.clear();
        let mut edge_dropped = false;
        let mut k = 0;
        while k < aet.len() {
            let idx = aet[k] as usize;
            let emit = match rule {
                FillingRule::EvenOdd => true,
                FillingRule::NonZero => et.edges[idx].wete,
            };
            if emit {
                xs.push(et.edges[idx].bres.minor_axis);
            }
            if et.edges[idx].ymax == y {
                aet.remove(k);
                edge_dropped = true;
            } else {
                et.edges[idx].bres.step();
                k += 1;
            }
        }

        packer.push_scanline(y, &xs);

        // Stepping can swap neighbors; the list is nearly sorted, so this
        // is cheap. The winding marks depend on AET order and membership,
        // so rebuild them whenever either changed.
        let order_changed = insertion_sort(&mut aet, &et.edges);
        if rule == FillingRule::NonZero && (order_changed || edge_dropped) {
            compute_waet(&aet, &mut et.edges);
        }
    }

    packer.into_region()
}

// ============================================================================
// Rectangle fast path
// ============================================================================

/// Recognize an axis-aligned rectangle given as 4 points, or 5 with the
/// last closing onto the first. Either edge orientation (starting
/// horizontal or starting vertical) qualifies. Returns the bounding box,
/// which may be degenerate — the caller's `from_box` maps that to empty.
fn as_rectangle(pts: &[PointI]) -> Option<BoxI> {
    let quad: &[PointI] = match pts.len() {
        4 => pts,
        5 if pts[4] == pts[0] => &pts[..4],
        _ => return None,
    };
    let aligned = (quad[0].y == quad[1].y
        && quad[1].x == quad[2].x
        && quad[2].y == quad[3].y
        && quad[3].x == quad[0].x)
        || (quad[0].x == quad[1].x
            && quad[1].y == quad[2].y
            && quad[2].x == quad[3].x
            && quad[3].y == quad[0].y);
    if !aligned {
        return None;
    }
    // Corners 0 and 2 are always diagonally opposite.
    Some(BoxI::new(
        quad[0].x.min(quad[2].x),
        quad[0].y.min(quad[2].y),
        quad[0].x.max(quad[2].x),
        quad[0].y.max(quad[2].y),
    ))
}

// ============================================================================
// Span packing
// ============================================================================

/// Packs per-scanline crossing pairs into a canonical banded box list.
///
/// Crossings arrive X-sorted; consecutive pairs become spans. Zero-width
/// spans are dropped and touching spans merged, so each scanline's band is
/// canonical on its own. When a scanline's span list exactly matches the
/// band directly above it, the band is extended downward instead of
/// duplicated.
struct SpanPacker {
    boxes: Vec<BoxI>,
    band_start: usize,
    spans: Vec<(i32, i32)>,
}

impl SpanPacker {
    fn new() -> Self {
        Self {
            boxes: Vec::new(),
            band_start: 0,
            spans: Vec::new(),
        }
    }

    fn push_scanline(&mut self, y: i32, xs: &[i32]) {
        self.spans.clear();
        for pair in xs.chunks_exact(2) {
            let (x1, x2) = (pair[0], pair[1]);
            if x1 >= x2 {
                continue;
            }
            if let Some(last) = self.spans.last_mut() {
                if last.1 >= x1 {
                    if last.1 < x2 {
                        last.1 = x2;
                    }
                    continue;
                }
            }
            self.spans.push((x1, x2));
        }
        if self.spans.is_empty() {
            return;
        }

        if !self.boxes.is_empty() {
            let band = &self.boxes[self.band_start..];
            if band[0].y2 == y
                && band.len() == self.spans.len()
                && band
                    .iter()
                    .zip(&self.spans)
                    .all(|(b, s)| b.x1 == s.0 && b.x2 == s.1)
            {
                for b in &mut self.boxes[self.band_start..] {
                    b.y2 = y + 1;
                }
                return;
            }
        }

        self.band_start = self.boxes.len();
        for &(x1, x2) in &self.spans {
            self.boxes.push(BoxI::new(x1, y, x2, y + 1));
        }
    }

    fn into_region(self) -> Region {
        Region::from_canonical_boxes(self.boxes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<PointI> {
        coords.iter().map(|&(x, y)| PointI::new(x, y)).collect()
    }

    #[test]
    fn test_rectangle_equals_single_box() {
        let r = polygon_region(
            &pts(&[(0, 0), (10, 0), (10, 5), (0, 5)]),
            FillingRule::EvenOdd,
        );
        assert!(r.selfcheck());
        assert_eq!(r.rects(), &[BoxI::new(0, 0, 10, 5)]);
    }

    #[test]
    fn test_rectangle_fast_path_variants() {
        let expect = Region::from_box(BoxI::new(0, 0, 10, 5));
        // Closed with a repeated first point.
        let r = polygon_region(
            &pts(&[(0, 0), (10, 0), (10, 5), (0, 5), (0, 0)]),
            FillingRule::EvenOdd,
        );
        assert_eq!(r, expect);
        // Starting along a vertical edge.
        let r = polygon_region(
            &pts(&[(0, 0), (0, 5), (10, 5), (10, 0)]),
            FillingRule::NonZero,
        );
        assert_eq!(r, expect);
        // Reverse winding changes nothing for a plain rectangle.
        let r = polygon_region(
            &pts(&[(0, 5), (10, 5), (10, 0), (0, 0)]),
            FillingRule::EvenOdd,
        );
        assert_eq!(r, expect);
    }

    #[test]
    fn test_degenerate_rectangle_is_empty() {
        let r = polygon_region(
            &pts(&[(3, 3), (3, 3), (3, 9), (3, 9)]),
            FillingRule::EvenOdd,
        );
        assert!(r.is_empty());
    }

    #[test]
    fn test_too_few_points_is_empty() {
        assert!(polygon_region(&[], FillingRule::EvenOdd).is_empty());
        assert!(polygon_region(&pts(&[(1, 1)]), FillingRule::EvenOdd).is_empty());
        assert!(polygon_region(&pts(&[(1, 1), (9, 9)]), FillingRule::NonZero).is_empty());
    }

    #[test]
    fn test_collinear_rectangle_takes_general_path() {
        // Six points describing a rectangle with split horizontal edges:
        // not the fast-path shape, but the sweep plus band coalescing must
        // still produce the single box.
        let r = polygon_region(
            &pts(&[(0, 0), (5, 0), (10, 0), (10, 5), (5, 5), (0, 5)]),
            FillingRule::EvenOdd,
        );
        assert!(r.selfcheck());
        assert_eq!(r.rects(), &[BoxI::new(0, 0, 10, 5)]);
    }

    #[test]
    fn test_right_triangle() {
        let r = polygon_region(
            &pts(&[(0, 0), (10, 0), (0, 10)]),
            FillingRule::EvenOdd,
        );
        assert!(r.selfcheck());
        // The hypotenuse retreats one column per row: ten one-row bands.
        assert_eq!(r.num_rects(), 10);
        assert_eq!(r.extents(), BoxI::new(0, 0, 10, 10));
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(0, 9));
        assert!(r.contains_point(4, 5));
        assert!(!r.contains_point(6, 5));
        assert!(!r.contains_point(9, 9));
    }

    #[test]
    fn test_l_shape_equals_box_union() {
        let r = polygon_region(
            &pts(&[(0, 0), (10, 0), (10, 20), (5, 20), (5, 10), (0, 10)]),
            FillingRule::EvenOdd,
        );
        assert!(r.selfcheck());
        let expect = Region::from_box(BoxI::new(0, 0, 10, 10))
            .union(&Region::from_box(BoxI::new(5, 10, 10, 20)));
        assert_eq!(r, expect);
    }

    #[test]
    fn test_bowtie_rules_agree() {
        // A bowtie's lobes carry winding ±1, so both rules fill exactly the
        // two triangles meeting at the pinch.
        let bowtie = pts(&[(0, 0), (10, 0), (0, 10), (10, 10)]);
        let eo = polygon_region(&bowtie, FillingRule::EvenOdd);
        let nz = polygon_region(&bowtie, FillingRule::NonZero);
        assert!(eo.selfcheck());
        assert_eq!(eo, nz);
        assert!(eo.contains_point(5, 1));
        assert!(eo.contains_point(5, 8));
        assert!(!eo.contains_point(0, 5)); // pinch row is empty
        assert!(!eo.contains_point(9, 5));
    }

    #[test]
    fn test_figure_eight_fill_rule_divergence() {
        // Two overlapping squares traversed in the same rotational
        // direction as one closed polyline; the connector segment is walked
        // out and back, so it cancels itself under both rules. The overlap
        // carries winding 2: included by non-zero, a hole under even-odd.
        let eight = pts(&[
            (0, 0),
            (20, 0),
            (20, 20),
            (0, 20),
            (0, 0),
            (10, 10),
            (30, 10),
            (30, 30),
            (10, 30),
            (10, 10),
        ]);
        let eo = polygon_region(&eight, FillingRule::EvenOdd);
        let nz = polygon_region(&eight, FillingRule::NonZero);
        assert!(eo.selfcheck());
        assert!(nz.selfcheck());
        assert!(!eo.is_empty());
        assert!(!nz.is_empty());
        assert_ne!(eo, nz);

        // The overlap lobe is exactly where they differ.
        assert!(!eo.contains_point(15, 15));
        assert!(nz.contains_point(15, 15));
        assert!(eo.contains_point(5, 5));
        assert!(nz.contains_point(5, 5));
        assert!(eo.contains_point(25, 25));
        assert!(nz.contains_point(25, 25));

        // And the whole results match the equivalent box algebra.
        let a = Region::from_box(BoxI::new(0, 0, 20, 20));
        let b = Region::from_box(BoxI::new(10, 10, 30, 30));
        assert_eq!(eo, a.xor(&b));
        assert_eq!(nz, a.union(&b));
    }

    #[test]
    fn test_star_even_odd_subset_of_winding() {
        // Five-pointed star drawn point to point: even-odd leaves the inner
        // pentagon hollow, non-zero fills it, and even-odd coverage is a
        // subset of non-zero coverage.
        let star = pts(&[(50, 0), (79, 91), (2, 35), (98, 35), (21, 91)]);
        let eo = polygon_region(&star, FillingRule::EvenOdd);
        let nz = polygon_region(&star, FillingRule::NonZero);
        assert!(eo.selfcheck());
        assert!(nz.selfcheck());
        assert!(!eo.is_empty());
        assert!(!nz.is_empty());
        assert_ne!(eo, nz);
        // The pentagon's center is the hole.
        assert!(!eo.contains_point(50, 50));
        assert!(nz.contains_point(50, 50));
        // A star point is filled under both rules.
        assert!(eo.contains_point(50, 10));
        assert!(nz.contains_point(50, 10));
        assert!(eo.subtract(&nz).is_empty());
    }

    #[test]
    fn test_polygon_offset_matches_translated_region() {
        let tri = pts(&[(0, 0), (12, 0), (3, 9)]);
        let shifted: Vec<PointI> = tri.iter().map(|p| PointI::new(p.x + 7, p.y - 4)).collect();
        let mut r = polygon_region(&tri, FillingRule::EvenOdd);
        r.translate(7, -4);
        assert_eq!(r, polygon_region(&shifted, FillingRule::EvenOdd));
    }
}

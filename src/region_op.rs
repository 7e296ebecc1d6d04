//! The generic band sweep and the boolean set operators built on it.
//!
//! One sweep serves every operator. [`region_op`] walks two canonical
//! regions band by band: the band boundaries of the output are the merged
//! `y1`/`y2` event points of both inputs, so the cost is proportional to box
//! count, not pixel height. Per band it dispatches to an operator's
//! [`SweepOp`] handlers, which append boxes to the output; after each
//! appended band the sweep tries to coalesce it with the band before it,
//! which is what keeps a tall simple rectangle one box instead of one box
//! per contributing scanline range.
//!
//! Union, intersection, and subtraction are each just a handler triple.
//! XOR composes two subtractions and a union. Shrink/grow decomposes its
//! distance in binary and folds shifted copies of the region into itself.

use crate::basics::BoxI;
use crate::region::Region;

// ============================================================================
// SweepOp — the handler triple a boolean operator supplies
// ============================================================================

/// Band handlers for one boolean operator.
///
/// `overlap` receives one X-sorted band from each input clipped to a common
/// `[y1, y2)` strip. The non-overlap handlers receive a band present in only
/// one input; operators that ignore such bands (intersection ignores both,
/// subtraction ignores subtrahend-only bands) keep the default no-op.
///
/// Handlers must append boxes left to right and may rely on their input
/// bands being canonical; they must themselves never emit two boxes that
/// touch or overlap within the band.
trait SweepOp {
    fn overlap(&self, out: &mut Vec<BoxI>, band1: &[BoxI], band2: &[BoxI], y1: i32, y2: i32);

    fn non_overlap1(&self, _out: &mut Vec<BoxI>, _band: &[BoxI], _y1: i32, _y2: i32) {}

    fn non_overlap2(&self, _out: &mut Vec<BoxI>, _band: &[BoxI], _y1: i32, _y2: i32) {}
}

// ============================================================================
// Band helpers
// ============================================================================

/// Index just past the band that starts at `start` (all boxes sharing its `y1`).
#[inline]
fn band_end(boxes: &[BoxI], start: usize) -> usize {
    let y1 = boxes[start].y1;
    let mut end = start + 1;
    while end < boxes.len() && boxes[end].y1 == y1 {
        end += 1;
    }
    end
}

/// Append a whole band verbatim with a substituted Y strip.
fn copy_band(out: &mut Vec<BoxI>, band: &[BoxI], y1: i32, y2: i32) {
    for b in band {
        out.push(BoxI::new(b.x1, y1, b.x2, y2));
    }
}

/// Append `r`'s X extent to the current output band, merging with the last
/// appended box when they touch or overlap. Used by the union overlap
/// handler, where boxes from the two inputs may interleave arbitrarily.
fn merge_rect(out: &mut Vec<BoxI>, y1: i32, y2: i32, r: &BoxI) {
    if let Some(last) = out.last_mut() {
        if last.y1 == y1 && last.x2 >= r.x1 {
            if last.x2 < r.x2 {
                last.x2 = r.x2;
            }
            return;
        }
    }
    out.push(BoxI::new(r.x1, y1, r.x2, y2));
}

// ============================================================================
// Coalescing
// ============================================================================

/// Try to merge the band starting at `cur_start` with the one starting at
/// `prev_start`. The bands merge when they are vertically adjacent and have
/// pairwise identical X extents; merging extends the previous band's `y2`
/// and drops the newer duplicate boxes.
///
/// Returns the start index of whichever band should play "previous" for the
/// next coalescing attempt. `cur_start` may mark the first of several bands
/// (the sweep's tail appends many at once); only that first band is a merge
/// candidate, and any bands after it are shifted down on success.
fn coalesce(boxes: &mut Vec<BoxI>, prev_start: usize, cur_start: usize) -> usize {
    let prev_num = cur_start - prev_start;
    let total = boxes.len();

    let band_y1 = boxes[cur_start].y1;
    let mut cur_num = 0;
    while cur_start + cur_num < total && boxes[cur_start + cur_num].y1 == band_y1 {
        cur_num += 1;
    }

    // If several bands were appended, the next coalesce starts at the last.
    let mut next_prev = cur_start;
    if cur_start + cur_num < total {
        let mut last = total - 1;
        while boxes[last - 1].y1 == boxes[last].y1 {
            last -= 1;
        }
        next_prev = last;
    }

    if cur_num != prev_num || cur_num == 0 || boxes[prev_start].y2 != band_y1 {
        return next_prev;
    }
    for i in 0..cur_num {
        if boxes[prev_start + i].x1 != boxes[cur_start + i].x1
            || boxes[prev_start + i].x2 != boxes[cur_start + i].x2
        {
            return next_prev;
        }
    }

    let y2 = boxes[cur_start].y2;
    for b in &mut boxes[prev_start..cur_start] {
        b.y2 = y2;
    }
    boxes.drain(cur_start..cur_start + cur_num);

    if next_prev == cur_start {
        prev_start
    } else {
        next_prev - cur_num
    }
}

// ============================================================================
// The sweep
// ============================================================================

/// Run one operator's sweep over two canonical regions and return the
/// canonical output box list.
fn region_op<O: SweepOp>(op: &O, reg1: &Region, reg2: &Region) -> Vec<BoxI> {
    let r1 = reg1.boxes();
    let r2 = reg2.boxes();

    let mut out: Vec<BoxI> = Vec::with_capacity(2 * r1.len().max(r2.len()).max(1));
    let mut i1 = 0;
    let mut i2 = 0;
    let mut prev_band = 0usize;

    // `ybot` tracks how far down the sweep has accounted for; a band that
    // partially overlaps the other region contributes its unprocessed strip.
    let mut ybot = reg1.extents().y1.min(reg2.extents().y1);

    while i1 < r1.len() && i2 < r2.len() {
        let e1 = band_end(r1, i1);
        let e2 = band_end(r2, i2);
        let b1 = &r1[i1..e1];
        let b2 = &r2[i2..e2];

        // Strip covered by only one input, above the shared strip.
        let ytop;
        let cur = out.len();
        if b1[0].y1 < b2[0].y1 {
            let top = b1[0].y1.max(ybot);
            let bot = b1[0].y2.min(b2[0].y1);
            if top != bot {
                op.non_overlap1(&mut out, b1, top, bot);
            }
            ytop = b2[0].y1;
        } else if b2[0].y1 < b1[0].y1 {
            let top = b2[0].y1.max(ybot);
            let bot = b2[0].y2.min(b1[0].y1);
            if top != bot {
                op.non_overlap2(&mut out, b2, top, bot);
            }
            ytop = b1[0].y1;
        } else {
            ytop = b1[0].y1;
        }
        if out.len() != cur {
            prev_band = coalesce(&mut out, prev_band, cur);
        }

        // Strip covered by both inputs.
        ybot = b1[0].y2.min(b2[0].y2);
        let cur = out.len();
        if ybot > ytop {
            op.overlap(&mut out, b1, b2, ytop, ybot);
        }
        if out.len() != cur {
            prev_band = coalesce(&mut out, prev_band, cur);
        }

        // A band is consumed once the sweep has passed its bottom.
        if b1[0].y2 == ybot {
            i1 = e1;
        }
        if b2[0].y2 == ybot {
            i2 = e2;
        }
    }

    // One input is exhausted; the remainder of the other is all
    // non-overlapping bands.
    let cur = out.len();
    if i1 < r1.len() {
        while i1 < r1.len() {
            let e1 = band_end(r1, i1);
            let b1 = &r1[i1..e1];
            op.non_overlap1(&mut out, b1, b1[0].y1.max(ybot), b1[0].y2);
            i1 = e1;
        }
    } else {
        while i2 < r2.len() {
            let e2 = band_end(r2, i2);
            let b2 = &r2[i2..e2];
            op.non_overlap2(&mut out, b2, b2[0].y1.max(ybot), b2[0].y2);
            i2 = e2;
        }
    }
    if out.len() != cur {
        coalesce(&mut out, prev_band, cur);
    }

    // Give memory back when the sweep's guess was far too big, but keep at
    // least one slot.
    if out.len() < out.capacity() / 2 {
        out.shrink_to(out.len().max(1));
    }
    out
}

// ============================================================================
// Operator handler triples
// ============================================================================

struct UnionOp;

impl SweepOp for UnionOp {
    /// Take the lesser-`x1` box from either input, extending the previously
    /// emitted box whenever the two meet or overlap.
    fn overlap(&self, out: &mut Vec<BoxI>, band1: &[BoxI], band2: &[BoxI], y1: i32, y2: i32) {
        let mut i = 0;
        let mut j = 0;
        while i < band1.len() && j < band2.len() {
            if band1[i].x1 < band2[j].x1 {
                merge_rect(out, y1, y2, &band1[i]);
                i += 1;
            } else {
                merge_rect(out, y1, y2, &band2[j]);
                j += 1;
            }
        }
        for b in &band1[i..] {
            merge_rect(out, y1, y2, b);
        }
        for b in &band2[j..] {
            merge_rect(out, y1, y2, b);
        }
    }

    fn non_overlap1(&self, out: &mut Vec<BoxI>, band: &[BoxI], y1: i32, y2: i32) {
        copy_band(out, band, y1, y2);
    }

    fn non_overlap2(&self, out: &mut Vec<BoxI>, band: &[BoxI], y1: i32, y2: i32) {
        copy_band(out, band, y1, y2);
    }
}

struct IntersectOp;

impl SweepOp for IntersectOp {
    /// Emit the pairwise X overlap of the two bands, advancing whichever
    /// box ends first. Bands present in only one input contribute nothing.
    fn overlap(&self, out: &mut Vec<BoxI>, band1: &[BoxI], band2: &[BoxI], y1: i32, y2: i32) {
        let mut i = 0;
        let mut j = 0;
        while i < band1.len() && j < band2.len() {
            let x1 = band1[i].x1.max(band2[j].x1);
            let x2 = band1[i].x2.min(band2[j].x2);
            if x1 < x2 {
                out.push(BoxI::new(x1, y1, x2, y2));
            }
            if band1[i].x2 == x2 {
                i += 1;
            }
            if band2[j].x2 == x2 {
                j += 1;
            }
        }
    }
}

struct SubtractOp;

impl SweepOp for SubtractOp {
    /// Walk both bands left to right with a cursor `x1` marking how much of
    /// the current minuend box is still unclaimed, emitting the minuend
    /// pieces no subtrahend box covers.
    fn overlap(&self, out: &mut Vec<BoxI>, band1: &[BoxI], band2: &[BoxI], y1: i32, y2: i32) {
        let mut i = 0;
        let mut j = 0;
        let mut x1 = band1[0].x1;

        while i < band1.len() && j < band2.len() {
            let r1 = band1[i];
            let r2 = band2[j];
            if r2.x2 <= x1 {
                // Subtrahend box entirely to the left: skip it.
                j += 1;
            } else if r2.x1 <= x1 {
                // Subtrahend covers the cursor: the strip up to its right
                // edge is gone.
                x1 = r2.x2;
                if x1 >= r1.x2 {
                    i += 1;
                    if i < band1.len() {
                        x1 = band1[i].x1;
                    }
                } else {
                    j += 1;
                }
            } else if r2.x1 < r1.x2 {
                // A gap before the next subtrahend box: emit it.
                out.push(BoxI::new(x1, y1, r2.x1, y2));
                x1 = r2.x2;
                if x1 >= r1.x2 {
                    i += 1;
                    if i < band1.len() {
                        x1 = band1[i].x1;
                    }
                } else {
                    j += 1;
                }
            } else {
                // Rest of this minuend box is uncovered.
                if r1.x2 > x1 {
                    out.push(BoxI::new(x1, y1, r1.x2, y2));
                }
                i += 1;
                if i < band1.len() {
                    x1 = band1[i].x1;
                }
            }
        }

        while i < band1.len() {
            out.push(BoxI::new(x1, y1, band1[i].x2, y2));
            i += 1;
            if i < band1.len() {
                x1 = band1[i].x1;
            }
        }
    }

    fn non_overlap1(&self, out: &mut Vec<BoxI>, band: &[BoxI], y1: i32, y2: i32) {
        copy_band(out, band, y1, y2);
    }
}

// ============================================================================
// Public operators
// ============================================================================

impl Region {
    /// Union of two regions.
    pub fn union(&self, other: &Region) -> Region {
        // Trivial cases first: identical operands, an empty operand, or one
        // single-box operand whose extents swallow the other entirely.
        if std::ptr::eq(self, other) || other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        if self.num_rects() == 1 && self.extents().contains(&other.extents()) {
            return self.clone();
        }
        if other.num_rects() == 1 && other.extents().contains(&self.extents()) {
            return other.clone();
        }

        let boxes = region_op(&UnionOp, self, other);
        // Union extents come straight from the inputs' extents.
        let a = self.extents();
        let b = other.extents();
        let extents = BoxI::new(
            a.x1.min(b.x1),
            a.y1.min(b.y1),
            a.x2.max(b.x2),
            a.y2.max(b.y2),
        );
        Region::from_boxes_with_extents(boxes, extents)
    }

    /// Intersection of two regions.
    pub fn intersect(&self, other: &Region) -> Region {
        // Disjoint extents mean a disjoint result, no sweep needed.
        if self.is_empty() || other.is_empty() || !self.extents().overlaps(&other.extents()) {
            return Region::new();
        }
        let boxes = region_op(&IntersectOp, self, other);
        // Neither input's extents bound the result; scan the output.
        Region::from_canonical_boxes(boxes)
    }

    /// This region minus `other`.
    pub fn subtract(&self, other: &Region) -> Region {
        // Nothing to subtract where the extents never meet.
        if self.is_empty() || other.is_empty() || !self.extents().overlaps(&other.extents()) {
            return self.clone();
        }
        let boxes = region_op(&SubtractOp, self, other);
        Region::from_canonical_boxes(boxes)
    }

    /// Symmetric difference: `(self - other) ∪ (other - self)`.
    pub fn xor(&self, other: &Region) -> Region {
        let a = self.subtract(other);
        let b = other.subtract(self);
        a.union(&b)
    }

    /// In-place union: `*self = *self ∪ other`. The result is built fresh
    /// and move-assigned, so `other` may freely be derived from `self`.
    pub fn union_with(&mut self, other: &Region) {
        *self = self.union(other);
    }

    /// In-place intersection.
    pub fn intersect_with(&mut self, other: &Region) {
        *self = self.intersect(other);
    }

    /// In-place subtraction.
    pub fn subtract_with(&mut self, other: &Region) {
        *self = self.subtract(other);
    }

    /// In-place symmetric difference.
    pub fn xor_with(&mut self, other: &Region) {
        *self = self.xor(other);
    }

    /// Union a single rectangle into the region. A degenerate (zero-area)
    /// rectangle is a no-op.
    pub fn union_rect(&mut self, b: BoxI) {
        if b.is_empty() {
            return;
        }
        let rect = Region::from_box(b);
        self.union_with(&rect);
    }

    /// Shrink (positive distance) or grow (negative distance) the region
    /// along each axis independently.
    ///
    /// Eroding by `n` means keeping the points whose full `[-n, n]`
    /// neighborhood along that axis is inside the region; dilating is the
    /// same with union instead of intersection. Each axis applies
    /// [`compress`] over a total shift of `2n` and then recenters by `n`.
    pub fn shrink(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let adx = dx.abs();
        let ady = dy.abs();
        if adx != 0 {
            compress(self, 2 * adx, true, dx < 0);
        }
        if ady != 0 {
            compress(self, 2 * ady, false, dy < 0);
        }
        self.translate(adx, ady);
    }
}

/// Fold shifted copies of `r` into itself over a total shift of `dist`
/// along one axis, by binary decomposition of `dist`.
///
/// `s` holds the region folded over a window of the current power-of-two
/// width and doubles each iteration; `r` accumulates the folds selected by
/// the set bits of `dist`. All shifts go in the negative direction; the
/// caller recenters afterwards.
fn compress(r: &mut Region, mut dist: i32, xdir: bool, grow: bool) {
    let mut shift = 1;
    let mut s = r.clone();

    while dist != 0 {
        if dist & shift != 0 {
            shift_region(r, -shift, xdir);
            op_region(r, &s, grow);
            dist -= shift;
            if dist == 0 {
                break;
            }
        }
        let t = s.clone();
        shift_region(&mut s, -shift, xdir);
        op_region(&mut s, &t, grow);
        shift <<= 1;
    }
}

#[inline]
fn shift_region(r: &mut Region, d: i32, xdir: bool) {
    if xdir {
        r.translate(d, 0);
    } else {
        r.translate(0, d);
    }
}

#[inline]
fn op_region(r: &mut Region, other: &Region, grow: bool) {
    if grow {
        r.union_with(other);
    } else {
        r.intersect_with(other);
    }
}

// ============================================================================
// Tests
// ============================================================================

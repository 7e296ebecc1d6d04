//! Edge table and active edge list for polygon scan conversion.
//!
//! Built per polygon and discarded after the sweep. All cross-references
//! use indices into one edge arena rather than links between nodes, so
//! dropping an edge mid-sweep can never leave a dangling reference.

use crate::basics::PointI;

// ============================================================================
// Bres — integer edge stepping
// ============================================================================

/// Bresenham-style stepping state for one non-horizontal edge: the edge's X
/// position (`minor_axis`) advanced by one scanline per [`Bres::step`],
/// with the remainder carried in the signed error accumulator `d`.
#[derive(Debug, Clone)]
pub(crate) struct Bres {
    pub minor_axis: i32,
    d: i32,
    m: i32,
    m1: i32,
    incr1: i32,
    incr2: i32,
}

impl Bres {
    /// Set up stepping from the edge's top X (`x1`) toward its bottom X
    /// (`x2`) over `dy` scanlines. `dy` must be positive.
    pub(crate) fn new(dy: i32, x1: i32, x2: i32) -> Self {
        let dx = x2 - x1;
        if dx < 0 {
            let m = dx / dy;
            let m1 = m - 1;
            Self {
                minor_axis: x1,
                d: 2 * m * dy - 2 * dx - 2 * dy,
                m,
                m1,
                incr1: -2 * dx + 2 * dy * m1,
                incr2: -2 * dx + 2 * dy * m,
            }
        } else {
            let m = dx / dy;
            let m1 = m + 1;
            Self {
                minor_axis: x1,
                d: -2 * m * dy + 2 * dx,
                m,
                m1,
                incr1: 2 * dx - 2 * dy * m1,
                incr2: 2 * dx - 2 * dy * m,
            }
        }
    }

    /// Advance X by one scanline.
    #[inline]
    pub(crate) fn step(&mut self) {
        if self.m1 > 0 {
            if self.d > 0 {
                self.minor_axis += self.m1;
                self.d += self.incr1;
            } else {
                self.minor_axis += self.m;
                self.d += self.incr2;
            }
        } else if self.d >= 0 {
            self.minor_axis += self.m1;
            self.d += self.incr1;
        } else {
            self.minor_axis += self.m;
            self.d += self.incr2;
        }
    }
}

// ============================================================================
// Edge and edge table
// ============================================================================

/// One non-horizontal polygon edge.
#[derive(Debug, Clone)]
pub(crate) struct Edge {
    /// Last scanline the edge is active on, inclusive (`bottom.y - 1`, so
    /// the edge never contributes on its own terminating scanline).
    pub ymax: i32,
    pub bres: Bres,
    /// `true` when the polygon traversal ran this edge top to bottom.
    /// Feeds the winding count under the non-zero fill rule.
    pub clockwise: bool,
    /// Scratch mark: edge currently on the winding edge table. Rebuilt by
    /// [`compute_waet`]; meaningless under the even-odd rule.
    pub wete: bool,
}

/// All edges starting on one scanline, X-sorted.
#[derive(Debug)]
pub(crate) struct Bucket {
    pub scanline: i32,
    pub edges: Vec<u32>,
}

/// The per-polygon edge table: an edge arena plus per-start-scanline
/// buckets, with the overall Y range of the polygon.
#[derive(Debug)]
pub(crate) struct EdgeTable {
    pub ymin: i32,
    pub ymax: i32,
    pub edges: Vec<Edge>,
    pub buckets: Vec<Bucket>,
}

impl EdgeTable {
    /// Build the edge table from a closed point list (the last point wraps
    /// to the first). Horizontal edges contribute no stepping state and are
    /// skipped outright.
    pub(crate) fn build(pts: &[PointI]) -> Self {
        let mut et = Self {
            ymin: i32::MAX,
            ymax: i32::MIN,
            edges: Vec::with_capacity(pts.len()),
            buckets: Vec::new(),
        };

        let mut prev = pts[pts.len() - 1];
        for &cur in pts {
            if prev.y != cur.y {
                let (top, bottom, clockwise) = if prev.y > cur.y {
                    (cur, prev, false)
                } else {
                    (prev, cur, true)
                };
                let dy = bottom.y - top.y;
                let idx = et.edges.len() as u32;
                et.edges.push(Edge {
                    ymax: bottom.y - 1,
                    bres: Bres::new(dy, top.x, bottom.x),
                    clockwise,
                    wete: false,
                });
                et.insert(top.y, idx);
                if top.y < et.ymin {
                    et.ymin = top.y;
                }
                if bottom.y > et.ymax {
                    et.ymax = bottom.y;
                }
            }
            prev = cur;
        }
        et
    }

    /// File edge `idx` under the bucket for `scanline`, keeping buckets
    /// sorted by scanline and each bucket's edges sorted by starting X.
    fn insert(&mut self, scanline: i32, idx: u32) {
        let x = self.edges[idx as usize].bres.minor_axis;
        let bucket = match self
            .buckets
            .binary_search_by(|b| b.scanline.cmp(&scanline))
        {
            Ok(i) => &mut self.buckets[i],
            Err(i) => {
                self.buckets.insert(
                    i,
                    Bucket {
                        scanline,
                        edges: Vec::new(),
                    },
                );
                &mut self.buckets[i]
            }
        };
        let edges = &self.edges;
        let pos = bucket
            .edges
            .iter()
            .position(|&e| edges[e as usize].bres.minor_axis >= x)
            .unwrap_or(bucket.edges.len());
        bucket.edges.insert(pos, idx);
    }
}

// ============================================================================
// Active edge list operations
// ============================================================================

/// Splice a bucket's edges into the active list, preserving current-X order.
/// Both lists are already sorted, so the insertion cursor only moves forward.
pub(crate) fn load_aet(aet: &mut Vec<u32>, edges: &[Edge], incoming: &[u32]) {
    let mut pos = 0;
    for &idx in incoming {
        let x = edges[idx as usize].bres.minor_axis;
        while pos < aet.len() && edges[aet[pos] as usize].bres.minor_axis < x {
            pos += 1;
        }
        aet.insert(pos, idx);
        pos += 1;
    }
}

/// Re-sort the active list by current X. The list is nearly sorted after a
/// single scanline step, so insertion sort does almost no work. Returns
/// `true` if any order changed (the winding edge table must be recomputed
/// when it did).
pub(crate) fn insertion_sort(aet: &mut [u32], edges: &[Edge]) -> bool {
    let mut changed = false;
    for i in 1..aet.len() {
        let key = aet[i];
        let kx = edges[key as usize].bres.minor_axis;
        let mut j = i;
        while j > 0 && edges[aet[j - 1] as usize].bres.minor_axis > kx {
            aet[j] = aet[j - 1];
            j -= 1;
            changed = true;
        }
        aet[j] = key;
    }
    changed
}

/// Rebuild the winding edge table marks: walking the X-sorted active list
/// and accumulating the signed winding count, an edge is marked when the
/// count transitions between zero and non-zero at it. The marked edges
/// bound exactly the spans that are inside under the non-zero rule.
pub(crate) fn compute_waet(aet: &[u32], edges: &mut [Edge]) {
    let mut inside = true;
    let mut winding = 0i32;
    for &idx in aet {
        let e = &mut edges[idx as usize];
        winding += if e.clockwise { 1 } else { -1 };
        e.wete = (inside && winding != 0) || (!inside && winding == 0);
        if e.wete {
            inside = !inside;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # yxregion
//!
//! Pixel-exact 2D region algebra over Y-X banded rectangle lists, with a
//! scanline polygon converter — the representation and algorithms of
//! classic server-side clipping, in pure Rust.
//!
//! A [`region::Region`] is a set of pixels stored as a canonical list of
//! non-overlapping half-open boxes, grouped into horizontal bands. The
//! canonical form makes set operations a linear merge:
//!
//! - Boolean algebra: union, intersection, subtraction, symmetric
//!   difference
//! - Containment queries: point-in-region, rectangle-in-region
//! - Whole-region translation and symmetric shrink/grow
//! - Polygon scan conversion under the even-odd and non-zero winding
//!   fill rules
//!
//! All coordinates are `i32`; all boxes are half-open `[x1, x2) x [y1, y2)`.

// Foundation types
pub mod basics;

// Canonical banded region and its queries
pub mod region;

// Boolean set operations and shrink/grow
pub mod region_op;

// Polygon scan conversion
pub(crate) mod edge_table;
pub mod poly_region;

//! The quadratic force accumulation primitive shared by every wirelength model.

use crate::linsys::LinearSystem;

/// A single pin, projected onto one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin1D {
    pub cell: usize,
    /// Absolute position of the pin on this axis: `position(cell).axis + offset`.
    pub pos: f32,
    /// The pin's offset from its cell's position on this axis (post-orientation).
    pub offset: f32,
    pub movable: bool,
}

/// Accumulate `force * ((x[p1.cell] + p1.offset) − (x[p2.cell] + p2.offset))²` into `sys`.
///
/// - Both movable: couples the two cells with an off-diagonal spring.
/// - One movable: pins the movable cell toward the fixed one's absolute position.
/// - Both fixed: no-op (the fixed rows are pinned separately, once, by the model driver).
pub fn add_force(p1: Pin1D, p2: Pin1D, sys: &mut LinearSystem, force: f32) {
    match (p1.movable, p2.movable) {
        (true, true) => {
            let c1 = p1.cell;
            let c2 = p2.cell;
            sys.add_a(c1, c1, force);
            sys.add_a(c2, c2, force);
            sys.add_a(c1, c2, -force);
            sys.add_a(c2, c1, -force);
            sys.add_b(c1, force * (p2.offset - p1.offset));
            sys.add_b(c2, force * (p1.offset - p2.offset));
        }
        (true, false) => {
            sys.add_a(p1.cell, p1.cell, force);
            sys.add_b(p1.cell, force * (p2.pos - p1.offset));
        }
        (false, true) => {
            sys.add_a(p2.cell, p2.cell, force);
            sys.add_b(p2.cell, force * (p1.pos - p2.offset));
        }
        (false, false) => {}
    }
}

/// The Bound-to-Bound (B2B) weighted variant: `force = scale / max(tol, |p2.pos − p1.pos|)`.
///
/// `tol` prevents the weight from blowing up when two pins coincide.
pub fn add_force_b2b(p1: Pin1D, p2: Pin1D, sys: &mut LinearSystem, tol: f32, scale: f32) {
    let force = scale / tol.max((p2.pos - p1.pos).abs());
    add_force(p1, p2, sys, force);
}

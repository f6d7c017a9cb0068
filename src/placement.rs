//! Mutable per-cell placement: positions and orientations.

use crate::geom::{Orientation, Point};
use crate::netlist::Netlist;

/// A placement of a [`Netlist`]'s cells: one position and orientation per cell.
///
/// Positions of cells fixed on a given axis are never altered by anything in this crate; callers
/// are expected to only ever read them back unchanged for such cells.
#[derive(Debug, Clone)]
pub struct Placement {
    pub positions: Vec<Point<f32>>,
    pub orientations: Vec<Orientation>,
}

impl Placement {
    /// An all-origin, unflipped placement sized to `netlist`.
    pub fn zeroed(netlist: &Netlist) -> Self {
        Self {
            positions: vec![Point::new(0.0, 0.0); netlist.num_cells()],
            orientations: vec![Orientation::default(); netlist.num_cells()],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.positions.len()
    }

    /// The absolute position of a pin: `orientation(cell) ∘ offset + position(cell)`.
    #[inline]
    pub fn pin_position(&self, cell: usize, offset: Point<f32>) -> Point<f32> {
        self.orientations[cell].apply(offset) + self.positions[cell]
    }
}

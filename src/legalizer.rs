//! The rough legalizer (`region_distribution`) trait boundary.
//!
//! No spreading algorithm lives here: this mirrors the relationship the source placement engine
//! has with its own diffusion-based placer, a separate, much larger module addressing a distinct
//! concern (density equalization, not wirelength minimization). [`RoughLegalizer`] is the interface
//! a hosting application implements to plug one in.

use crate::geom::{Point, Rect};
use crate::netlist::Netlist;
use crate::placement::Placement;

/// A movable cell as handed to a legalizer: just enough to round-trip its position.
#[derive(Debug, Clone, Copy)]
pub struct MovableCellSpec {
    pub area: i64,
    pub size: Point<i32>,
    pub position: Point<f32>,
    pub placement_index: usize,
}

/// A fixed cell (obstacle) a legalizer must route movable cells around.
#[derive(Debug, Clone, Copy)]
pub struct FixedCellSpec {
    pub size: Point<i32>,
    pub position: Point<f32>,
}

/// A legalizer's verdict for one movable cell: its spread (non-overlapping) position.
#[derive(Debug, Clone, Copy)]
pub struct LegalizedCellPosition {
    pub placement_index: usize,
    pub position: Point<f32>,
}

/// Abstract interface over rough legalizers: given the placement surface and cell set, compute a
/// spread, overlap-free placement. Implementations (e.g. a diffusion-based density solver) live
/// outside this crate.
pub trait RoughLegalizer {
    fn build(surface: Rect<i32>, movable_cells: &[MovableCellSpec], fixed_cells: &[FixedCellSpec]) -> Self;
    fn export_spread_positions(&self) -> Vec<LegalizedCellPosition>;
}

/// Build a [`RoughLegalizer`] request from the current netlist and placement, splitting cells by
/// movability on either axis.
pub fn get_rough_legalizer<L: RoughLegalizer>(
    surface: Rect<i32>,
    netlist: &Netlist,
    placement: &Placement,
) -> L {
    let mut movable_cells = Vec::new();
    let mut fixed_cells = Vec::new();
    for c in 0..netlist.num_cells() {
        let attrs = netlist.cell_attributes(c);
        if attrs.x_movable() || attrs.y_movable() {
            movable_cells.push(MovableCellSpec {
                area: netlist.cell_area(c),
                size: netlist.cell_size(c),
                position: placement.positions[c],
                placement_index: c,
            });
        } else {
            fixed_cells.push(FixedCellSpec {
                size: netlist.cell_size(c),
                position: placement.positions[c],
            });
        }
    }
    L::build(surface, &movable_cells, &fixed_cells)
}

/// Write a legalizer's exported positions back into a placement, in place.
pub fn absorb_legalized_result(placement: &mut Placement, legalized: &[LegalizedCellPosition]) {
    for entry in legalized {
        placement.positions[entry.placement_index] = entry.position;
    }
}

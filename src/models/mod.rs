//! Wirelength model builders: HPWL-F, HPWL-R and the Star model, plus the threshold-crossover
//! combinator. Each model consumes `(netlist, placement, tol, min_size, max_size)` and produces a
//! pair of independent per-axis linear systems.

mod hpwl_f;
mod hpwl_r;
mod star;
mod threshold_crossover;

pub use hpwl_f::HpwlF;
pub use hpwl_r::HpwlR;
pub use star::Star;
pub use threshold_crossover::ThresholdCrossover;

use crate::force::Pin1D;
use crate::linsys::LinearSystem;
use crate::netlist::Netlist;
use crate::placement::Placement;

/// Two independent values, one per spatial axis — the X/Y analog of the original's
/// `point<linear_system>`.
#[derive(Debug, Clone)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisPair<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// A wirelength model: turns a netlist + placement window into a pair of well-posed linear
/// systems.
pub trait WirelengthModel {
    fn build(
        &self,
        netlist: &Netlist,
        placement: &Placement,
        tol: f32,
        min_size: usize,
        max_size: usize,
    ) -> AxisPair<LinearSystem>;
}

/// A per-net contribution rule that only ever touches the `[0, Nc)` variable range (i.e. no
/// auxiliary variables). This is the seam [`ThresholdCrossover`] combines over; the Star model,
/// which allocates auxiliary variables, does not implement it.
pub trait NetContribution {
    fn add_net(&self, sys: &mut AxisPair<LinearSystem>, tol: f32, pins: &AxisPair<Vec<Pin1D>>);
}

/// Allocate a pair of empty systems of dimension `dim` and pin every fixed coordinate: `A[c,c] +=
/// 1`, `b[c] += pos[c].axis`, for cells not movable on that axis. `dim` is `Nc` for HPWL-F/R and
/// `Nc + Nn` for the Star model.
pub fn empty_linear_systems(netlist: &Netlist, placement: &Placement, dim: usize) -> AxisPair<LinearSystem> {
    let mut sys = AxisPair::new(LinearSystem::new(dim), LinearSystem::new(dim));
    for c in 0..netlist.num_cells() {
        let attrs = netlist.cell_attributes(c);
        let pos = placement.positions[c];
        if !attrs.x_movable() {
            sys.x.add_a(c, c, 1.0);
            sys.x.add_b(c, pos.x);
        }
        if !attrs.y_movable() {
            sys.y.add_a(c, c, 1.0);
            sys.y.add_b(c, pos.y);
        }
    }
    sys
}

/// Project a net's pins onto each axis, applying the current placement's orientation and
/// position. Pins are yielded in storage order, matching `Netlist::net_pins`.
pub fn net_pins_1d(netlist: &Netlist, placement: &Placement, net: usize) -> AxisPair<Vec<Pin1D>> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for p in netlist.net_pins(net) {
        let offs = placement.orientations[p.cell].apply(p.offset);
        let pos = placement.positions[p.cell] + offs;
        let attrs = netlist.cell_attributes(p.cell);
        x.push(Pin1D {
            cell: p.cell,
            pos: pos.x,
            offset: offs.x,
            movable: attrs.x_movable(),
        });
        y.push(Pin1D {
            cell: p.cell,
            pos: pos.y,
            offset: offs.y,
            movable: attrs.y_movable(),
        });
    }
    AxisPair::new(x, y)
}

/// Find the index of the pin with the minimum (or maximum) position, breaking ties by first
/// occurrence in storage order. This is the documented, tested tie-break for the HPWL-F "which
/// pin is the extremum" open question.
pub fn argmin(pins: &[Pin1D]) -> usize {
    let mut best = 0;
    for (i, p) in pins.iter().enumerate().skip(1) {
        if p.pos < pins[best].pos {
            best = i;
        }
    }
    best
}

pub fn argmax(pins: &[Pin1D]) -> usize {
    let mut best = 0;
    for (i, p) in pins.iter().enumerate().skip(1) {
        if p.pos > pins[best].pos {
            best = i;
        }
    }
    best
}

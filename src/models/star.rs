//! The Star model: one auxiliary variable per net instead of a clique/chain over its pins.

use crate::force::{add_force, Pin1D};
use crate::linsys::LinearSystem;
use crate::netlist::Netlist;
use crate::placement::Placement;

use super::{empty_linear_systems, net_pins_1d, AxisPair, WirelengthModel};

/// Allocates variable `Nc + n` for each net `n`, at the midpoint of its pins' extremal positions.
/// Every pin is sprung toward that auxiliary variable instead of toward each other, so a net with
/// `k` pins costs one variable and `k` edges rather than `k` or `2k - 3`.
///
/// Deliberately does not implement [`super::NetContribution`]: the combinator it would otherwise
/// plug into only dispatches over the `[0, Nc)` variable range.
pub struct Star {}

impl Star {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Star {
    fn default() -> Self {
        Self::new()
    }
}

fn add_net_1d(pins: &[Pin1D], aux: usize, sys: &mut LinearSystem, tol: f32) {
    if pins.len() < 2 {
        sys.add_a(aux, aux, 1.0);
        return;
    }
    let pos_min = pins.iter().map(|p| p.pos).fold(f32::INFINITY, f32::min);
    let pos_max = pins
        .iter()
        .map(|p| p.pos)
        .fold(f32::NEG_INFINITY, f32::max);
    let med = (pos_min + pos_max) / 2.0;
    let half_width = (pos_max - pos_min) / 2.0;
    let force = 1.0 / tol.max(half_width);

    let aux_pin = Pin1D {
        cell: aux,
        pos: med,
        offset: 0.0,
        movable: true,
    };
    for &p in pins {
        add_force(p, aux_pin, sys, force);
    }
}

impl WirelengthModel for Star {
    fn build(
        &self,
        netlist: &Netlist,
        placement: &Placement,
        tol: f32,
        min_size: usize,
        max_size: usize,
    ) -> AxisPair<LinearSystem> {
        let _span = tracing::info_span!("star_build").entered();
        let dim = netlist.num_cells() + netlist.num_nets();
        let mut sys = empty_linear_systems(netlist, placement, dim);

        for n in 0..netlist.num_nets() {
            let aux = netlist.num_cells() + n;
            let pin_cnt = netlist.net_pin_count(n);
            if pin_cnt < 2 || pin_cnt < min_size || pin_cnt >= max_size {
                sys.x.add_a(aux, aux, 1.0);
                sys.y.add_a(aux, aux, 1.0);
                continue;
            }
            let pins = net_pins_1d(netlist, placement, n);
            add_net_1d(&pins.x, aux, &mut sys.x, tol);
            add_net_1d(&pins.y, aux, &mut sys.y, tol);
        }
        sys
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geom::Point;
    use crate::netlist::{attr, CellAttributes, CellSpec, NetSpec, PinSpec};
    use crate::solver::{CgSolver, ReferenceCg};

    fn cell(movable: bool) -> CellSpec {
        CellSpec {
            size: Point::new(1, 1),
            area: 1,
            attributes: CellAttributes(if movable {
                attr::X_MOVABLE | attr::Y_MOVABLE
            } else {
                0
            }),
        }
    }

    fn pin(cell_index: usize, net_index: usize) -> PinSpec {
        PinSpec {
            cell_index,
            net_index,
            offset: Point::new(0.0, 0.0),
        }
    }

    /// Scenario S1 under the Star model: same symmetric pads, same midpoint optimum.
    #[test]
    fn s1_single_movable_between_two_fixed_pads() {
        let _ = tracing_subscriber::fmt::try_init();
        let cells = vec![cell(false), cell(false), cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }];
        let pins = vec![pin(0, 0), pin(1, 0), pin(2, 0)];
        let net = Netlist::build(cells, nets, pins).unwrap();

        let mut pl = Placement::zeroed(&net);
        pl.positions[0] = Point::new(0.0, 0.0);
        pl.positions[1] = Point::new(10.0, 0.0);
        pl.positions[2] = Point::new(5.0, 0.0);

        let sys = Star::new().build(&net, &pl, 1e-3, 2, usize::MAX);
        assert_eq!(sys.x.dim(), 3 + 1);

        let solver = ReferenceCg::default();
        let guess = vec![0.0, 10.0, 5.0, 5.0];
        let x = solver.solve(&sys.x, &guess, 1e-6).unwrap();
        assert_relative_eq!(x[2], 5.0, epsilon = 1e-3);
    }

    /// Scenario S3: an empty net (0 pins) still gets its auxiliary variable pinned so the system
    /// stays well-posed.
    #[test]
    fn s3_empty_net_pins_its_auxiliary_variable() {
        let cells = vec![cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }, NetSpec { weight: 1.0 }];
        let pins = vec![pin(0, 0)];
        let net = Netlist::build(cells, nets, pins).unwrap();
        let pl = Placement::zeroed(&net);

        let sys = Star::new().build(&net, &pl, 1e-3, 2, usize::MAX);
        // net 1 is empty; its auxiliary variable lives at index 1 + 1 = 2.
        assert_eq!(sys.x.entry(2, 2), 1.0);
        assert_eq!(sys.y.entry(2, 2), 1.0);
    }
}

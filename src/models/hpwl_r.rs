//! HPWL-R: the reduced (bounding-edge chain) model.

use crate::force::{add_force_b2b, Pin1D};
use crate::linsys::LinearSystem;
use crate::netlist::Netlist;
use crate::placement::Placement;

use super::{empty_linear_systems, net_pins_1d, AxisPair, NetContribution, WirelengthModel};

/// For each net with `k >= 2` pins, stable-sort pins by position along the axis and add a
/// unit-scale B2B force between every consecutive pair in sorted order: `k - 1` edges instead of
/// HPWL-F's `2k - 3`.
pub struct HpwlR {}

impl HpwlR {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for HpwlR {
    fn default() -> Self {
        Self::new()
    }
}

fn add_net_1d(pins: &[Pin1D], sys: &mut LinearSystem, tol: f32) {
    if pins.len() < 2 {
        return;
    }
    let mut order: Vec<usize> = (0..pins.len()).collect();
    order.sort_by(|&a, &b| pins[a].pos.total_cmp(&pins[b].pos));

    for w in order.windows(2) {
        add_force_b2b(pins[w[0]], pins[w[1]], sys, tol, 1.0);
    }
}

impl NetContribution for HpwlR {
    fn add_net(&self, sys: &mut AxisPair<LinearSystem>, tol: f32, pins: &AxisPair<Vec<Pin1D>>) {
        add_net_1d(&pins.x, &mut sys.x, tol);
        add_net_1d(&pins.y, &mut sys.y, tol);
    }
}

impl WirelengthModel for HpwlR {
    fn build(
        &self,
        netlist: &Netlist,
        placement: &Placement,
        tol: f32,
        min_size: usize,
        max_size: usize,
    ) -> AxisPair<LinearSystem> {
        let _span = tracing::info_span!("hpwl_r_build").entered();
        let mut sys = empty_linear_systems(netlist, placement, netlist.num_cells());
        for n in 0..netlist.num_nets() {
            let pin_cnt = netlist.net_pin_count(n);
            if pin_cnt < min_size || pin_cnt >= max_size {
                continue;
            }
            let pins = net_pins_1d(netlist, placement, n);
            self.add_net(&mut sys, tol, &pins);
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

    /// Scenario S2: on a 2-pin net HPWL-R degenerates to the same single spring HPWL-F would
    /// produce (there is only one consecutive pair either way).
    #[test]
    fn s2_two_pin_net_matches_hpwl_f_on_a_single_edge() {
        let _ = tracing_subscriber::fmt::try_init();
        let cells = vec![cell(true), cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }];
        let pins = vec![pin(0, 0), pin(1, 0)];
        let net = Netlist::build(cells, nets, pins).unwrap();

        let mut pl = Placement::zeroed(&net);
        pl.positions[0] = Point::new(0.0, 0.0);
        pl.positions[1] = Point::new(10.0, 0.0);

        let sys_r = HpwlR::new().build(&net, &pl, 1e-3, 2, usize::MAX);
        let sys_f = super::super::HpwlF::new().build(&net, &pl, 1e-3, 2, usize::MAX);

        let solver = ReferenceCg::default();
        let x_r = solver.solve(&sys_r.x, &[0.0, 10.0], 1e-6).unwrap();
        let x_f = solver.solve(&sys_f.x, &[0.0, 10.0], 1e-6).unwrap();
        assert_relative_eq!(x_r[0], x_f[0], epsilon = 1e-4);
        assert_relative_eq!(x_r[1], x_f[1], epsilon = 1e-4);
    }

    #[test]
    fn chains_three_pins_in_sorted_order_regardless_of_storage_order() {
        let cells = vec![cell(true), cell(true), cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }];
        // Stored out of position order: cell 0 is rightmost, cell 1 leftmost, cell 2 middle.
        let pins = vec![pin(0, 0), pin(1, 0), pin(2, 0)];
        let net = Netlist::build(cells, nets, pins).unwrap();

        let mut pl = Placement::zeroed(&net);
        pl.positions[0] = Point::new(10.0, 0.0);
        pl.positions[1] = Point::new(0.0, 0.0);
        pl.positions[2] = Point::new(5.0, 0.0);

        let sys = HpwlR::new().build(&net, &pl, 1e-3, 2, usize::MAX);
        // Chain is 1 -- 2 -- 0 in sorted order: cell 1 and cell 0 are never directly coupled.
        assert_eq!(sys.x.entry(1, 0), 0.0);
        assert_ne!(sys.x.entry(1, 2), 0.0);
        assert_ne!(sys.x.entry(2, 0), 0.0);
    }
}

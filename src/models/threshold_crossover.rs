//! A combinator picking between two per-net strategies based on a pin-count threshold.

use crate::linsys::LinearSystem;
use crate::netlist::Netlist;
use crate::placement::Placement;

use super::{empty_linear_systems, net_pins_1d, AxisPair, NetContribution, WirelengthModel};

/// Dispatches each net to `small` or `large` depending on whether its pin count is below
/// `threshold`: cheap because HPWL-F is quadratic in net size while HPWL-R is linear, and a real
/// placement schedule wants the precise model on small nets and the cheap one on large nets.
///
/// Both `Small` and `Large` must stick to the `[0, Nc)` variable range ([`NetContribution`]); the
/// Star model's auxiliary variables don't compose here without also threading a shared allocator
/// through both arms, which this crate doesn't need.
pub struct ThresholdCrossover<Small, Large> {
    threshold: usize,
    small: Small,
    large: Large,
}

impl<Small, Large> ThresholdCrossover<Small, Large> {
    pub fn new(threshold: usize, small: Small, large: Large) -> Self {
        Self {
            threshold,
            small,
            large,
        }
    }
}

impl<Small: NetContribution, Large: NetContribution> WirelengthModel
    for ThresholdCrossover<Small, Large>
{
    fn build(
        &self,
        netlist: &Netlist,
        placement: &Placement,
        tol: f32,
        min_size: usize,
        max_size: usize,
    ) -> AxisPair<LinearSystem> {
        let _span =
            tracing::info_span!("threshold_crossover_build", threshold = self.threshold).entered();
        let mut sys = empty_linear_systems(netlist, placement, netlist.num_cells());
        for n in 0..netlist.num_nets() {
            let pin_cnt = netlist.net_pin_count(n);
            if pin_cnt < min_size || pin_cnt >= max_size {
                continue;
            }
            let pins = net_pins_1d(netlist, placement, n);
            if pin_cnt < self.threshold {
                self.small.add_net(&mut sys, tol, &pins);
            } else {
                self.large.add_net(&mut sys, tol, &pins);
            }
        }
        sys
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geom::Point;
    use crate::models::{HpwlF, HpwlR};
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

    /// Net 0 has 2 pins (below threshold 3, so HpwlF handles it); net 1 has 3 pins (HpwlR).
    #[test]
    fn routes_small_nets_to_small_strategy_and_large_to_large() {
        let _ = tracing_subscriber::fmt::try_init();
        let cells = vec![cell(true), cell(true), cell(true), cell(true), cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }, NetSpec { weight: 1.0 }];
        let pins = vec![pin(0, 0), pin(1, 0), pin(2, 1), pin(3, 1), pin(4, 1)];
        let net = Netlist::build(cells, nets, pins).unwrap();

        let mut pl = Placement::zeroed(&net);
        pl.positions[0] = Point::new(0.0, 0.0);
        pl.positions[1] = Point::new(10.0, 0.0);
        pl.positions[2] = Point::new(0.0, 0.0);
        pl.positions[3] = Point::new(5.0, 0.0);
        pl.positions[4] = Point::new(10.0, 0.0);

        let combo = ThresholdCrossover::new(3, HpwlF::new(), HpwlR::new());
        let combo_sys = combo.build(&net, &pl, 1e-3, 1, usize::MAX);

        let solver = ReferenceCg::default();
        let guess = vec![0.0, 10.0, 0.0, 5.0, 10.0];
        let x = solver.solve(&combo_sys.x, &guess, 1e-6).unwrap();
        // Net 1's middle cell (3) sits at the HpwlR chain midpoint, same as its HpwlF/Star
        // counterpart would for a symmetric 3-pin net.
        assert_relative_eq!(x[3], 5.0, epsilon = 1e-3);
    }

    #[test]
    fn threshold_at_exact_pin_count_routes_to_large() {
        let cells = vec![cell(true), cell(true)];
        let nets = vec![NetSpec { weight: 1.0 }];
        let pins = vec![pin(0, 0), pin(1, 0)];
        let net = Netlist::build(cells, nets, pins).unwrap();
        let pl = Placement::zeroed(&net);

        // threshold == pin_cnt routes to `large`, not `small` (`pin_cnt < threshold` is strict).
        let combo = ThresholdCrossover::new(2, HpwlF::new(), HpwlR::new());
        let combo_sys = combo.build(&net, &pl, 1e-3, 1, usize::MAX);
        let large_only = HpwlR::new().build(&net, &pl, 1e-3, 1, usize::MAX);
        assert_eq!(combo_sys.x.entry(0, 1), large_only.x.entry(0, 1));
    }
}

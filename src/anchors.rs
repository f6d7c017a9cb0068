//! Anchor builders: the pulling forces the outer majorization-minimization loop uses to couple
//! successive placements together.

use crate::linsys::LinearSystem;
use crate::models::AxisPair;
use crate::netlist::Netlist;
use crate::placement::Placement;

/// A constant-weight anchor pulling every cell toward its current position, independent of any
/// wirelength force. `typical_distance` sets the anchor's relative strength: larger values anchor
/// more weakly.
pub fn uniform_pulling_forces(netlist: &Netlist, placement: &Placement, typical_distance: f32) -> AxisPair<LinearSystem> {
    let _span = tracing::info_span!("uniform_pulling_forces").entered();
    let weight = 1.0 / typical_distance;
    let mut sys = AxisPair::new(
        LinearSystem::new(netlist.num_cells()),
        LinearSystem::new(netlist.num_cells()),
    );
    for c in 0..netlist.num_cells() {
        let pos = placement.positions[c];
        sys.x.add_a(c, c, weight);
        sys.x.add_b(c, weight * pos.x);
        sys.y.add_a(c, c, weight);
        sys.y.add_b(c, weight * pos.y);
    }
    sys
}

/// The B2B-weighted anchor between an upper-bound and lower-bound placement: the majorizer of the
/// outer loop's linear (L1) disruption penalty around the current iterate. Each cell's weight is
/// scaled by its area relative to the mean, so large cells resist disruption more than small ones.
pub fn linear_pulling_forces(
    netlist: &Netlist,
    upper_bound: &Placement,
    lower_bound: &Placement,
    force: f32,
    min_distance: f32,
) -> AxisPair<LinearSystem> {
    let _span = tracing::info_span!("linear_pulling_forces").entered();
    let num_cells = netlist.num_cells();
    let mean_area = if num_cells == 0 {
        1.0
    } else {
        (0..num_cells).map(|c| netlist.cell_area(c) as f64).sum::<f64>() / num_cells as f64
    };

    let mut sys = AxisPair::new(LinearSystem::new(num_cells), LinearSystem::new(num_cells));
    for c in 0..num_cells {
        let area_scale = if mean_area == 0.0 {
            1.0
        } else {
            netlist.cell_area(c) as f64 / mean_area
        } as f32;
        let ub = upper_bound.positions[c];
        let lb = lower_bound.positions[c];

        let wx = force * area_scale / min_distance.max((ub.x - lb.x).abs());
        sys.x.add_a(c, c, wx);
        sys.x.add_b(c, wx * ub.x);

        let wy = force * area_scale / min_distance.max((ub.y - lb.y).abs());
        sys.y.add_a(c, c, wy);
        sys.y.add_b(c, wy * ub.y);
    }
    sys
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geom::Point;
    use crate::netlist::{attr, CellAttributes, CellSpec, NetSpec};

    fn movable_cell(area: i64) -> CellSpec {
        CellSpec {
            size: Point::new(1, 1),
            area,
            attributes: CellAttributes(attr::X_MOVABLE | attr::Y_MOVABLE),
        }
    }

    #[test]
    fn uniform_pull_anchors_toward_current_position() {
        let _ = tracing_subscriber::fmt::try_init();
        let net = Netlist::build(vec![movable_cell(1)], vec![NetSpec { weight: 1.0 }], vec![]).unwrap();
        let mut pl = Placement::zeroed(&net);
        pl.positions[0] = Point::new(4.0, -2.0);

        let sys = uniform_pulling_forces(&net, &pl, 2.0);
        assert_eq!(sys.x.entry(0, 0), 0.5);
        assert_eq!(sys.x.rhs()[0], 0.5 * 4.0);
        assert_eq!(sys.y.rhs()[0], 0.5 * -2.0);
    }

    #[test]
    fn linear_pull_scales_by_area_and_inverse_distance() {
        let net = Netlist::build(
            vec![movable_cell(1), movable_cell(3)],
            vec![NetSpec { weight: 1.0 }],
            vec![],
        )
        .unwrap();
        let mut ub = Placement::zeroed(&net);
        ub.positions[0] = Point::new(10.0, 0.0);
        ub.positions[1] = Point::new(10.0, 0.0);
        let mut lb = Placement::zeroed(&net);
        lb.positions[0] = Point::new(0.0, 0.0);
        lb.positions[1] = Point::new(0.0, 0.0);

        let sys = linear_pulling_forces(&net, &ub, &lb, 1.0, 1e-3);
        // mean area = 2; cell 0 scale = 0.5, cell 1 scale = 1.5; both at distance 10.
        assert_relative_eq!(sys.x.entry(0, 0), 0.05, epsilon = 1e-6);
        assert_relative_eq!(sys.x.entry(1, 1), 0.15, epsilon = 1e-6);
        assert_relative_eq!(sys.x.rhs()[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn linear_pull_clamps_to_min_distance_for_coincident_bounds() {
        let net = Netlist::build(vec![movable_cell(1)], vec![NetSpec { weight: 1.0 }], vec![]).unwrap();
        let ub = Placement::zeroed(&net);
        let lb = Placement::zeroed(&net);

        let sys = linear_pulling_forces(&net, &ub, &lb, 1.0, 1e-3);
        assert_relative_eq!(sys.x.entry(0, 0), 1000.0, epsilon = 1e-3);
    }
}

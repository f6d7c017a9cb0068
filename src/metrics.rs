//! Wirelength and disruption metrics.

use crate::netlist::Netlist;
use crate::placement::Placement;

/// Total half-perimeter wirelength: the sum over nets of `(x_max - x_min) + (y_max - y_min)`,
/// computed from the pins' current absolute positions. Nets with fewer than two pins contribute
/// zero.
pub fn hpwl_wirelength(netlist: &Netlist, placement: &Placement) -> f32 {
    let mut total = 0.0;
    for n in 0..netlist.num_nets() {
        let mut x_min = f32::INFINITY;
        let mut x_max = f32::NEG_INFINITY;
        let mut y_min = f32::INFINITY;
        let mut y_max = f32::NEG_INFINITY;
        for p in netlist.net_pins(n) {
            let pos = placement.pin_position(p.cell, p.offset);
            x_min = x_min.min(pos.x);
            x_max = x_max.max(pos.x);
            y_min = y_min.min(pos.y);
            y_max = y_max.max(pos.y);
        }
        if x_max >= x_min {
            total += (x_max - x_min) + (y_max - y_min);
        }
    }
    total
}

fn area_weighted_mean(netlist: &Netlist, per_cell: impl Fn(usize) -> f64) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_area = 0.0;
    for c in 0..netlist.num_cells() {
        let area = netlist.cell_area(c) as f64;
        weighted_sum += area * per_cell(c);
        total_area += area;
    }
    if total_area == 0.0 {
        0.0
    } else {
        weighted_sum / total_area
    }
}

/// Area-weighted mean of `|Δx| + |Δy|` between two placements of the same netlist.
pub fn mean_linear_disruption(netlist: &Netlist, lower: &Placement, upper: &Placement) -> f32 {
    area_weighted_mean(netlist, |c| {
        let d = upper.positions[c] - lower.positions[c];
        (d.x.abs() + d.y.abs()) as f64
    }) as f32
}

/// Square root of the area-weighted mean of `(|Δx| + |Δy|)²` between two placements.
pub fn mean_quadratic_disruption(netlist: &Netlist, lower: &Placement, upper: &Placement) -> f32 {
    area_weighted_mean(netlist, |c| {
        let d = upper.positions[c] - lower.positions[c];
        let l1 = (d.x.abs() + d.y.abs()) as f64;
        l1 * l1
    })
    .sqrt() as f32
}

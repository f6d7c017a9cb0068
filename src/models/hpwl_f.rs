//! HPWL-F: the fully-connected clique-star hybrid B2B model.

use crate::force::{add_force_b2b, Pin1D};
use crate::linsys::LinearSystem;
use crate::netlist::Netlist;
use crate::placement::Placement;

use super::{argmax, argmin, empty_linear_systems, net_pins_1d, AxisPair, NetContribution, WirelengthModel};

/// For each net with `k >= 2` pins, star every pin toward the minimum-position pin, plus every
/// pin except the two extrema toward the maximum-position pin (so the min/max edge isn't counted
/// twice). Ties among pins sharing an extremal position are broken by first occurrence in storage
/// order.
pub struct HpwlF {}

impl HpwlF {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for HpwlF {
    fn default() -> Self {
        Self::new()
    }
}

fn add_net_1d(pins: &[Pin1D], sys: &mut LinearSystem, tol: f32) {
    if pins.len() < 2 {
        return;
    }
    let scale = 1.0 / (pins.len() - 1) as f32;
    let min_idx = argmin(pins);
    let max_idx = argmax(pins);

    for (idx, &p) in pins.iter().enumerate() {
        if idx == min_idx {
            continue;
        }
        add_force_b2b(p, pins[min_idx], sys, tol, scale);
        if idx != max_idx {
            add_force_b2b(p, pins[max_idx], sys, tol, scale);
        }
    }
}

impl NetContribution for HpwlF {
    fn add_net(&self, sys: &mut AxisPair<LinearSystem>, tol: f32, pins: &AxisPair<Vec<Pin1D>>) {
        add_net_1d(&pins.x, &mut sys.x, tol);
        add_net_1d(&pins.y, &mut sys.y, tol);
    }
}

impl WirelengthModel for HpwlF {
    fn build(
        &self,
        netlist: &Netlist,
        placement: &Placement,
        tol: f32,
        min_size: usize,
        max_size: usize,
    ) -> AxisPair<LinearSystem> {
        let _span = tracing::info_span!("hpwl_f_build").entered();
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

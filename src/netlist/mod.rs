//! Immutable compressed-sparse bipartite netlist: cells and nets connected through pins.
//!
//! Construction mirrors the reference placement engine's `netlist` constructor: pins are sorted
//! once by net index to build the net-major view, then once by cell index to build the cell-major
//! view, recording the bijection between the two pin orderings (`pin_indexes`) as they go.

mod csr;
pub use csr::VecCsr;

use anyhow::{bail, Result};

use crate::geom::Point;

/// Bitmask over a cell's movability/flip attributes.
///
/// A cell is fixed on an axis iff the corresponding `*_MOVABLE` bit is clear.
pub mod attr {
    pub const X_MOVABLE: u32 = 1;
    pub const Y_MOVABLE: u32 = 1 << 1;
    pub const X_FLIPPABLE: u32 = 1 << 2;
    pub const Y_FLIPPABLE: u32 = 1 << 3;
    pub const SOFT_MACRO: u32 = 1 << 4;
}

/// A cell's static (placement-independent) attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttributes(pub u32);

impl CellAttributes {
    #[inline]
    pub fn contains(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    #[inline]
    pub fn x_movable(self) -> bool {
        self.contains(attr::X_MOVABLE)
    }

    #[inline]
    pub fn y_movable(self) -> bool {
        self.contains(attr::Y_MOVABLE)
    }
}

/// Construction-time cell description, in external (caller-facing) order.
#[derive(Debug, Clone, Copy)]
pub struct CellSpec {
    pub size: Point<i32>,
    pub area: i64,
    pub attributes: CellAttributes,
}

/// Construction-time net description.
#[derive(Debug, Clone, Copy)]
pub struct NetSpec {
    pub weight: f32,
}

/// Construction-time pin description; `pins` are unordered on input.
#[derive(Debug, Clone, Copy)]
pub struct PinSpec {
    pub cell_index: usize,
    pub net_index: usize,
    pub offset: Point<f32>,
}

/// A single pin, as yielded by the net-major or cell-major cursors: the cell and net it belongs
/// to, plus its (un-oriented, un-translated) offset.
#[derive(Debug, Clone, Copy)]
pub struct PinRef {
    pub cell: usize,
    pub net: usize,
    pub offset: Point<f32>,
}

/// Immutable netlist storage: a compressed-sparse bipartite graph between cells and nets through
/// pins, with both a net-major and cell-major view kept in sync via a pin-index bijection.
///
/// See the module invariants tested in [`Netlist::selfcheck`]: `net_limits`/`cell_limits` are the
/// CSR start offsets for each view, `cell_indexes`/`pin_offsets` are the net-major parallel arrays,
/// `net_indexes`/`pin_indexes` the cell-major ones, and `pin_indexes[k]` gives the net-major slot
/// of the pin found at cell-major slot `k`.
#[derive(Debug, Clone)]
pub struct Netlist {
    num_cells: usize,
    num_nets: usize,

    cell_sizes: Vec<Point<i32>>,
    cell_areas: Vec<i64>,
    cell_attributes: Vec<CellAttributes>,
    net_weights: Vec<f32>,

    /// Construction order -> internal order. Identity today; kept as a seam for future reordering
    /// (e.g. grouping fixed cells first).
    cell_internal_mapping: Vec<usize>,
    net_internal_mapping: Vec<usize>,

    // Net-major view: pins of net `n` occupy `net_limits[n]..net_limits[n+1]`.
    net_limits: Vec<usize>,
    cell_indexes: Vec<usize>,
    pin_offsets: Vec<Point<f32>>,

    // Cell-major view: pins of cell `c` occupy `cell_limits[c]..cell_limits[c+1]`.
    cell_limits: Vec<usize>,
    net_indexes: Vec<usize>,
    /// `pin_indexes[k]` is the net-major slot of the pin at cell-major slot `k`.
    pin_indexes: Vec<usize>,
}

impl Netlist {
    /// Build a netlist from the upstream loader's cell/net/pin lists.
    ///
    /// Fails if any pin references an out-of-range cell or net index.
    pub fn build(cells: Vec<CellSpec>, nets: Vec<NetSpec>, pins: Vec<PinSpec>) -> Result<Netlist> {
        let num_cells = cells.len();
        let num_nets = nets.len();
        let num_pins = pins.len();

        for (k, p) in pins.iter().enumerate() {
            if p.cell_index >= num_cells {
                bail!(
                    "pin {k} references out-of-range cell {} (num_cells={num_cells})",
                    p.cell_index
                );
            }
            if p.net_index >= num_nets {
                bail!(
                    "pin {k} references out-of-range net {} (num_nets={num_nets})",
                    p.net_index
                );
            }
        }

        // Net-major view: group pins by net, stable w.r.t. input order so tie-breaks (e.g. HPWL-F
        // extrema selection, which walks pins in net-major order) are deterministic.
        let net_membership: Vec<usize> = pins.iter().map(|p| p.net_index).collect();
        let net_csr = VecCsr::from_membership(num_nets, &net_membership);

        let net_limits = net_csr.start.clone();
        let mut cell_indexes = vec![0usize; num_pins];
        let mut pin_offsets = vec![Point::new(0.0, 0.0); num_pins];
        // original_pin_index[net_major_slot] = index into `pins`
        let mut original_pin_index = vec![0usize; num_pins];
        for (slot, &orig) in net_csr.items.iter().enumerate() {
            cell_indexes[slot] = pins[orig].cell_index;
            pin_offsets[slot] = pins[orig].offset;
            original_pin_index[orig] = slot;
        }
        // Cell-major view: group the same pins by cell, recording the net-major slot bijection.
        let cell_membership: Vec<usize> = pins.iter().map(|p| p.cell_index).collect();
        let cell_csr = VecCsr::from_membership(num_cells, &cell_membership);

        let cell_limits = cell_csr.start.clone();
        let mut net_indexes = vec![0usize; num_pins];
        let mut pin_indexes = vec![0usize; num_pins];
        for (slot, &orig) in cell_csr.items.iter().enumerate() {
            net_indexes[slot] = pins[orig].net_index;
            pin_indexes[slot] = original_pin_index[orig];
        }

        let net = Netlist {
            num_cells,
            num_nets,
            cell_sizes: cells.iter().map(|c| c.size).collect(),
            cell_areas: cells.iter().map(|c| c.area).collect(),
            cell_attributes: cells.iter().map(|c| c.attributes).collect(),
            net_weights: nets.iter().map(|n| n.weight).collect(),
            cell_internal_mapping: (0..num_cells).collect(),
            net_internal_mapping: (0..num_nets).collect(),
            net_limits,
            cell_indexes,
            pin_offsets,
            cell_limits,
            net_indexes,
            pin_indexes,
        };
        net.selfcheck()?;
        Ok(net)
    }

    /// Validate the CSR-bipartite invariants described in the module docs.
    pub fn selfcheck(&self) -> Result<()> {
        if self.net_limits.len() != self.num_nets + 1 {
            bail!("net_limits length mismatch");
        }
        if self.cell_limits.len() != self.num_cells + 1 {
            bail!("cell_limits length mismatch");
        }
        let num_pins = self.cell_indexes.len();
        if *self.net_limits.last().unwrap_or(&0) != num_pins {
            bail!("net_limits does not cover all pins");
        }
        if *self.cell_limits.last().unwrap_or(&0) != num_pins {
            bail!("cell_limits does not cover all pins");
        }

        for c in 0..self.num_cells {
            for &slot in self.cell_major_pin_slots(c) {
                let net_major_slot = self.pin_indexes[slot];
                if self.cell_indexes[net_major_slot] != c {
                    bail!("pin_indexes bijection broken for cell {c}, slot {slot}");
                }
                if self.net_indexes[slot] != self.net_of_net_major_slot(net_major_slot) {
                    bail!("net_indexes inconsistent with net-major view at slot {slot}");
                }
            }
        }
        Ok(())
    }

    fn net_of_net_major_slot(&self, slot: usize) -> usize {
        // net_limits is monotonic; the owning net is the last one whose start is <= slot.
        self.net_limits.partition_point(|&start| start <= slot) - 1
    }

    #[inline]
    fn cell_major_pin_slots(&self, c: usize) -> &[usize] {
        // cell_indexes/pin_indexes for cell c live at [cell_limits[c], cell_limits[c+1]) in the
        // cell-major arrays (net_indexes, pin_indexes); re-derive the range directly.
        &self.pin_indexes[self.cell_limits[c]..self.cell_limits[c + 1]]
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn num_nets(&self) -> usize {
        self.num_nets
    }

    pub fn num_pins(&self) -> usize {
        self.cell_indexes.len()
    }

    pub fn cell_size(&self, c: usize) -> Point<i32> {
        self.cell_sizes[c]
    }

    pub fn cell_area(&self, c: usize) -> i64 {
        self.cell_areas[c]
    }

    pub fn cell_attributes(&self, c: usize) -> CellAttributes {
        self.cell_attributes[c]
    }

    pub fn net_weight(&self, n: usize) -> f32 {
        self.net_weights[n]
    }

    pub fn net_pin_count(&self, n: usize) -> usize {
        self.net_limits[n + 1] - self.net_limits[n]
    }

    pub fn get_cell_ind(&self, external_ind: usize) -> usize {
        self.cell_internal_mapping[external_ind]
    }

    pub fn get_net_ind(&self, external_ind: usize) -> usize {
        self.net_internal_mapping[external_ind]
    }

    /// Iterate the pins of net `n`, in net-major storage order.
    pub fn net_pins(&self, n: usize) -> impl Iterator<Item = PinRef> + '_ {
        let lo = self.net_limits[n];
        let hi = self.net_limits[n + 1];
        (lo..hi).map(move |slot| PinRef {
            cell: self.cell_indexes[slot],
            net: n,
            offset: self.pin_offsets[slot],
        })
    }

    /// Iterate the pins of cell `c`, in cell-major storage order.
    pub fn cell_pins(&self, c: usize) -> impl Iterator<Item = PinRef> + '_ {
        let lo = self.cell_limits[c];
        let hi = self.cell_limits[c + 1];
        (lo..hi).map(move |slot| {
            let net_major_slot = self.pin_indexes[slot];
            PinRef {
                cell: c,
                net: self.net_indexes[slot],
                offset: self.pin_offsets[net_major_slot],
            }
        })
    }
}

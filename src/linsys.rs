//! Sparse symmetric linear system accumulation.
//!
//! Builders add quadratic force terms and anchors as they walk the netlist; entries are collected
//! as a triplet list (a [`CooMatrix`]) and compacted into CSR only when a solve is requested, so
//! duplicate `(i, j)` contributions from multiple nets naturally sum instead of needing an eager
//! dedup pass.

use anyhow::{ensure, Result};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// A single axis' worth of `A x = b`, under construction.
///
/// Positive-definiteness is an invariant of how builders use this type, not something enforced
/// here: every fixed cell's row must get a `(c, c, 1.0)` diagonal entry, and every movable
/// variable must end up touched by at least one force or anchor. See the model and anchor modules.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    dim: usize,
    coo: CooMatrix<f32>,
    rhs: Vec<f32>,
}

impl LinearSystem {
    /// An empty system over `dim` variables.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            coo: CooMatrix::new(dim, dim),
            rhs: vec![0.0; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// `A[i, j] += v`.
    #[inline]
    pub fn add_a(&mut self, i: usize, j: usize, v: f32) {
        self.coo.push(i, j, v);
    }

    /// `b[i] += v`.
    #[inline]
    pub fn add_b(&mut self, i: usize, v: f32) {
        self.rhs[i] += v;
    }

    pub fn rhs(&self) -> &[f32] {
        &self.rhs
    }

    /// Compact the accumulated triplets into compressed sparse row form, summing duplicate
    /// entries.
    pub fn to_csr(&self) -> CsrMatrix<f32> {
        CsrMatrix::from(&self.coo)
    }

    /// `A[i, j]` after compaction, for tests: summing every triplet at that coordinate.
    #[cfg(test)]
    pub fn entry(&self, i: usize, j: usize) -> f32 {
        self.to_csr().get_entry(i, j).map_or(0.0, |e| e.into_value())
    }

    /// Panics if `other`'s dimension does not match and merges its entries into `self`. Used by
    /// the driver to sum a wirelength model's system with one or more anchor systems.
    pub fn accumulate(&mut self, other: &LinearSystem) -> Result<()> {
        ensure!(
            self.dim == other.dim,
            "cannot accumulate a {}-dim system into a {}-dim one",
            other.dim,
            self.dim
        );
        for (i, j, v) in other.coo.triplet_iter() {
            self.add_a(i, j, *v);
        }
        for (i, v) in other.rhs.iter().enumerate() {
            self.add_b(i, *v);
        }
        Ok(())
    }
}

//! The conjugate-gradient solver boundary.
//!
//! The wirelength models and the driver only depend on the [`CgSolver`] trait; the core treats
//! the actual iterative method as an external collaborator; [`ReferenceCg`] is a small conforming
//! implementation so the rest of the crate has something real to run and test against, but a
//! hosting application is free to substitute a preconditioned or externally linked solver.

use anyhow::{ensure, Result};
use nalgebra_sparse::CsrMatrix;

use crate::linsys::LinearSystem;

/// An (approximate) solver for `A x = b`, where `A` is symmetric positive-definite.
pub trait CgSolver {
    /// Solve `system` starting from `guess`, iterating until the relative residual
    /// `‖A x − b‖ / ‖b‖` is at most `rel_tol`, or until an implementation-defined iteration budget
    /// is exhausted (in which case the best iterate found is returned).
    ///
    /// `guess.len()` must equal `system.dim()`; this is a fatal precondition violation, not a
    /// recoverable error.
    fn solve(&self, system: &LinearSystem, guess: &[f32], rel_tol: f32) -> Result<Vec<f32>>;
}

/// An unpreconditioned conjugate-gradient solver over the system's CSR form.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCg {
    pub max_iterations: usize,
}

impl ReferenceCg {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for ReferenceCg {
    fn default() -> Self {
        // Textbook guidance for SPD systems: CG converges in at most `dim` iterations in exact
        // arithmetic; this is a generous ceiling for the net sizes this crate's models produce.
        Self::new(1000)
    }
}

impl CgSolver for ReferenceCg {
    fn solve(&self, system: &LinearSystem, guess: &[f32], rel_tol: f32) -> Result<Vec<f32>> {
        let _span = tracing::info_span!("reference_cg_solve", dim = system.dim()).entered();

        let dim = system.dim();
        ensure!(
            guess.len() == dim,
            "initial guess has length {} but system has dimension {dim}",
            guess.len()
        );

        let a = system.to_csr();
        let b = system.rhs();
        let b_norm = norm(b);

        let mut x = guess.to_vec();
        let mut r = sub(b, &spmv(&a, &x));
        let mut r_norm = norm(&r);

        if b_norm == 0.0 {
            // A zero right-hand side is solved exactly by x = 0, but honor the caller's guess if
            // it already satisfies the residual criterion.
            if r_norm <= rel_tol.max(f32::EPSILON) {
                return Ok(x);
            }
        } else if r_norm <= rel_tol * b_norm {
            return Ok(x);
        }

        let mut p = r.clone();
        let mut rs_old = dot(&r, &r);

        for iter in 0..self.max_iterations.max(dim) {
            let ap = spmv(&a, &p);
            let denom = dot(&p, &ap);
            if denom.abs() < f32::EPSILON {
                log::warn!("reference CG stalled at iteration {iter} (p^T A p ~ 0)");
                break;
            }
            let alpha = rs_old / denom;

            axpy(alpha, &p, &mut x);
            axpy(-alpha, &ap, &mut r);

            r_norm = norm(&r);
            if r_norm.is_nan() || r_norm.is_infinite() {
                anyhow::bail!("reference CG produced a non-finite residual at iteration {iter}");
            }
            let converged = if b_norm == 0.0 {
                r_norm <= rel_tol.max(f32::EPSILON)
            } else {
                r_norm <= rel_tol * b_norm
            };
            if converged {
                break;
            }

            let rs_new = dot(&r, &r);
            let beta = rs_new / rs_old;
            for (p_i, r_i) in p.iter_mut().zip(r.iter()) {
                *p_i = *r_i + beta * *p_i;
            }
            rs_old = rs_new;
        }

        Ok(x)
    }
}

fn spmv(a: &CsrMatrix<f32>, x: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; a.nrows()];
    for (row, out_i) in out.iter_mut().enumerate() {
        let row_view = a.row(row);
        let mut acc = 0.0f32;
        for (&col, &v) in row_view.col_indices().iter().zip(row_view.values()) {
            acc += v * x[col];
        }
        *out_i = acc;
    }
    out
}

fn sub(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

fn axpy(alpha: f32, x: &[f32], y: &mut [f32]) {
    for (y_i, x_i) in y.iter_mut().zip(x.iter()) {
        *y_i += alpha * x_i;
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn solves_identity_system() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut sys = LinearSystem::new(2);
        sys.add_a(0, 0, 1.0);
        sys.add_a(1, 1, 1.0);
        sys.add_b(0, 3.0);
        sys.add_b(1, -4.0);

        let solver = ReferenceCg::default();
        let x = solver.solve(&sys, &[0.0, 0.0], 1e-6).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-4);
        assert_relative_eq!(x[1], -4.0, epsilon = 1e-4);
    }

    #[test]
    fn solves_small_spring_system() {
        // Two movable cells pulled together by a unit spring, each anchored weakly to 0 and 10.
        let mut sys = LinearSystem::new(2);
        sys.add_a(0, 0, 1.0 + 1.0);
        sys.add_a(1, 1, 1.0 + 1.0);
        sys.add_a(0, 1, -1.0);
        sys.add_a(1, 0, -1.0);
        sys.add_b(0, 0.0);
        sys.add_b(1, 10.0);

        let solver = ReferenceCg::default();
        let x = solver.solve(&sys, &[0.0, 10.0], 1e-6).unwrap();
        // Symmetric problem: both should land at the midpoint.
        assert_relative_eq!(x[0], 5.0, epsilon = 1e-3);
        assert_relative_eq!(x[1], 5.0, epsilon = 1e-3);
    }

    #[test]
    fn rejects_mismatched_guess_length() {
        let sys = LinearSystem::new(3);
        let solver = ReferenceCg::default();
        assert!(solver.solve(&sys, &[0.0, 0.0], 1e-6).is_err());
    }
}

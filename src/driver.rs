//! Assembles a system from a model (plus optional anchors), solves it, and writes the result back
//! into a placement.

use anyhow::Result;

use crate::geom::Point;
use crate::linsys::LinearSystem;
use crate::models::AxisPair;
use crate::netlist::Netlist;
use crate::placement::Placement;
use crate::solver::CgSolver;

fn build_guess(positions: &[Point<f32>], dim: usize, axis: impl Fn(Point<f32>) -> f32) -> Vec<f32> {
    let mut guess = vec![0.0f32; dim];
    for (c, &p) in positions.iter().enumerate() {
        guess[c] = axis(p);
    }
    guess
}

/// Solve the assembled per-axis systems and write each movable coordinate back into `placement`.
///
/// The two axes are solved in parallel via a two-task fork/join: the systems and initial guesses
/// are fully disjoint, so no synchronization is needed during the solve. Fixed coordinates are
/// left untouched regardless of what the solver returns for that row — the model's diagonal
/// pinning already keeps them near their original value, but this is a mandatory double-guard.
pub fn solve_and_writeback<S: CgSolver + Sync>(
    solver: &S,
    netlist: &Netlist,
    systems: &AxisPair<LinearSystem>,
    placement: &mut Placement,
    rel_tol: f32,
) -> Result<()> {
    let _span = tracing::info_span!("solve_and_writeback", dim_x = systems.x.dim(), dim_y = systems.y.dim()).entered();

    let guess_x = build_guess(&placement.positions, systems.x.dim(), |p| p.x);
    let guess_y = build_guess(&placement.positions, systems.y.dim(), |p| p.y);

    let (x_result, y_result) = rayon::join(
        || solver.solve(&systems.x, &guess_x, rel_tol),
        || solver.solve(&systems.y, &guess_y, rel_tol),
    );
    let x = x_result?;
    let y = y_result?;

    for c in 0..netlist.num_cells() {
        let attrs = netlist.cell_attributes(c);
        if attrs.x_movable() {
            placement.positions[c].x = x[c];
        }
        if attrs.y_movable() {
            placement.positions[c].y = y[c];
        }
    }
    log::info!(
        "solved placement for {} cells ({} movable x, {} movable y)",
        netlist.num_cells(),
        (0..netlist.num_cells()).filter(|&c| netlist.cell_attributes(c).x_movable()).count(),
        (0..netlist.num_cells()).filter(|&c| netlist.cell_attributes(c).y_movable()).count(),
    );
    Ok(())
}

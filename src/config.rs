//! Typed configuration for a placement run: the region geometry and an ordered schedule of
//! placement steps. The core builders stay pure functions of `(netlist, placement, tol, window)`;
//! `Config` just gives a hosting application somewhere typed to put per-run parameters instead of
//! ad hoc arguments or environment variables.

/// Geometry of the placement region.
#[derive(Clone, Debug)]
pub struct GeometryConfig {
    /// Surface the legalizer is expected to spread movable cells within.
    pub surface: crate::geom::Rect<i32>,
}

/// One step of a placement schedule: a wirelength pass, optionally anchored to a reference
/// placement from a previous step.
#[derive(Clone, Debug)]
pub enum PlacementStep {
    /// Unconstrained wirelength optimization: solve the model alone, with no anchor term.
    UnconstrainedWirelength {
        /// Pin count at/above which [`crate::models::ThresholdCrossover`] switches from the clique
        /// (HPWL-F) model to the reduced (HPWL-R) model.
        threshold: usize,
        /// B2B tolerance passed to the model builder.
        tol: f32,
        min_size: usize,
        max_size: usize,
        /// Relative residual tolerance passed to the CG solver.
        rel_tol: f32,
    },
    /// Wirelength pass plus a B2B-weighted anchor back to a reference (upper-bound) placement —
    /// the outer majorization-minimization step.
    AnchoredWirelength {
        threshold: usize,
        tol: f32,
        min_size: usize,
        max_size: usize,
        rel_tol: f32,
        /// Strength of the anchor term; see [`crate::anchors::linear_pulling_forces`].
        pulling_force: f32,
        min_distance: f32,
    },
}

/// An ordered list of placement steps.
#[derive(Clone, Debug)]
pub struct PlacementSchedule {
    pub schedule: Vec<PlacementStep>,
}

/// Overall placement configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub geometry: GeometryConfig,
    pub schedule: PlacementSchedule,
}

impl Config {
    /// A reasonable default schedule: one unconstrained pass to spread cells along the wirelength
    /// gradient, followed by a few anchored passes that progressively tighten the pull toward the
    /// previous iterate, mirroring the outer M-M loop's typical cooling schedule.
    pub fn with_default_schedule(surface: crate::geom::Rect<i32>) -> Self {
        Config {
            geometry: GeometryConfig { surface },
            schedule: PlacementSchedule {
                schedule: vec![
                    PlacementStep::UnconstrainedWirelength {
                        threshold: 4,
                        tol: 1e-3,
                        min_size: 2,
                        max_size: usize::MAX,
                        rel_tol: 1e-6,
                    },
                    PlacementStep::AnchoredWirelength {
                        threshold: 4,
                        tol: 1e-3,
                        min_size: 2,
                        max_size: usize::MAX,
                        rel_tol: 1e-6,
                        pulling_force: 1.0,
                        min_distance: 1e-3,
                    },
                    PlacementStep::AnchoredWirelength {
                        threshold: 4,
                        tol: 1e-3,
                        min_size: 2,
                        max_size: usize::MAX,
                        rel_tol: 1e-6,
                        pulling_force: 4.0,
                        min_distance: 1e-3,
                    },
                ],
            },
        }
    }
}

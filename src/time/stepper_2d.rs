//! SSP-RK3 time stepping of the 2D system.
//!
//! Every stage update and every convex stage combination is followed by
//! the slope limiter and the positivity scaling, so no intermediate
//! state ever leaves the admissible set. Steps are clipped so the run
//! lands exactly on every dump instant and on the final time.

use crate::boundary::{BoundarySpec2D, BoundaryTable2D, ConfigError};
use crate::equations::ShallowWater2D;
use crate::flux::BedJump;
use crate::io::SnapshotWriter;
use crate::limiters::{slope_limiter_2d, slope_modification_2d};
use crate::mesh::Mesh2D;
use crate::operators::{Geometry2D, Operators2D};
use crate::source::Rainfall;
use crate::state::{FlowField2D, ScalarField2D};

use super::{compute_residual_2d, AdaptiveTimestepper, SolverError, TimestepperConfig, WeakForm2D};

// dump instants are matched within a relative tolerance; exact float
// comparison would skip dumps after accumulated roundoff
const DUMP_REL_TOL: f64 = 1e-9;

pub struct Timestepper2D {
    mesh: Mesh2D,
    ops: Operators2D,
    geom: Geometry2D,
    bed: ScalarField2D,
    boundary: BoundaryTable2D,
    source: Rainfall,
    equation: ShallowWater2D,
    bed_jump: BedJump,
    adaptive: AdaptiveTimestepper,
}

impl Timestepper2D {
    pub fn new(
        mesh: Mesh2D,
        bed: ScalarField2D,
        source: Rainfall,
        boundary_specs: &[BoundarySpec2D],
        config: TimestepperConfig,
    ) -> Result<Self, ConfigError> {
        let min_edge = mesh.min_edge_length();
        if !(min_edge > 0.0 && min_edge.is_finite()) {
            return Err(ConfigError::DegenerateMesh { min_edge });
        }
        let boundary = BoundaryTable2D::resolve(&mesh, boundary_specs)?;
        let geom = Geometry2D::new(&mesh);
        Ok(Self {
            ops: Operators2D::new(),
            geom,
            bed,
            boundary,
            source,
            equation: ShallowWater2D::new(config.gravity),
            bed_jump: BedJump::new(config.gravity),
            adaptive: AdaptiveTimestepper::new(min_edge, config.max_dt, config.cfl, config.gravity),
            mesh,
        })
    }

    pub fn mesh(&self) -> &Mesh2D {
        &self.mesh
    }

    pub fn bed(&self) -> &ScalarField2D {
        &self.bed
    }

    /// Semi-discrete residual of the current setup.
    pub fn residual(&self, w: &FlowField2D, t: f64) -> FlowField2D {
        let form = WeakForm2D {
            equation: self.equation,
            bed_jump: self.bed_jump,
            bed: &self.bed,
            boundary: &self.boundary,
            source: &self.source,
        };
        compute_residual_2d(w, &self.mesh, &self.ops, &self.geom, &form, t)
    }

    /// Slope limiting followed by positivity scaling.
    pub fn stabilize(&self, w: &mut FlowField2D) {
        slope_limiter_2d(w, &self.mesh, &self.ops, &self.bed);
        slope_modification_2d(w, &self.ops);
    }

    /// One SSP-RK3 step of size `dt` from time `t`, stabilizing after
    /// every stage and combination.
    pub fn step(&self, w: &mut FlowField2D, dt: f64, t: f64) {
        let w_old = w.clone();

        // stage 1: w <- w_old + dt R(w_old)
        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);

        // stage 2: w <- 3/4 w_old + 1/4 (w + dt R(w))
        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);
        w.combine(0.25, 0.75, &w_old);
        self.stabilize(w);

        // stage 3: w <- 1/3 w_old + 2/3 (w + dt R(w))
        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);
        w.combine(2.0 / 3.0, 1.0 / 3.0, &w_old);
        self.stabilize(w);
    }

    /// Run from `t_start` to `t_end`, writing a snapshot every `t_dump`
    /// time units. Returns the final state.
    pub fn stepper(
        &self,
        t_start: f64,
        t_end: f64,
        mut w: FlowField2D,
        t_dump: f64,
        writer: &mut SnapshotWriter,
    ) -> Result<FlowField2D, SolverError> {
        // a nonpositive interval would pin next_dump at t_start and the
        // clipped dt at zero, so the loop could never advance
        if !(t_dump > 0.0) {
            return Err(ConfigError::InvalidDumpInterval { t_dump }.into());
        }

        // the initial condition may dip below the bed; clip it first
        slope_modification_2d(&mut w, &self.ops);

        writer.write_bed(&self.mesh, &self.bed)?;
        writer.write_flow(&self.mesh, &w, &self.bed, t_start)?;

        let tol = DUMP_REL_TOL * t_dump;
        let mut t = t_start;
        let mut next_dump = t_start + t_dump;

        while t < t_end - tol {
            let mut dt = self.adaptive.timestep_2d(&w);
            if t + dt > next_dump {
                dt = next_dump - t;
            }
            if t + dt > t_end {
                dt = t_end - t;
            }

            self.step(&mut w, dt, t);
            t += dt;

            // positivity scaling leaves the minimum depth at exactly
            // zero, so anything clearly negative means a blown-up run
            if !w.is_finite() || w.min_depth() < -1e-12 {
                return Err(SolverError::NonFiniteState { time: t });
            }

            if (t - next_dump).abs() <= tol {
                writer.write_flow(&self.mesh, &w, &self.bed, t)?;
                next_dump += t_dump;
            }
        }

        Ok(w)
    }
}

//! SSP-RK3 time stepping of the 1D system.

use crate::boundary::{BoundarySpec1D, BoundaryTable1D, ConfigError};
use crate::equations::ShallowWater1D;
use crate::flux::BedJump;
use crate::io::ProfileWriter;
use crate::limiters::{slope_limiter_1d, slope_modification_1d};
use crate::mesh::Mesh1D;
use crate::operators::{Geometry1D, Operators1D};
use crate::source::Rainfall;
use crate::state::{FlowField1D, ScalarField1D};

use super::{compute_residual_1d, AdaptiveTimestepper, SolverError, TimestepperConfig, WeakForm1D};

const DUMP_REL_TOL: f64 = 1e-9;

pub struct Timestepper1D {
    mesh: Mesh1D,
    ops: Operators1D,
    geom: Geometry1D,
    bed: ScalarField1D,
    boundary: BoundaryTable1D,
    source: Rainfall,
    equation: ShallowWater1D,
    bed_jump: BedJump,
    adaptive: AdaptiveTimestepper,
}

impl Timestepper1D {
    pub fn new(
        mesh: Mesh1D,
        bed: ScalarField1D,
        source: Rainfall,
        boundary_specs: &[BoundarySpec1D],
        config: TimestepperConfig,
    ) -> Result<Self, ConfigError> {
        let min_edge = mesh.min_edge_length();
        if !(min_edge > 0.0 && min_edge.is_finite()) {
            return Err(ConfigError::DegenerateMesh { min_edge });
        }
        let boundary = BoundaryTable1D::resolve(&mesh, boundary_specs)?;
        let geom = Geometry1D::new(&mesh);
        Ok(Self {
            ops: Operators1D::new(),
            geom,
            bed,
            boundary,
            source,
            equation: ShallowWater1D::new(config.gravity),
            bed_jump: BedJump::new(config.gravity),
            adaptive: AdaptiveTimestepper::new(min_edge, config.max_dt, config.cfl, config.gravity),
            mesh,
        })
    }

    pub fn mesh(&self) -> &Mesh1D {
        &self.mesh
    }

    pub fn residual(&self, w: &FlowField1D, t: f64) -> FlowField1D {
        let form = WeakForm1D {
            equation: self.equation,
            bed_jump: self.bed_jump,
            bed: &self.bed,
            boundary: &self.boundary,
            source: &self.source,
        };
        compute_residual_1d(w, &self.mesh, &self.ops, &self.geom, &form, t)
    }

    pub fn stabilize(&self, w: &mut FlowField1D) {
        slope_limiter_1d(w, &self.mesh, &self.ops, &self.bed);
        slope_modification_1d(w, &self.ops);
    }

    /// One SSP-RK3 step of size `dt` from time `t`.
    pub fn step(&self, w: &mut FlowField1D, dt: f64, t: f64) {
        let w_old = w.clone();

        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);

        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);
        w.combine(0.25, 0.75, &w_old);
        self.stabilize(w);

        let r = self.residual(w, t);
        w.axpy(dt, &r);
        self.stabilize(w);
        w.combine(2.0 / 3.0, 1.0 / 3.0, &w_old);
        self.stabilize(w);
    }

    /// Run from `t_start` to `t_end`, writing a profile every `t_dump`
    /// time units. Returns the final state.
    pub fn stepper(
        &self,
        t_start: f64,
        t_end: f64,
        mut w: FlowField1D,
        t_dump: f64,
        writer: &mut ProfileWriter,
    ) -> Result<FlowField1D, SolverError> {
        // a nonpositive interval would pin next_dump at t_start and the
        // clipped dt at zero, so the loop could never advance
        if !(t_dump > 0.0) {
            return Err(ConfigError::InvalidDumpInterval { t_dump }.into());
        }

        slope_modification_1d(&mut w, &self.ops);
        writer.write_profile(&self.mesh, &w, &self.bed, t_start)?;

        let tol = DUMP_REL_TOL * t_dump;
        let mut t = t_start;
        let mut next_dump = t_start + t_dump;

        while t < t_end - tol {
            let mut dt = self.adaptive.timestep_1d(&w);
            if t + dt > next_dump {
                dt = next_dump - t;
            }
            if t + dt > t_end {
                dt = t_end - t;
            }

            self.step(&mut w, dt, t);
            t += dt;

            if !w.is_finite() || w.min_depth() < -1e-12 {
                return Err(SolverError::NonFiniteState { time: t });
            }

            if (t - next_dump).abs() <= tol {
                writer.write_profile(&self.mesh, &w, &self.bed, t)?;
                next_dump += t_dump;
            }
        }

        Ok(w)
    }
}

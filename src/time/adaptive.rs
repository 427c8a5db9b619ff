//! CFL-bounded adaptive timestep selection.

use crate::equations::{ShallowWater1D, ShallowWater2D};
use crate::operators::{N_NODES_1D, N_NODES_2D};
use crate::state::{FlowField1D, FlowField2D};

/// Picks `dt = cfl * min_edge / max_wave_speed`, clamped to `max_dt`.
/// A motionless dry domain has no wave speed and gets `max_dt`.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveTimestepper {
    min_edge: f64,
    max_dt: f64,
    cfl: f64,
    g: f64,
}

impl AdaptiveTimestepper {
    pub fn new(min_edge: f64, max_dt: f64, cfl: f64, g: f64) -> Self {
        Self {
            min_edge,
            max_dt,
            cfl,
            g,
        }
    }

    pub fn timestep_1d(&self, w: &FlowField1D) -> f64 {
        let eq = ShallowWater1D::new(self.g);
        let mut speed = 0.0f64;
        for k in 0..w.n_elements() {
            for i in 0..N_NODES_1D {
                speed = speed.max(eq.wave_speed(&w.flow(k, i)));
            }
        }
        self.bound(speed)
    }

    pub fn timestep_2d(&self, w: &FlowField2D) -> f64 {
        let eq = ShallowWater2D::new(self.g);
        let mut speed = 0.0f64;
        for k in 0..w.n_elements() {
            for i in 0..N_NODES_2D {
                speed = speed.max(eq.wave_speed(&w.flow(k, i)));
            }
        }
        self.bound(speed)
    }

    fn bound(&self, max_speed: f64) -> f64 {
        if max_speed <= f64::EPSILON {
            self.max_dt
        } else {
            (self.cfl * self.min_edge / max_speed).min(self.max_dt)
        }
    }
}

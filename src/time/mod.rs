//! Time integration: adaptive CFL stepping, residual assembly and the
//! SSP-RK3 stepping protocol.

mod adaptive;
mod residual_1d;
mod residual_2d;
mod stepper_1d;
mod stepper_2d;

pub use adaptive::AdaptiveTimestepper;
pub use residual_1d::{compute_residual_1d, WeakForm1D};
pub use residual_2d::{compute_residual_2d, WeakForm2D};
pub use stepper_1d::Timestepper1D;
pub use stepper_2d::Timestepper2D;

use thiserror::Error;

use crate::boundary::ConfigError;
use crate::equations::GRAVITY;
use crate::io::VtkError;

/// Time stepping failure.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("state lost finiteness at t = {time}")]
    NonFiniteState { time: f64 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] VtkError),
}

/// Stepper parameters.
#[derive(Debug, Clone, Copy)]
pub struct TimestepperConfig {
    pub gravity: f64,
    /// Upper bound on every step, also the fallback step on a fully
    /// dry domain.
    pub max_dt: f64,
    /// CFL safety factor applied to `min_edge / max_wave_speed`.
    pub cfl: f64,
}

impl TimestepperConfig {
    pub fn new(max_dt: f64) -> Self {
        Self {
            gravity: GRAVITY,
            max_dt,
            cfl: 0.3,
        }
    }

    pub fn with_gravity(mut self, g: f64) -> Self {
        self.gravity = g;
        self
    }

    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }
}

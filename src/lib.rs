//! flood-dg: a positivity-preserving, well-balanced discontinuous
//! Galerkin shallow water solver with wetting and drying.
//!
//! The solver advances the conserved variables (water depth and
//! momentum) on uniform 1D and 2D meshes with linear elements collocated
//! at Gauss-Lobatto points, a local Lax-Friedrichs flux with hydrostatic
//! trace reconstruction over bed jumps, and SSP-RK3 time stepping made
//! admissibility preserving by running a TVD slope limiter and a
//! positivity scaling after every stage.
//!
//! # Example
//!
//! Rain falling into a parabolic bowl:
//!
//! ```no_run
//! use flood_dg::prelude::*;
//!
//! # fn main() -> Result<(), flood_dg::time::SolverError> {
//! let mesh = Mesh2D::unit_square(10);
//! let ops = Operators2D::new();
//! let bed = ScalarField2D::interpolate(&mesh, &ops, |x, y| {
//!     2.0 * ((x - 0.5).powi(2) + (y - 0.5).powi(2))
//! });
//! let w = FlowField2D::from_fn(&mesh, &ops, |x, y| {
//!     let b = 2.0 * ((x - 0.5).powi(2) + (y - 0.5).powi(2));
//!     Flow2D::new(0.5 - b, 0.0, 0.0)
//! });
//! let stepper = Timestepper2D::new(
//!     mesh,
//!     bed,
//!     Rainfall::constant(0.2),
//!     &[],
//!     TimestepperConfig::new(0.025),
//! )?;
//! let mut writer = SnapshotWriter::new("out", "h");
//! let final_state = stepper.stepper(0.0, 2.0, w, 0.025, &mut writer)?;
//! # let _ = final_state;
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod diagnostics;
pub mod equations;
pub mod flux;
pub mod io;
pub mod limiters;
pub mod mesh;
pub mod operators;
pub mod source;
pub mod state;
pub mod time;

/// The names most runs need.
pub mod prelude {
    pub use crate::boundary::{BcOption, BoundarySpec1D, BoundarySpec2D, ConfigError};
    pub use crate::equations::{ShallowWater1D, ShallowWater2D, GRAVITY};
    pub use crate::io::{ProfileWriter, SnapshotWriter};
    pub use crate::mesh::{Mesh1D, Mesh2D};
    pub use crate::operators::{Operators1D, Operators2D};
    pub use crate::source::Rainfall;
    pub use crate::state::{
        Flow1D, Flow2D, FlowField1D, FlowField2D, ScalarField1D, ScalarField2D,
    };
    pub use crate::time::{
        SolverError, Timestepper1D, Timestepper2D, TimestepperConfig,
    };
}

//! Simulation output: VTU snapshots in 2D, CSV profiles in 1D.

mod profile;
mod vtk;

pub use profile::ProfileWriter;
pub use vtk::{SnapshotWriter, VtkError};

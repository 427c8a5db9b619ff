//! Discrete state: per-element nodal storage and the flow variables.

mod field;
mod flow;

pub use field::NodalField;
pub use flow::{Flow1D, Flow2D, H_DRY};

use crate::operators::{N_NODES_1D, N_NODES_2D};

/// Scalar DG field on the interval mesh (bed elevation, rain rate).
pub type ScalarField1D = NodalField<1, N_NODES_1D>;

/// Scalar DG field on the rectangle mesh.
pub type ScalarField2D = NodalField<1, N_NODES_2D>;

/// Flow state `(h, mu)` on the interval mesh.
pub type FlowField1D = NodalField<2, N_NODES_1D>;

/// Flow state `(h, mu, mv)` on the rectangle mesh.
pub type FlowField2D = NodalField<3, N_NODES_2D>;

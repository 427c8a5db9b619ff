//! Structured meshes for the 1D interval and the 2D rectangle.
//!
//! Elements are axis aligned and uniformly sized. Exterior facets carry
//! integer markers compatible with the usual rectangle numbering:
//! 1 = left, 2 = right, 3 = bottom, 4 = top (1D uses only 1 and 2).

mod mesh1d;
mod mesh2d;

pub use mesh1d::Mesh1D;
pub use mesh2d::{FaceId, Mesh2D};

/// Exterior facet marker.
pub type Marker = u32;

/// Markers present on a 1D interval mesh.
pub const MARKERS_1D: [Marker; 2] = [1, 2];

/// Markers present on a 2D rectangle mesh.
pub const MARKERS_2D: [Marker; 4] = [1, 2, 3, 4];

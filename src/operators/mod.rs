//! Reference-element operators for the collocated P1 discretization.
//!
//! Differentiation matrices are assembled as `D = Vr * V^{-1}` from the
//! Vandermonde pair. With GLL collocation the mass matrix is diagonal, so
//! the lift operator reduces to a per-node scale factor and every stage
//! update of the time integrator is explicit.

pub mod basis;
mod geometry;

pub use geometry::{Geometry1D, Geometry2D};

use basis::{Vandermonde1D, Vandermonde2D, GLL_NODES_1D, GLL_WEIGHTS_1D};
use faer::Mat;

/// Nodes per 1D element.
pub const N_NODES_1D: usize = 2;

/// Nodes per 2D element.
pub const N_NODES_2D: usize = 4;

/// Local node indices on each face of the quadrilateral, ordered by
/// ascending global coordinate along the face. Both elements sharing a
/// face therefore list the coinciding nodes in the same order, so face
/// node `i` on one side matches face node `i` on the other.
pub const FACE_NODES_2D: [[usize; 2]; 4] = [
    [0, 1], // bottom
    [1, 3], // right
    [2, 3], // top
    [0, 2], // left
];

/// Outward unit normals of the reference quadrilateral faces.
pub const FACE_NORMALS_2D: [(f64, f64); 4] = [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];

/// Local node on each face of the 1D element and its outward normal.
pub const FACE_NODES_1D: [usize; 2] = [0, 1];
pub const FACE_NORMALS_1D: [f64; 2] = [-1.0, 1.0];

/// Reference operators for the linear interval element.
pub struct Operators1D {
    pub nodes: [f64; N_NODES_1D],
    pub weights: [f64; N_NODES_1D],
    dr: Mat<f64>,
}

impl Operators1D {
    pub fn new() -> Self {
        let vand = Vandermonde1D::new(&GLL_NODES_1D);
        let dr = matmul(&vand.vr, &vand.v_inv);
        Self {
            nodes: GLL_NODES_1D,
            weights: GLL_WEIGHTS_1D,
            dr,
        }
    }

    /// Reference derivative of nodal values.
    pub fn derivative(&self, values: &[f64; N_NODES_1D]) -> [f64; N_NODES_1D] {
        let mut out = [0.0; N_NODES_1D];
        for (i, o) in out.iter_mut().enumerate() {
            for (j, v) in values.iter().enumerate() {
                *o += self.dr[(i, j)] * v;
            }
        }
        out
    }
}

impl Default for Operators1D {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference operators for the bilinear quadrilateral element.
pub struct Operators2D {
    /// Reference coordinates of node `k`, tensor ordered with `r` fastest.
    pub nodes: [(f64, f64); N_NODES_2D],
    /// Tensor-product GLL weights.
    pub weights: [f64; N_NODES_2D],
    dr: Mat<f64>,
    ds: Mat<f64>,
}

impl Operators2D {
    pub fn new() -> Self {
        let vand = Vandermonde2D::new();
        let dr = matmul(&vand.vr, &vand.v_inv);
        let ds = matmul(&vand.vs, &vand.v_inv);
        let mut nodes = [(0.0, 0.0); N_NODES_2D];
        let mut weights = [0.0; N_NODES_2D];
        for k in 0..N_NODES_2D {
            nodes[k] = (GLL_NODES_1D[k % 2], GLL_NODES_1D[k / 2]);
            weights[k] = GLL_WEIGHTS_1D[k % 2] * GLL_WEIGHTS_1D[k / 2];
        }
        Self {
            nodes,
            weights,
            dr,
            ds,
        }
    }

    /// Reference `r` derivative of nodal values.
    pub fn derivative_r(&self, values: &[f64; N_NODES_2D]) -> [f64; N_NODES_2D] {
        apply(&self.dr, values)
    }

    /// Reference `s` derivative of nodal values.
    pub fn derivative_s(&self, values: &[f64; N_NODES_2D]) -> [f64; N_NODES_2D] {
        apply(&self.ds, values)
    }
}

impl Default for Operators2D {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(d: &Mat<f64>, values: &[f64; N_NODES_2D]) -> [f64; N_NODES_2D] {
    let mut out = [0.0; N_NODES_2D];
    for (i, o) in out.iter_mut().enumerate() {
        for (j, v) in values.iter().enumerate() {
            *o += d[(i, j)] * v;
        }
    }
    out
}

fn matmul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    let (m, n, p) = (a.nrows(), b.ncols(), a.ncols());
    let mut out = Mat::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..p {
                acc += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = acc;
        }
    }
    out
}

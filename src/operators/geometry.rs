//! Affine geometric factors of the uniform meshes.
//!
//! Every element of a uniform mesh shares the same Jacobian, so the
//! factors are stored once instead of per element.

use crate::mesh::{Mesh1D, Mesh2D};

use super::basis::GLL_WEIGHTS_1D;
use super::FACE_NORMALS_2D;

/// Metric terms of the 1D affine map `x = x_l + (r + 1) dx / 2`.
pub struct Geometry1D {
    /// Jacobian determinant `dx / 2`.
    pub det_j: f64,
    /// `dr/dx = 2 / dx`.
    pub rx: f64,
    /// Lift scale `1 / (w_i * det_j)` applied to face residuals.
    pub lift: f64,
}

impl Geometry1D {
    pub fn new(mesh: &Mesh1D) -> Self {
        let det_j = 0.5 * mesh.dx();
        Self {
            det_j,
            rx: 1.0 / det_j,
            lift: 1.0 / (GLL_WEIGHTS_1D[0] * det_j),
        }
    }
}

/// Metric terms of the 2D affine map of an axis-aligned rectangle.
pub struct Geometry2D {
    /// Jacobian determinant `dx * dy / 4`.
    pub det_j: f64,
    /// `dr/dx = 2 / dx`.
    pub rx: f64,
    /// `ds/dy = 2 / dy`.
    pub sy: f64,
    /// Surface Jacobian of each face (half its physical length).
    pub face_sj: [f64; 4],
    /// Lift scale `sJ / (w * det_j)` of each face.
    pub lift: [f64; 4],
    /// Outward unit normal of each face.
    pub normals: [(f64, f64); 4],
}

impl Geometry2D {
    pub fn new(mesh: &Mesh2D) -> Self {
        let det_j = 0.25 * mesh.dx() * mesh.dy();
        let face_sj = [
            0.5 * mesh.dx(),
            0.5 * mesh.dy(),
            0.5 * mesh.dx(),
            0.5 * mesh.dy(),
        ];
        let mut lift = [0.0; 4];
        for f in 0..4 {
            lift[f] = face_sj[f] / (GLL_WEIGHTS_1D[0] * det_j);
        }
        Self {
            det_j,
            rx: 2.0 / mesh.dx(),
            sy: 2.0 / mesh.dy(),
            face_sj,
            lift,
            normals: FACE_NORMALS_2D,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn geometry_1d_factors() {
        let mesh = Mesh1D::interval(0.0, 1.0, 10);
        let geom = Geometry1D::new(&mesh);
        assert!((geom.det_j - 0.05).abs() < TOL);
        assert!((geom.rx - 20.0).abs() < TOL);
        assert!((geom.lift - 20.0).abs() < TOL);
    }

    #[test]
    fn geometry_2d_factors() {
        let mesh = Mesh2D::rectangle(0.0, 1.0, 0.0, 2.0, 10, 10);
        let geom = Geometry2D::new(&mesh);
        assert!((geom.det_j - 0.005).abs() < TOL);
        assert!((geom.rx - 20.0).abs() < TOL);
        assert!((geom.sy - 10.0).abs() < TOL);
        // bottom face spans dx = 0.1, so sJ = 0.05 and lift = sJ / det_j
        assert!((geom.face_sj[0] - 0.05).abs() < TOL);
        assert!((geom.lift[0] - 10.0).abs() < TOL);
        // right face spans dy = 0.2
        assert!((geom.face_sj[1] - 0.1).abs() < TOL);
        assert!((geom.lift[1] - 20.0).abs() < TOL);
    }

    #[test]
    fn element_area_from_quadrature() {
        let mesh = Mesh2D::unit_square(4);
        let geom = Geometry2D::new(&mesh);
        let area: f64 = (0..4).map(|_| geom.det_j).sum();
        assert!((area - 0.0625).abs() < TOL);
    }
}

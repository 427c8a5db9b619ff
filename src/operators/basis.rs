//! Linear nodal basis on Gauss-Lobatto-Legendre collocation points.
//!
//! The P1 element uses the two-point GLL rule per direction, so the nodes
//! coincide with the element vertices and the collocated mass matrix is
//! diagonal. Modal coefficients use normalized Legendre polynomials, which
//! makes the Vandermonde matrix well conditioned.

use faer::{linalg::solvers::Solve, Mat};

/// 1D GLL nodes for the linear element.
pub const GLL_NODES_1D: [f64; 2] = [-1.0, 1.0];

/// 1D GLL quadrature weights for the two-point rule.
pub const GLL_WEIGHTS_1D: [f64; 2] = [1.0, 1.0];

/// Normalized Legendre polynomial value and derivative at `r`.
///
/// Normalization is chosen so that the polynomials are orthonormal on
/// `[-1, 1]`: `∫ φ_i φ_j dr = δ_ij`.
pub fn legendre_norm(degree: usize, r: f64) -> (f64, f64) {
    match degree {
        0 => ((0.5f64).sqrt(), 0.0),
        1 => ((1.5f64).sqrt() * r, (1.5f64).sqrt()),
        _ => unreachable!("linear basis carries degrees 0 and 1 only"),
    }
}

/// Vandermonde matrix `V[k, m] = φ_m(r_k)` together with its derivative
/// counterpart and inverse, for the given node set.
pub struct Vandermonde1D {
    pub v: Mat<f64>,
    pub v_inv: Mat<f64>,
    pub vr: Mat<f64>,
}

impl Vandermonde1D {
    pub fn new(nodes: &[f64]) -> Self {
        let n = nodes.len();
        let mut v = Mat::zeros(n, n);
        let mut vr = Mat::zeros(n, n);
        for (k, &r) in nodes.iter().enumerate() {
            for m in 0..n {
                let (p, dp) = legendre_norm(m, r);
                v[(k, m)] = p;
                vr[(k, m)] = dp;
            }
        }
        let v_inv = invert(&v);
        Self { v, v_inv, vr }
    }
}

/// Tensor-product Vandermonde for the bilinear quadrilateral element.
///
/// Mode `m = j * 2 + i` is `φ_i(r) φ_j(s)`; node `k = j * 2 + i` sits at
/// `(GLL_NODES_1D[i], GLL_NODES_1D[j])`.
pub struct Vandermonde2D {
    pub v: Mat<f64>,
    pub v_inv: Mat<f64>,
    pub vr: Mat<f64>,
    pub vs: Mat<f64>,
}

impl Vandermonde2D {
    pub fn new() -> Self {
        let n = 4;
        let mut v = Mat::zeros(n, n);
        let mut vr = Mat::zeros(n, n);
        let mut vs = Mat::zeros(n, n);
        for k in 0..n {
            let (r, s) = (GLL_NODES_1D[k % 2], GLL_NODES_1D[k / 2]);
            for m in 0..n {
                let (pi, dpi) = legendre_norm(m % 2, r);
                let (pj, dpj) = legendre_norm(m / 2, s);
                v[(k, m)] = pi * pj;
                vr[(k, m)] = dpi * pj;
                vs[(k, m)] = pi * dpj;
            }
        }
        let v_inv = invert(&v);
        Self { v, v_inv, vs, vr }
    }
}

impl Default for Vandermonde2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Invert a square matrix by solving `A X = I` column by column with a
/// full-pivot LU factorization.
fn invert(a: &Mat<f64>) -> Mat<f64> {
    let n = a.nrows();
    let lu = a.as_ref().full_piv_lu();
    let mut inv = Mat::zeros(n, n);
    for col in 0..n {
        let mut rhs = Mat::zeros(n, 1);
        rhs[(col, 0)] = 1.0;
        let solution = lu.solve(&rhs);
        for row in 0..n {
            inv[(row, col)] = solution[(row, 0)];
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-13;

    #[test]
    fn legendre_orthonormal_under_gll_weights() {
        // The two-point GLL rule integrates degree <= 1 exactly, which
        // covers phi_0 * phi_0 and phi_0 * phi_1.
        for (i, j, expected) in [(0, 0, 1.0), (0, 1, 0.0)] {
            let mut acc = 0.0;
            for (node, w) in GLL_NODES_1D.iter().zip(GLL_WEIGHTS_1D) {
                acc += w * legendre_norm(i, *node).0 * legendre_norm(j, *node).0;
            }
            assert!((acc - expected).abs() < TOL, "({i},{j}): got {acc}");
        }
    }

    #[test]
    fn vandermonde_1d_inverse() {
        let vand = Vandermonde1D::new(&GLL_NODES_1D);
        for i in 0..2 {
            for j in 0..2 {
                let mut acc = 0.0;
                for k in 0..2 {
                    acc += vand.v[(i, k)] * vand.v_inv[(k, j)];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((acc - expected).abs() < TOL);
            }
        }
    }

    #[test]
    fn vandermonde_2d_inverse() {
        let vand = Vandermonde2D::new();
        for i in 0..4 {
            for j in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += vand.v[(i, k)] * vand.v_inv[(k, j)];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((acc - expected).abs() < TOL);
            }
        }
    }
}

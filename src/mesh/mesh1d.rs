use super::Marker;

/// Uniform 1D interval mesh.
///
/// Element `k` spans `[x0 + k*dx, x0 + (k+1)*dx]`. The left boundary carries
/// marker 1 and the right boundary marker 2.
#[derive(Debug, Clone)]
pub struct Mesh1D {
    x0: f64,
    dx: f64,
    n_elements: usize,
}

impl Mesh1D {
    /// Uniform mesh of `n_elements` cells over `[x0, x1]`.
    pub fn interval(x0: f64, x1: f64, n_elements: usize) -> Self {
        assert!(n_elements > 0, "mesh needs at least one element");
        assert!(x1 > x0, "interval must have positive length");
        Self {
            x0,
            dx: (x1 - x0) / n_elements as f64,
            n_elements,
        }
    }

    /// Uniform mesh of the unit interval.
    pub fn unit_interval(n_elements: usize) -> Self {
        Self::interval(0.0, 1.0, n_elements)
    }

    pub fn n_elements(&self) -> usize {
        self.n_elements
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Shortest edge of the mesh (constant for a uniform mesh).
    pub fn min_edge_length(&self) -> f64 {
        self.dx
    }

    /// Left vertex coordinate of element `k`.
    pub fn element_left(&self, k: usize) -> f64 {
        self.x0 + k as f64 * self.dx
    }

    /// Physical coordinate of reference point `r` in `[-1, 1]` within element `k`.
    pub fn map_to_physical(&self, k: usize, r: f64) -> f64 {
        self.element_left(k) + 0.5 * (r + 1.0) * self.dx
    }

    /// Neighbor across a face: `face` 0 is the left face, 1 the right.
    /// Returns `None` on the domain boundary.
    pub fn neighbor(&self, k: usize, face: usize) -> Option<usize> {
        match face {
            0 if k > 0 => Some(k - 1),
            1 if k + 1 < self.n_elements => Some(k + 1),
            _ => None,
        }
    }

    /// Marker of an exterior face, `None` for interior faces.
    pub fn boundary_marker(&self, k: usize, face: usize) -> Option<Marker> {
        match face {
            0 if k == 0 => Some(1),
            1 if k + 1 == self.n_elements => Some(2),
            _ => None,
        }
    }
}

use super::Marker;

/// Local face numbering of a quadrilateral element:
/// 0 = bottom, 1 = right, 2 = top, 3 = left.
pub type FaceId = usize;

/// Uniform structured quadrilateral mesh of an axis-aligned rectangle.
///
/// Element `(i, j)` has linear index `j * nx + i` with `i` running fastest
/// in `x`. Exterior facets are marked 1 = left, 2 = right, 3 = bottom,
/// 4 = top.
#[derive(Debug, Clone)]
pub struct Mesh2D {
    x0: f64,
    y0: f64,
    dx: f64,
    dy: f64,
    nx: usize,
    ny: usize,
}

impl Mesh2D {
    /// Uniform `nx * ny` mesh over the rectangle `[x0, x1] x [y0, y1]`.
    pub fn rectangle(x0: f64, x1: f64, y0: f64, y1: f64, nx: usize, ny: usize) -> Self {
        assert!(nx > 0 && ny > 0, "mesh needs at least one element per direction");
        assert!(x1 > x0 && y1 > y0, "rectangle must have positive area");
        Self {
            x0,
            y0,
            dx: (x1 - x0) / nx as f64,
            dy: (y1 - y0) / ny as f64,
            nx,
            ny,
        }
    }

    /// Uniform `n * n` mesh of the unit square.
    pub fn unit_square(n: usize) -> Self {
        Self::rectangle(0.0, 1.0, 0.0, 1.0, n, n)
    }

    pub fn n_elements(&self) -> usize {
        self.nx * self.ny
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Shortest edge of the mesh.
    pub fn min_edge_length(&self) -> f64 {
        self.dx.min(self.dy)
    }

    /// Grid coordinates `(i, j)` of element `k`.
    pub fn grid_index(&self, k: usize) -> (usize, usize) {
        (k % self.nx, k / self.nx)
    }

    /// Lower-left vertex of element `k`.
    pub fn element_origin(&self, k: usize) -> (f64, f64) {
        let (i, j) = self.grid_index(k);
        (self.x0 + i as f64 * self.dx, self.y0 + j as f64 * self.dy)
    }

    /// Physical coordinates of reference point `(r, s)` in `[-1, 1]^2`
    /// within element `k`.
    pub fn map_to_physical(&self, k: usize, r: f64, s: f64) -> (f64, f64) {
        let (ox, oy) = self.element_origin(k);
        (ox + 0.5 * (r + 1.0) * self.dx, oy + 0.5 * (s + 1.0) * self.dy)
    }

    /// Neighbor across a local face, `None` on the domain boundary.
    pub fn neighbor(&self, k: usize, face: FaceId) -> Option<usize> {
        let (i, j) = self.grid_index(k);
        match face {
            0 if j > 0 => Some(k - self.nx),
            1 if i + 1 < self.nx => Some(k + 1),
            2 if j + 1 < self.ny => Some(k + self.nx),
            3 if i > 0 => Some(k - 1),
            _ => None,
        }
    }

    /// Marker of an exterior face, `None` for interior faces.
    pub fn boundary_marker(&self, k: usize, face: FaceId) -> Option<Marker> {
        let (i, j) = self.grid_index(k);
        match face {
            3 if i == 0 => Some(1),
            1 if i + 1 == self.nx => Some(2),
            0 if j == 0 => Some(3),
            2 if j + 1 == self.ny => Some(4),
            _ => None,
        }
    }

    /// Face of the neighboring element that coincides with `face`.
    pub fn opposite_face(face: FaceId) -> FaceId {
        match face {
            0 => 2,
            1 => 3,
            2 => 0,
            3 => 1,
            _ => unreachable!("quadrilateral has four faces"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_layout() {
        let mesh = Mesh2D::unit_square(3);
        assert_eq!(mesh.n_elements(), 9);
        assert!((mesh.dx() - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(mesh.grid_index(5), (2, 1));
    }

    #[test]
    fn neighbor_connectivity() {
        let mesh = Mesh2D::unit_square(3);
        // middle element has all four neighbors
        assert_eq!(mesh.neighbor(4, 0), Some(1));
        assert_eq!(mesh.neighbor(4, 1), Some(5));
        assert_eq!(mesh.neighbor(4, 2), Some(7));
        assert_eq!(mesh.neighbor(4, 3), Some(3));
        // corner element
        assert_eq!(mesh.neighbor(0, 0), None);
        assert_eq!(mesh.neighbor(0, 3), None);
        assert_eq!(mesh.neighbor(0, 1), Some(1));
        assert_eq!(mesh.neighbor(0, 2), Some(3));
    }

    #[test]
    fn boundary_markers_match_rectangle_convention() {
        let mesh = Mesh2D::unit_square(2);
        assert_eq!(mesh.boundary_marker(0, 3), Some(1)); // left
        assert_eq!(mesh.boundary_marker(1, 1), Some(2)); // right
        assert_eq!(mesh.boundary_marker(1, 0), Some(3)); // bottom
        assert_eq!(mesh.boundary_marker(2, 2), Some(4)); // top
        assert_eq!(mesh.boundary_marker(0, 1), None);
    }

    #[test]
    fn neighbors_are_symmetric() {
        let mesh = Mesh2D::rectangle(0.0, 2.0, 0.0, 1.0, 4, 3);
        for k in 0..mesh.n_elements() {
            for face in 0..4 {
                if let Some(nb) = mesh.neighbor(k, face) {
                    let back = Mesh2D::opposite_face(face);
                    assert_eq!(mesh.neighbor(nb, back), Some(k));
                }
            }
        }
    }

    #[test]
    fn min_edge_on_anisotropic_mesh() {
        let mesh = Mesh2D::rectangle(0.0, 1.0, 0.0, 1.0, 10, 2);
        assert!((mesh.min_edge_length() - 0.1).abs() < 1e-15);
    }
}

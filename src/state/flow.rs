use super::{FlowField1D, FlowField2D, ScalarField1D, ScalarField2D};
use crate::mesh::{Mesh1D, Mesh2D};
use crate::operators::{Operators1D, Operators2D, N_NODES_1D, N_NODES_2D};

/// Depths at or below this tolerance are treated as dry.
///
/// A draining node can reach depths many orders of magnitude below any
/// physical water layer while still carrying leftover momentum; dividing
/// momentum by such a depth manufactures enormous velocities that
/// collapse the CFL timestep. Everything velocity-like goes through this
/// cutoff instead of comparing against exact zero.
pub const H_DRY: f64 = 1e-6;

/// Conserved shallow water state in 1D: depth and momentum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flow1D {
    pub h: f64,
    pub mu: f64,
}

impl Flow1D {
    pub const fn new(h: f64, mu: f64) -> Self {
        Self { h, mu }
    }

    pub const fn dry() -> Self {
        Self { h: 0.0, mu: 0.0 }
    }

    /// Velocity, desingularized near the dry tolerance.
    ///
    /// Wet nodes (`h >= H_DRY`) see exactly `mu / h`; thinner films get
    /// `2 h mu / (h^2 + H_DRY^2)`, which decays to zero with the depth
    /// instead of diverging.
    pub fn velocity(&self) -> f64 {
        if self.h <= 0.0 {
            return 0.0;
        }
        let h_reg = self.h.max(H_DRY);
        let factor = 2.0 * self.h / (self.h * self.h + h_reg * h_reg);
        self.mu * factor
    }
}

/// Conserved shallow water state in 2D: depth and both momenta.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flow2D {
    pub h: f64,
    pub mu: f64,
    pub mv: f64,
}

impl Flow2D {
    pub const fn new(h: f64, mu: f64, mv: f64) -> Self {
        Self { h, mu, mv }
    }

    pub const fn dry() -> Self {
        Self {
            h: 0.0,
            mu: 0.0,
            mv: 0.0,
        }
    }

    /// Velocity components, desingularized near the dry tolerance the
    /// same way as [`Flow1D::velocity`].
    pub fn velocity(&self) -> (f64, f64) {
        if self.h <= 0.0 {
            return (0.0, 0.0);
        }
        let h_reg = self.h.max(H_DRY);
        let factor = 2.0 * self.h / (self.h * self.h + h_reg * h_reg);
        (self.mu * factor, self.mv * factor)
    }
}

impl From<[f64; 2]> for Flow1D {
    fn from(v: [f64; 2]) -> Self {
        Self { h: v[0], mu: v[1] }
    }
}

impl From<Flow1D> for [f64; 2] {
    fn from(w: Flow1D) -> Self {
        [w.h, w.mu]
    }
}

impl From<[f64; 3]> for Flow2D {
    fn from(v: [f64; 3]) -> Self {
        Self {
            h: v[0],
            mu: v[1],
            mv: v[2],
        }
    }
}

impl From<Flow2D> for [f64; 3] {
    fn from(w: Flow2D) -> Self {
        [w.h, w.mu, w.mv]
    }
}

impl FlowField1D {
    #[inline]
    pub fn flow(&self, element: usize, node: usize) -> Flow1D {
        self.node(element, node).into()
    }

    #[inline]
    pub fn set_flow(&mut self, element: usize, node: usize, w: Flow1D) {
        self.set_node(element, node, w.into());
    }

    /// Interpolate an initial condition `x -> (h, mu)` at the nodes.
    pub fn from_fn(mesh: &Mesh1D, ops: &Operators1D, f: impl Fn(f64) -> Flow1D) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        for k in 0..mesh.n_elements() {
            for (i, &r) in ops.nodes.iter().enumerate() {
                field.set_flow(k, i, f(mesh.map_to_physical(k, r)));
            }
        }
        field
    }

    pub fn min_depth(&self) -> f64 {
        let mut min = f64::INFINITY;
        for k in 0..self.n_elements() {
            for i in 0..N_NODES_1D {
                min = min.min(self.get(k, i, 0));
            }
        }
        min
    }
}

impl FlowField2D {
    #[inline]
    pub fn flow(&self, element: usize, node: usize) -> Flow2D {
        self.node(element, node).into()
    }

    #[inline]
    pub fn set_flow(&mut self, element: usize, node: usize, w: Flow2D) {
        self.set_node(element, node, w.into());
    }

    /// Interpolate an initial condition `(x, y) -> (h, mu, mv)` at the nodes.
    pub fn from_fn(mesh: &Mesh2D, ops: &Operators2D, f: impl Fn(f64, f64) -> Flow2D) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        for k in 0..mesh.n_elements() {
            for (i, &(r, s)) in ops.nodes.iter().enumerate() {
                let (x, y) = mesh.map_to_physical(k, r, s);
                field.set_flow(k, i, f(x, y));
            }
        }
        field
    }

    pub fn min_depth(&self) -> f64 {
        let mut min = f64::INFINITY;
        for k in 0..self.n_elements() {
            for i in 0..N_NODES_2D {
                min = min.min(self.get(k, i, 0));
            }
        }
        min
    }
}

impl ScalarField1D {
    /// Interpolate a scalar function at the nodes.
    pub fn interpolate(mesh: &Mesh1D, ops: &Operators1D, f: impl Fn(f64) -> f64) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        for k in 0..mesh.n_elements() {
            for (i, &r) in ops.nodes.iter().enumerate() {
                field.set(k, i, 0, f(mesh.map_to_physical(k, r)));
            }
        }
        field
    }

    pub fn constant(mesh: &Mesh1D, value: f64) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        field.fill(value);
        field
    }
}

impl ScalarField2D {
    /// Interpolate a scalar function at the nodes.
    pub fn interpolate(mesh: &Mesh2D, ops: &Operators2D, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        for k in 0..mesh.n_elements() {
            for (i, &(r, s)) in ops.nodes.iter().enumerate() {
                let (x, y) = mesh.map_to_physical(k, r, s);
                field.set(k, i, 0, f(x, y));
            }
        }
        field
    }

    pub fn constant(mesh: &Mesh2D, value: f64) -> Self {
        let mut field = Self::zeros(mesh.n_elements());
        field.fill(value);
        field
    }
}

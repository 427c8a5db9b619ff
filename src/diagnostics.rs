//! Run diagnostics: integral quantities and progress reporting.

use crate::operators::{Geometry1D, Geometry2D, Operators1D, Operators2D, N_NODES_1D, N_NODES_2D};
use crate::state::{FlowField1D, FlowField2D};

/// Total water volume `∫ h dx` over the 1D domain.
pub fn total_volume_1d(w: &FlowField1D, ops: &Operators1D, geom: &Geometry1D) -> f64 {
    let mut total = 0.0;
    for k in 0..w.n_elements() {
        for i in 0..N_NODES_1D {
            total += ops.weights[i] * geom.det_j * w.get(k, i, 0);
        }
    }
    total
}

/// Total water volume `∫ h dA` over the 2D domain.
pub fn total_volume_2d(w: &FlowField2D, ops: &Operators2D, geom: &Geometry2D) -> f64 {
    let mut total = 0.0;
    for k in 0..w.n_elements() {
        for i in 0..N_NODES_2D {
            total += ops.weights[i] * geom.det_j * w.get(k, i, 0);
        }
    }
    total
}

/// Total momentum `∫ (mu, mv) dA` over the 2D domain.
pub fn total_momentum_2d(w: &FlowField2D, ops: &Operators2D, geom: &Geometry2D) -> (f64, f64) {
    let (mut mu, mut mv) = (0.0, 0.0);
    for k in 0..w.n_elements() {
        for i in 0..N_NODES_2D {
            let scale = ops.weights[i] * geom.det_j;
            mu += scale * w.get(k, i, 1);
            mv += scale * w.get(k, i, 2);
        }
    }
    (mu, mv)
}

/// Fraction of elements with water on at least one node.
pub fn wet_fraction_2d(w: &FlowField2D) -> f64 {
    if w.n_elements() == 0 {
        return 0.0;
    }
    let wet = (0..w.n_elements())
        .filter(|&k| (0..N_NODES_2D).any(|i| w.get(k, i, 0) > 0.0))
        .count();
    wet as f64 / w.n_elements() as f64
}

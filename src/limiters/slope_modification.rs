//! Positivity-preserving slope scaling.
//!
//! Elements whose minimum nodal depth is negative have all variables'
//! deviations from the element mean scaled by a single factor
//! `theta = h_mean / (h_mean - h_min)`, which raises the minimum depth to
//! exactly zero while keeping the means. Scaling momentum by the same
//! factor avoids manufacturing velocity in nearly dry nodes. Elements
//! with a nonpositive mean depth are set fully dry.
//!
//! Nodes left at or below the dry tolerance additionally lose their
//! momentum, so a draining film cannot keep a finite discharge over a
//! vanishing depth.

use crate::operators::{Operators1D, Operators2D, N_NODES_1D, N_NODES_2D};
use crate::state::{Flow1D, Flow2D, FlowField1D, FlowField2D, H_DRY};

pub fn slope_modification_1d(w: &mut FlowField1D, ops: &Operators1D) {
    let inv_total: f64 = 1.0 / ops.weights.iter().sum::<f64>();
    for k in 0..w.n_elements() {
        let mut mean = [0.0f64; 2];
        let mut h_min = f64::INFINITY;
        for i in 0..N_NODES_1D {
            let node = w.node(k, i);
            for (m, v) in mean.iter_mut().zip(node) {
                *m += ops.weights[i] * v;
            }
            h_min = h_min.min(node[0]);
        }
        for m in &mut mean {
            *m *= inv_total;
        }

        if h_min < 0.0 {
            if mean[0] <= 0.0 {
                for i in 0..N_NODES_1D {
                    w.set_flow(k, i, Flow1D::dry());
                }
            } else {
                let theta = mean[0] / (mean[0] - h_min);
                for i in 0..N_NODES_1D {
                    let node = w.node(k, i);
                    w.set_node(k, i, [
                        mean[0] + theta * (node[0] - mean[0]),
                        mean[1] + theta * (node[1] - mean[1]),
                    ]);
                }
            }
        }

        for i in 0..N_NODES_1D {
            let node = w.node(k, i);
            if node[0] <= H_DRY && node[1] != 0.0 {
                w.set_node(k, i, [node[0], 0.0]);
            }
        }
    }
}

pub fn slope_modification_2d(w: &mut FlowField2D, ops: &Operators2D) {
    let inv_total: f64 = 1.0 / ops.weights.iter().sum::<f64>();
    for k in 0..w.n_elements() {
        let mut mean = [0.0f64; 3];
        let mut h_min = f64::INFINITY;
        for i in 0..N_NODES_2D {
            let node = w.node(k, i);
            for (m, v) in mean.iter_mut().zip(node) {
                *m += ops.weights[i] * v;
            }
            h_min = h_min.min(node[0]);
        }
        for m in &mut mean {
            *m *= inv_total;
        }

        if h_min < 0.0 {
            if mean[0] <= 0.0 {
                for i in 0..N_NODES_2D {
                    w.set_flow(k, i, Flow2D::dry());
                }
            } else {
                let theta = mean[0] / (mean[0] - h_min);
                for i in 0..N_NODES_2D {
                    let node = w.node(k, i);
                    w.set_node(k, i, [
                        mean[0] + theta * (node[0] - mean[0]),
                        mean[1] + theta * (node[1] - mean[1]),
                        mean[2] + theta * (node[2] - mean[2]),
                    ]);
                }
            }
        }

        for i in 0..N_NODES_2D {
            let node = w.node(k, i);
            if node[0] <= H_DRY && (node[1] != 0.0 || node[2] != 0.0) {
                w.set_node(k, i, [node[0], 0.0, 0.0]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-13;

    fn means(w: &FlowField2D, k: usize) -> [f64; 3] {
        let mut m = [0.0; 3];
        for i in 0..N_NODES_2D {
            for (acc, v) in m.iter_mut().zip(w.node(k, i)) {
                *acc += 0.25 * v;
            }
        }
        m
    }

    #[test]
    fn scaling_raises_minimum_to_zero_and_keeps_the_depth_mean() {
        let ops = Operators2D::new();
        let mut w = FlowField2D::zeros(1);
        w.set_node(0, 0, [-0.2, 0.1, 0.0]);
        w.set_node(0, 1, [0.4, 0.2, 0.0]);
        w.set_node(0, 2, [0.6, 0.3, 0.1]);
        w.set_node(0, 3, [0.8, 0.4, 0.1]);
        let before = means(&w, 0);

        slope_modification_2d(&mut w, &ops);

        let after = means(&w, 0);
        assert!((before[0] - after[0]).abs() < TOL);
        assert!(w.min_depth().abs() < TOL);
        assert!(w.min_depth() >= -TOL);
        // the node raised to zero depth keeps no momentum
        assert_eq!(w.get(0, 0, 1), 0.0);
        assert_eq!(w.get(0, 0, 2), 0.0);
    }

    #[test]
    fn wet_elements_are_untouched() {
        let ops = Operators2D::new();
        let mut w = FlowField2D::zeros(1);
        for i in 0..N_NODES_2D {
            w.set_node(0, i, [0.5 + 0.1 * i as f64, 0.2, -0.1]);
        }
        let before = w.clone();
        slope_modification_2d(&mut w, &ops);
        assert_eq!(w, before);
    }

    #[test]
    fn negative_mean_dries_the_element() {
        let ops = Operators2D::new();
        let mut w = FlowField2D::zeros(1);
        w.set_node(0, 0, [-0.5, 1.0, 1.0]);
        w.set_node(0, 1, [-0.3, 1.0, 1.0]);
        w.set_node(0, 2, [0.1, 1.0, 1.0]);
        w.set_node(0, 3, [0.2, 1.0, 1.0]);
        slope_modification_2d(&mut w, &ops);
        for i in 0..N_NODES_2D {
            assert_eq!(w.flow(0, i), Flow2D::dry());
        }
    }

    #[test]
    fn idempotent() {
        let ops = Operators2D::new();
        let mut w = FlowField2D::zeros(1);
        w.set_node(0, 0, [-0.2, 0.1, 0.3]);
        w.set_node(0, 1, [0.4, 0.2, 0.0]);
        w.set_node(0, 2, [0.6, 0.3, 0.0]);
        w.set_node(0, 3, [0.8, 0.4, 0.0]);
        slope_modification_2d(&mut w, &ops);
        let once = w.clone();
        slope_modification_2d(&mut w, &ops);
        assert_eq!(w, once);
    }

    #[test]
    fn momentum_scaled_with_depth_in_1d() {
        let ops = Operators1D::new();
        let mut w = FlowField1D::zeros(1);
        w.set_node(0, 0, [-0.1, -0.4]);
        w.set_node(0, 1, [0.5, 0.8]);
        slope_modification_1d(&mut w, &ops);
        // theta = 0.2 / 0.3
        let theta: f64 = 0.2 / 0.3;
        assert!(w.get(0, 0, 0).abs() < TOL);
        assert!((w.get(0, 1, 0) - (0.2 + theta * 0.3)).abs() < TOL);
        assert!((w.get(0, 1, 1) - (0.2 + theta * 0.6)).abs() < TOL);
        // the node dried by the scaling carries no momentum
        assert_eq!(w.get(0, 0, 1), 0.0);
    }

    #[test]
    fn draining_film_cannot_keep_its_momentum() {
        // momentum left behind by a receding front sits on a depth many
        // orders of magnitude below the dry tolerance; it must be
        // cleared even though every nodal depth is nonnegative
        let ops = Operators2D::new();
        let mut w = FlowField2D::zeros(1);
        w.set_node(0, 0, [1.7e-18, 1.7e-3, 0.0]);
        w.set_node(0, 1, [0.3, 0.05, 0.0]);
        w.set_node(0, 2, [0.4, 0.02, 0.01]);
        w.set_node(0, 3, [0.5, 0.01, 0.0]);
        slope_modification_2d(&mut w, &ops);
        assert_eq!(w.node(0, 0), [1.7e-18, 0.0, 0.0]);
        // wet nodes keep depth and momentum
        assert_eq!(w.node(0, 1), [0.3, 0.05, 0.0]);
        assert_eq!(w.node(0, 2), [0.4, 0.02, 0.01]);
    }
}

//! TVD slope limiter with bed-aware depth limiting.
//!
//! Slopes are limited per element with a minmod of the element's own
//! variation against the jumps to the neighboring element means. Depth
//! is limited on the free surface `eta = h + b` rather than on `h`, so a
//! flat lake over an uneven bed is a fixed point; the bed is subtracted
//! back after reconstruction. Boundary faces contribute a zero jump,
//! which flattens the touching elements.

use super::minmod;
use crate::mesh::{Mesh1D, Mesh2D};
use crate::operators::{Operators1D, Operators2D, N_NODES_1D, N_NODES_2D};
use crate::state::{FlowField1D, FlowField2D, ScalarField1D, ScalarField2D};

// Reconstruction keeps slopes already inside the neighbor bounds, up to
// roundoff of the mean/delta arithmetic.
const SLOPE_EQ_TOL: f64 = 1e-13;

pub fn slope_limiter_1d(
    w: &mut FlowField1D,
    mesh: &Mesh1D,
    ops: &Operators1D,
    bed: &ScalarField1D,
) {
    let n = mesh.n_elements();
    let inv_total: f64 = 1.0 / ops.weights.iter().sum::<f64>();

    // cell means of the free surface and momentum
    let mut eta_mean = vec![0.0; n];
    let mut mu_mean = vec![0.0; n];
    for k in 0..n {
        for i in 0..N_NODES_1D {
            let wk = ops.weights[i] * inv_total;
            eta_mean[k] += wk * (w.get(k, i, 0) + bed.get(k, i, 0));
            mu_mean[k] += wk * w.get(k, i, 1);
        }
    }

    for k in 0..n {
        let delta = |means: &[f64], face: usize| -> f64 {
            match mesh.neighbor(k, face) {
                Some(nb) if face == 0 => means[k] - means[nb],
                Some(nb) => means[nb] - means[k],
                None => 0.0,
            }
        };

        let eta = [
            w.get(k, 0, 0) + bed.get(k, 0, 0),
            w.get(k, 1, 0) + bed.get(k, 1, 0),
        ];
        let mu = w.element_var(k, 1);

        let d_eta = eta[1] - eta[0];
        let d_mu = mu[1] - mu[0];
        let l_eta = minmod(d_eta, delta(&eta_mean, 0), delta(&eta_mean, 1));
        let l_mu = minmod(d_mu, delta(&mu_mean, 0), delta(&mu_mean, 1));

        if (l_eta - d_eta).abs() <= SLOPE_EQ_TOL && (l_mu - d_mu).abs() <= SLOPE_EQ_TOL {
            continue;
        }

        for (i, &r) in ops.nodes.iter().enumerate() {
            let eta_i = eta_mean[k] + 0.5 * l_eta * r;
            w.set(k, i, 0, eta_i - bed.get(k, i, 0));
            w.set(k, i, 1, mu_mean[k] + 0.5 * l_mu * r);
        }
    }
}

pub fn slope_limiter_2d(
    w: &mut FlowField2D,
    mesh: &Mesh2D,
    ops: &Operators2D,
    bed: &ScalarField2D,
) {
    let n = mesh.n_elements();
    let inv_total: f64 = 1.0 / ops.weights.iter().sum::<f64>();

    let mut eta_mean = vec![0.0; n];
    let mut mu_mean = vec![0.0; n];
    let mut mv_mean = vec![0.0; n];
    for k in 0..n {
        for i in 0..N_NODES_2D {
            let wk = ops.weights[i] * inv_total;
            eta_mean[k] += wk * (w.get(k, i, 0) + bed.get(k, i, 0));
            mu_mean[k] += wk * w.get(k, i, 1);
            mv_mean[k] += wk * w.get(k, i, 2);
        }
    }

    for k in 0..n {
        // jump to the neighbor mean, zero through exterior faces
        let delta = |means: &[f64], face: usize| -> f64 {
            match mesh.neighbor(k, face) {
                Some(nb) if face == 0 || face == 3 => means[k] - means[nb],
                Some(nb) => means[nb] - means[k],
                None => 0.0,
            }
        };

        let mut eta = [0.0; N_NODES_2D];
        for (i, e) in eta.iter_mut().enumerate() {
            *e = w.get(k, i, 0) + bed.get(k, i, 0);
        }
        let mu = w.element_var(k, 1);
        let mv = w.element_var(k, 2);

        // variation across the element per direction, averaged over rows
        let across_r = |f: &[f64; N_NODES_2D]| 0.5 * ((f[1] - f[0]) + (f[3] - f[2]));
        let across_s = |f: &[f64; N_NODES_2D]| 0.5 * ((f[2] - f[0]) + (f[3] - f[1]));

        let d = [
            (across_r(&eta), across_s(&eta)),
            (across_r(&mu), across_s(&mu)),
            (across_r(&mv), across_s(&mv)),
        ];
        let means = [&eta_mean, &mu_mean, &mv_mean];
        let mut limited = [(0.0, 0.0); 3];
        let mut changed = false;
        for v in 0..3 {
            let lr = minmod(d[v].0, delta(means[v], 3), delta(means[v], 1));
            let ls = minmod(d[v].1, delta(means[v], 0), delta(means[v], 2));
            limited[v] = (lr, ls);
            changed |= (lr - d[v].0).abs() > SLOPE_EQ_TOL || (ls - d[v].1).abs() > SLOPE_EQ_TOL;
        }
        if !changed {
            continue;
        }

        for (i, &(r, s)) in ops.nodes.iter().enumerate() {
            let eta_i = eta_mean[k] + 0.5 * limited[0].0 * r + 0.5 * limited[0].1 * s;
            w.set(k, i, 0, eta_i - bed.get(k, i, 0));
            w.set(k, i, 1, mu_mean[k] + 0.5 * limited[1].0 * r + 0.5 * limited[1].1 * s);
            w.set(k, i, 2, mv_mean[k] + 0.5 * limited[2].0 * r + 0.5 * limited[2].1 * s);
        }
    }
}

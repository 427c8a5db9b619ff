//! Semi-discrete residual of the 1D shallow water system.
//!
//! Same construction as the 2D assembly: strong-form collocated DG with
//! chain-rule pressure, hydrostatic trace reconstruction at every face
//! and the facet pressure delta.

use crate::boundary::BoundaryTable1D;
use crate::equations::ShallowWater1D;
use crate::flux::{llf_flux_1d, BedJump};
use crate::mesh::Mesh1D;
use crate::operators::{Geometry1D, Operators1D, FACE_NODES_1D, FACE_NORMALS_1D, N_NODES_1D};
use crate::source::Rainfall;
use crate::state::{FlowField1D, ScalarField1D};

pub struct WeakForm1D<'a> {
    pub equation: ShallowWater1D,
    pub bed_jump: BedJump,
    pub bed: &'a ScalarField1D,
    pub boundary: &'a BoundaryTable1D,
    pub source: &'a Rainfall,
}

/// Assemble `dw/dt` at time `t`.
pub fn compute_residual_1d(
    w: &FlowField1D,
    mesh: &Mesh1D,
    ops: &Operators1D,
    geom: &Geometry1D,
    form: &WeakForm1D,
    t: f64,
) -> FlowField1D {
    let eq = &form.equation;
    let g = eq.g;
    let mut out = FlowField1D::zeros(w.n_elements());

    for k in 0..w.n_elements() {
        let h = w.element_var(k, 0);
        let mu = w.element_var(k, 1);
        let b = form.bed.element_var(k, 0);

        let mut f_h = [0.0; N_NODES_1D];
        let mut f_mu = [0.0; N_NODES_1D];
        for i in 0..N_NODES_1D {
            let u = w.flow(k, i).velocity();
            f_h[i] = mu[i];
            f_mu[i] = mu[i] * u;
        }
        let df_h = ops.derivative(&f_h);
        let df_mu = ops.derivative(&f_mu);
        let dh = ops.derivative(&h);
        let db = ops.derivative(&b);

        let mut rhs = [[0.0; 2]; N_NODES_1D];
        for i in 0..N_NODES_1D {
            rhs[i][0] = -geom.rx * df_h[i] + form.source.rate(k, i, N_NODES_1D, t);
            rhs[i][1] = -geom.rx * df_mu[i] - g * h[i] * geom.rx * (dh[i] + db[i]);
        }

        for face in 0..2 {
            let n = FACE_NORMALS_1D[face];
            let node = FACE_NODES_1D[face];
            let w_int = w.flow(k, node);
            let b_int = b[node];
            let (w_ext, b_ext) = match mesh.neighbor(k, face) {
                Some(nb) => {
                    // left neighbor's right node or right neighbor's left node
                    let opp = FACE_NODES_1D[1 - face];
                    (w.flow(nb, opp), form.bed.get(nb, opp, 0))
                }
                None => {
                    let marker = match mesh.boundary_marker(k, face) {
                        Some(m) => m,
                        None => unreachable!("exterior face carries a marker"),
                    };
                    (form.boundary.ghost_state(marker, &w_int), b_int)
                }
            };

            let (r_int, r_ext) = form.bed_jump.reconstruct_1d(&w_int, &w_ext, b_int, b_ext);
            let star = llf_flux_1d(eq, &r_int, &r_ext, n);
            let delta = form.bed_jump.delta_1d(&w_int, &r_int, n);
            let phys = eq.normal_flux(&w_int, n);

            rhs[node][0] += geom.lift * (phys.h - star.h - delta.h);
            rhs[node][1] += geom.lift * (phys.mu - star.mu - delta.mu);
        }

        for (i, node) in rhs.iter().enumerate() {
            out.set_node(k, i, *node);
        }
    }

    out
}

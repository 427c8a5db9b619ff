//! Semi-discrete residual of the 2D shallow water system.
//!
//! Strong-form collocated DG: per element the residual is
//! `-div F + lift (F(w).n - F* - delta)` summed over the faces, plus the
//! bed source and the rain source. The momentum pressure gradient is
//! assembled as `g h dh` so that it cancels the bed source `g h db`
//! identically on a flat free surface; the facet delta restores the
//! pressure balance across bed jumps.

use crate::boundary::BoundaryTable2D;
use crate::equations::ShallowWater2D;
use crate::flux::{llf_flux_2d, BedJump};
use crate::mesh::Mesh2D;
use crate::operators::{Geometry2D, Operators2D, FACE_NODES_2D, N_NODES_2D};
use crate::source::Rainfall;
use crate::state::{FlowField2D, ScalarField2D};

/// Everything the residual needs beside the state itself.
pub struct WeakForm2D<'a> {
    pub equation: ShallowWater2D,
    pub bed_jump: BedJump,
    pub bed: &'a ScalarField2D,
    pub boundary: &'a BoundaryTable2D,
    pub source: &'a Rainfall,
}

/// Assemble `dw/dt` at time `t`.
pub fn compute_residual_2d(
    w: &FlowField2D,
    mesh: &Mesh2D,
    ops: &Operators2D,
    geom: &Geometry2D,
    form: &WeakForm2D,
    t: f64,
) -> FlowField2D {
    let mut out = FlowField2D::zeros(w.n_elements());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.data_mut()
            .par_chunks_mut(N_NODES_2D * 3)
            .enumerate()
            .for_each(|(k, chunk)| {
                let rhs = element_residual(k, w, mesh, ops, geom, form, t);
                for (i, node) in rhs.iter().enumerate() {
                    chunk[i * 3..i * 3 + 3].copy_from_slice(node);
                }
            });
    }

    #[cfg(not(feature = "parallel"))]
    for k in 0..w.n_elements() {
        let rhs = element_residual(k, w, mesh, ops, geom, form, t);
        for (i, node) in rhs.iter().enumerate() {
            out.set_node(k, i, *node);
        }
    }

    out
}

fn element_residual(
    k: usize,
    w: &FlowField2D,
    mesh: &Mesh2D,
    ops: &Operators2D,
    geom: &Geometry2D,
    form: &WeakForm2D,
    t: f64,
) -> [[f64; 3]; N_NODES_2D] {
    let eq = &form.equation;
    let g = eq.g;

    let h = w.element_var(k, 0);
    let mu = w.element_var(k, 1);
    let mv = w.element_var(k, 2);
    let b = form.bed.element_var(k, 0);

    // nodal advective fluxes; pressure is handled separately below
    let mut fx = [[0.0; N_NODES_2D]; 3];
    let mut fy = [[0.0; N_NODES_2D]; 3];
    for i in 0..N_NODES_2D {
        let wi = w.flow(k, i);
        let (u, v) = wi.velocity();
        fx[0][i] = mu[i];
        fx[1][i] = mu[i] * u;
        fx[2][i] = mv[i] * u;
        fy[0][i] = mv[i];
        fy[1][i] = mu[i] * v;
        fy[2][i] = mv[i] * v;
    }

    let dh_r = ops.derivative_r(&h);
    let dh_s = ops.derivative_s(&h);
    let db_r = ops.derivative_r(&b);
    let db_s = ops.derivative_s(&b);

    let mut rhs = [[0.0; 3]; N_NODES_2D];
    for var in 0..3 {
        let dfx = ops.derivative_r(&fx[var]);
        let dfy = ops.derivative_s(&fy[var]);
        for i in 0..N_NODES_2D {
            rhs[i][var] = -geom.rx * dfx[i] - geom.sy * dfy[i];
        }
    }
    for i in 0..N_NODES_2D {
        // chain-rule pressure plus bed slope, together g h d(h + b)
        rhs[i][1] -= g * h[i] * geom.rx * (dh_r[i] + db_r[i]);
        rhs[i][2] -= g * h[i] * geom.sy * (dh_s[i] + db_s[i]);
        rhs[i][0] += form.source.rate(k, i, N_NODES_2D, t);
    }

    for face in 0..4 {
        let normal = geom.normals[face];
        let lift = geom.lift[face];
        let neighbor = mesh.neighbor(k, face);
        for (fi, &node) in FACE_NODES_2D[face].iter().enumerate() {
            let w_int = w.flow(k, node);
            let b_int = b[node];
            let (w_ext, b_ext) = match neighbor {
                Some(nb) => {
                    let opp = FACE_NODES_2D[Mesh2D::opposite_face(face)][fi];
                    (w.flow(nb, opp), form.bed.get(nb, opp, 0))
                }
                None => {
                    let marker = match mesh.boundary_marker(k, face) {
                        Some(m) => m,
                        None => unreachable!("exterior face carries a marker"),
                    };
                    (form.boundary.ghost_state(marker, &w_int, normal), b_int)
                }
            };

            let (r_int, r_ext) = form.bed_jump.reconstruct_2d(&w_int, &w_ext, b_int, b_ext);
            let star = llf_flux_2d(eq, &r_int, &r_ext, normal);
            let delta = form.bed_jump.delta_2d(&w_int, &r_int, normal);
            let phys = eq.normal_flux(&w_int, normal);

            rhs[node][0] += lift * (phys.h - star.h - delta.h);
            rhs[node][1] += lift * (phys.mu - star.mu - delta.mu);
            rhs[node][2] += lift * (phys.mv - star.mv - delta.mv);
        }
    }

    rhs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryTable2D;
    use crate::equations::GRAVITY;
    use crate::state::Flow2D;

    const TOL: f64 = 1e-11;

    struct Fixture {
        mesh: Mesh2D,
        ops: Operators2D,
        geom: Geometry2D,
        bed: ScalarField2D,
        boundary: BoundaryTable2D,
        source: Rainfall,
    }

    impl Fixture {
        fn new(n: usize, bed_fn: impl Fn(f64, f64) -> f64) -> Self {
            let mesh = Mesh2D::unit_square(n);
            let ops = Operators2D::new();
            let geom = Geometry2D::new(&mesh);
            let bed = ScalarField2D::interpolate(&mesh, &ops, bed_fn);
            let boundary = BoundaryTable2D::resolve(&mesh, &[]).unwrap();
            Self {
                mesh,
                ops,
                geom,
                bed,
                boundary,
                source: Rainfall::none(),
            }
        }

        fn residual(&self, w: &FlowField2D, t: f64) -> FlowField2D {
            let form = WeakForm2D {
                equation: ShallowWater2D::new(GRAVITY),
                bed_jump: BedJump::new(GRAVITY),
                bed: &self.bed,
                boundary: &self.boundary,
                source: &self.source,
            };
            compute_residual_2d(w, &self.mesh, &self.ops, &self.geom, &form, t)
        }
    }

    #[test]
    fn still_water_flat_bed_has_zero_residual() {
        let fix = Fixture::new(4, |_, _| 0.0);
        let w = FlowField2D::from_fn(&fix.mesh, &fix.ops, |_, _| Flow2D::new(1.0, 0.0, 0.0));
        let r = fix.residual(&w, 0.0);
        assert!(r.max_abs() < TOL, "max residual {}", r.max_abs());
    }

    #[test]
    fn lake_at_rest_over_smooth_bed_is_balanced() {
        let fix = Fixture::new(5, |x, y| 0.3 * ((x - 0.5).powi(2) + (y - 0.5).powi(2)));
        let mut w = FlowField2D::zeros(fix.mesh.n_elements());
        for k in 0..fix.mesh.n_elements() {
            for i in 0..N_NODES_2D {
                w.set_node(k, i, [1.0 - fix.bed.get(k, i, 0), 0.0, 0.0]);
            }
        }
        let r = fix.residual(&w, 0.0);
        assert!(r.max_abs() < TOL, "max residual {}", r.max_abs());
    }

    #[test]
    fn dry_domain_with_rain_fills_uniformly() {
        let mut fix = Fixture::new(3, |_, _| 0.0);
        fix.source = Rainfall::constant(0.2);
        let w = FlowField2D::zeros(fix.mesh.n_elements());
        let r = fix.residual(&w, 0.0);
        for k in 0..fix.mesh.n_elements() {
            for i in 0..N_NODES_2D {
                let node = r.node(k, i);
                assert!((node[0] - 0.2).abs() < TOL);
                assert!(node[1].abs() < TOL && node[2].abs() < TOL);
            }
        }
    }

    #[test]
    fn depth_residual_sums_to_zero_on_closed_domain() {
        // Walls everywhere: the depth rows of the residual integrate to
        // zero, so total volume is conserved by the semi-discrete system.
        let fix = Fixture::new(4, |_, _| 0.0);
        let w = FlowField2D::from_fn(&fix.mesh, &fix.ops, |x, y| {
            Flow2D::new(
                1.0 + 0.3 * (-((x - 0.5).powi(2) + (y - 0.5).powi(2)) / 0.02).exp(),
                0.1 * (x - 0.5),
                -0.2 * (y - 0.3),
            )
        });
        let r = fix.residual(&w, 0.0);
        let mut total = 0.0;
        for k in 0..fix.mesh.n_elements() {
            for i in 0..N_NODES_2D {
                total += fix.ops.weights[i] * fix.geom.det_j * r.get(k, i, 0);
            }
        }
        assert!(total.abs() < TOL, "net volume rate {total}");
    }

    #[test]
    fn lake_at_rest_over_discontinuous_bed_is_balanced() {
        // bed constant per element, so it jumps across element faces
        let mut fix = Fixture::new(4, |_, _| 0.0);
        for k in 0..fix.mesh.n_elements() {
            let (ox, _) = fix.mesh.element_origin(k);
            let step = if ox + 0.5 * fix.mesh.dx() < 0.5 { 0.0 } else { 0.4 };
            for i in 0..N_NODES_2D {
                fix.bed.set(k, i, 0, step);
            }
        }
        let mut w = FlowField2D::zeros(fix.mesh.n_elements());
        for k in 0..fix.mesh.n_elements() {
            for i in 0..N_NODES_2D {
                w.set_node(k, i, [1.0 - fix.bed.get(k, i, 0), 0.0, 0.0]);
            }
        }
        let r = fix.residual(&w, 0.0);
        assert!(r.max_abs() < TOL, "max residual {}", r.max_abs());
    }
}

//! Hydrostatic depth reconstruction at facets with discontinuous bed.
//!
//! Each trace is reduced by the bed step it faces before the numerical
//! flux is evaluated: `h* = max(0, h - max(0, b_other - b_self))`, with
//! momentum rescaled at constant velocity. The momentum flux mismatch
//! this introduces is restored by a facet delta term
//! `(g/2) (h^2 - h*^2) n`, which closes the lake-at-rest balance across
//! the jump.

use crate::state::{Flow1D, Flow2D};

#[derive(Debug, Clone, Copy)]
pub struct BedJump {
    pub g: f64,
}

impl BedJump {
    pub const fn new(g: f64) -> Self {
        Self { g }
    }

    /// Depth a trace keeps after subtracting the bed step it faces.
    fn reduced_depth(h: f64, b_self: f64, b_other: f64) -> f64 {
        (h - (b_other - b_self).max(0.0)).max(0.0)
    }

    /// Reconstructed interior and exterior traces at a facet with bed
    /// values `b_m` (interior) and `b_p` (exterior).
    pub fn reconstruct_1d(&self, w_m: &Flow1D, w_p: &Flow1D, b_m: f64, b_p: f64) -> (Flow1D, Flow1D) {
        let h_m = Self::reduced_depth(w_m.h, b_m, b_p);
        let h_p = Self::reduced_depth(w_p.h, b_p, b_m);
        (
            Flow1D::new(h_m, h_m * w_m.velocity()),
            Flow1D::new(h_p, h_p * w_p.velocity()),
        )
    }

    /// 2D counterpart of [`Self::reconstruct_1d`].
    pub fn reconstruct_2d(&self, w_m: &Flow2D, w_p: &Flow2D, b_m: f64, b_p: f64) -> (Flow2D, Flow2D) {
        let h_m = Self::reduced_depth(w_m.h, b_m, b_p);
        let h_p = Self::reduced_depth(w_p.h, b_p, b_m);
        let (u_m, v_m) = w_m.velocity();
        let (u_p, v_p) = w_p.velocity();
        (
            Flow2D::new(h_m, h_m * u_m, h_m * v_m),
            Flow2D::new(h_p, h_p * u_p, h_p * v_p),
        )
    }

    /// Pressure correction `(g/2) (h^2 - h*^2) n` restoring the momentum
    /// balance lost by evaluating the flux on the reconstructed trace.
    pub fn delta_1d(&self, w: &Flow1D, w_rec: &Flow1D, n: f64) -> Flow1D {
        let p = 0.5 * self.g * (w.h * w.h - w_rec.h * w_rec.h);
        Flow1D::new(0.0, p * n)
    }

    /// 2D counterpart of [`Self::delta_1d`].
    pub fn delta_2d(&self, w: &Flow2D, w_rec: &Flow2D, normal: (f64, f64)) -> Flow2D {
        let p = 0.5 * self.g * (w.h * w.h - w_rec.h * w_rec.h);
        Flow2D::new(0.0, p * normal.0, p * normal.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{ShallowWater2D, GRAVITY};
    use crate::flux::llf_flux_2d;

    const TOL: f64 = 1e-12;

    #[test]
    fn flat_bed_leaves_traces_untouched() {
        let bj = BedJump::new(GRAVITY);
        let w_m = Flow2D::new(1.0, 0.3, -0.1);
        let w_p = Flow2D::new(0.8, 0.2, 0.0);
        let (r_m, r_p) = bj.reconstruct_2d(&w_m, &w_p, 0.5, 0.5);
        assert_eq!(r_m, w_m);
        assert_eq!(r_p, w_p);
        let d = bj.delta_2d(&w_m, &r_m, (1.0, 0.0));
        assert_eq!(d, Flow2D::dry());
    }

    #[test]
    fn step_reduces_only_the_lower_side() {
        let bj = BedJump::new(GRAVITY);
        let w_m = Flow2D::new(1.0, 0.0, 0.0); // bed 0.0
        let w_p = Flow2D::new(0.6, 0.0, 0.0); // bed 0.4
        let (r_m, r_p) = bj.reconstruct_2d(&w_m, &w_p, 0.0, 0.4);
        assert!((r_m.h - 0.6).abs() < TOL); // sees a 0.4 step up
        assert!((r_p.h - 0.6).abs() < TOL); // sees a step down, untouched
    }

    #[test]
    fn reconstruction_preserves_velocity() {
        let bj = BedJump::new(GRAVITY);
        let w_m = Flow2D::new(1.0, 2.0, -1.0);
        let (r_m, _) = bj.reconstruct_2d(&w_m, &Flow2D::dry(), 0.0, 0.5);
        assert!((r_m.h - 0.5).abs() < TOL);
        let (u, v) = r_m.velocity();
        assert!((u - 2.0).abs() < TOL);
        assert!((v + 1.0).abs() < TOL);
    }

    #[test]
    fn dry_trace_stays_dry_and_nonnegative() {
        let bj = BedJump::new(GRAVITY);
        let w_m = Flow2D::new(0.2, 0.1, 0.0);
        // bed step taller than the water column
        let (r_m, _) = bj.reconstruct_2d(&w_m, &Flow2D::dry(), 0.0, 1.0);
        assert_eq!(r_m, Flow2D::dry());
    }

    #[test]
    fn lake_at_rest_balance_across_a_bed_jump() {
        // Flat free surface eta = 1 over beds 0.2 and 0.5. The corrected
        // facet residual F(w).n - F*(rec) - delta must vanish.
        let eq = ShallowWater2D::new(GRAVITY);
        let bj = BedJump::new(GRAVITY);
        let (b_m, b_p) = (0.2, 0.5);
        let w_m = Flow2D::new(1.0 - b_m, 0.0, 0.0);
        let w_p = Flow2D::new(1.0 - b_p, 0.0, 0.0);
        let n = (1.0, 0.0);

        let (r_m, r_p) = bj.reconstruct_2d(&w_m, &w_p, b_m, b_p);
        let star = llf_flux_2d(&eq, &r_m, &r_p, n);
        let delta = bj.delta_2d(&w_m, &r_m, n);
        let phys = eq.normal_flux(&w_m, n);

        assert!((phys.h - star.h - delta.h).abs() < TOL);
        assert!((phys.mu - star.mu - delta.mu).abs() < TOL);
        assert!((phys.mv - star.mv - delta.mv).abs() < TOL);
    }
}

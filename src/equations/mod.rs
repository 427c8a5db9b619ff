//! Shallow water equations in conserved variables.
//!
//! The physical flux carries the hydrostatic pressure `g h^2 / 2` in the
//! momentum rows. The volume integration of the residual assembles that
//! pressure in its chain-rule form `g h dh` instead, which pairs with the
//! bed source `g h db` to vanish identically on a flat free surface.

use crate::state::{Flow1D, Flow2D, H_DRY};

/// Standard gravitational acceleration.
pub const GRAVITY: f64 = 9.81;

/// 1D shallow water flux and wave speeds.
#[derive(Debug, Clone, Copy)]
pub struct ShallowWater1D {
    pub g: f64,
}

impl ShallowWater1D {
    pub const fn new(g: f64) -> Self {
        Self { g }
    }

    /// Physical flux `(mu, mu u + g h^2 / 2)`.
    pub fn flux(&self, w: &Flow1D) -> Flow1D {
        let u = w.velocity();
        Flow1D {
            h: w.mu,
            mu: w.mu * u + 0.5 * self.g * w.h * w.h,
        }
    }

    /// Flux through a face with outward normal `n` (`n` is -1 or 1).
    pub fn normal_flux(&self, w: &Flow1D, n: f64) -> Flow1D {
        let f = self.flux(w);
        Flow1D {
            h: n * f.h,
            mu: n * f.mu,
        }
    }

    /// Largest signal speed `|u| + sqrt(g h)`, zero at and below the
    /// dry tolerance.
    pub fn wave_speed(&self, w: &Flow1D) -> f64 {
        if w.h <= H_DRY {
            return 0.0;
        }
        w.velocity().abs() + (self.g * w.h).sqrt()
    }
}

/// 2D shallow water flux and wave speeds.
#[derive(Debug, Clone, Copy)]
pub struct ShallowWater2D {
    pub g: f64,
}

impl ShallowWater2D {
    pub const fn new(g: f64) -> Self {
        Self { g }
    }

    /// Physical flux in `x`: `(mu, mu u + g h^2 / 2, mv u)`.
    pub fn flux_x(&self, w: &Flow2D) -> Flow2D {
        let (u, _) = w.velocity();
        Flow2D {
            h: w.mu,
            mu: w.mu * u + 0.5 * self.g * w.h * w.h,
            mv: w.mv * u,
        }
    }

    /// Physical flux in `y`: `(mv, mu v, mv v + g h^2 / 2)`.
    pub fn flux_y(&self, w: &Flow2D) -> Flow2D {
        let (_, v) = w.velocity();
        Flow2D {
            h: w.mv,
            mu: w.mu * v,
            mv: w.mv * v + 0.5 * self.g * w.h * w.h,
        }
    }

    /// Flux through a face with outward unit normal `(nx, ny)`.
    pub fn normal_flux(&self, w: &Flow2D, normal: (f64, f64)) -> Flow2D {
        let fx = self.flux_x(w);
        let fy = self.flux_y(w);
        Flow2D {
            h: normal.0 * fx.h + normal.1 * fy.h,
            mu: normal.0 * fx.mu + normal.1 * fy.mu,
            mv: normal.0 * fx.mv + normal.1 * fy.mv,
        }
    }

    /// Largest signal speed `|u| + sqrt(g h)`, zero at and below the
    /// dry tolerance.
    pub fn wave_speed(&self, w: &Flow2D) -> f64 {
        if w.h <= H_DRY {
            return 0.0;
        }
        let (u, v) = w.velocity();
        (u * u + v * v).sqrt() + (self.g * w.h).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn flux_1d_still_water() {
        let eq = ShallowWater1D::new(GRAVITY);
        let f = eq.flux(&Flow1D::new(2.0, 0.0));
        assert!(f.h.abs() < TOL);
        assert!((f.mu - 0.5 * GRAVITY * 4.0).abs() < TOL);
    }

    #[test]
    fn flux_2d_components() {
        let eq = ShallowWater2D::new(GRAVITY);
        let w = Flow2D::new(2.0, 4.0, -2.0); // u = 2, v = -1
        let fx = eq.flux_x(&w);
        assert!((fx.h - 4.0).abs() < TOL);
        assert!((fx.mu - (8.0 + 0.5 * GRAVITY * 4.0)).abs() < TOL);
        assert!((fx.mv - (-4.0)).abs() < TOL);
        let fy = eq.flux_y(&w);
        assert!((fy.h - (-2.0)).abs() < TOL);
        assert!((fy.mu - (-4.0)).abs() < TOL);
        assert!((fy.mv - (2.0 + 0.5 * GRAVITY * 4.0)).abs() < TOL);
    }

    #[test]
    fn normal_flux_rotates_with_normal() {
        let eq = ShallowWater2D::new(GRAVITY);
        let w = Flow2D::new(1.5, 0.3, -0.7);
        let fx = eq.flux_x(&w);
        let fn_x = eq.normal_flux(&w, (1.0, 0.0));
        assert!((fn_x.h - fx.h).abs() < TOL);
        assert!((fn_x.mu - fx.mu).abs() < TOL);
        assert!((fn_x.mv - fx.mv).abs() < TOL);
        let fy = eq.flux_y(&w);
        let fn_my = eq.normal_flux(&w, (0.0, -1.0));
        assert!((fn_my.h + fy.h).abs() < TOL);
    }

    #[test]
    fn wave_speed_on_dry_and_negative_depth() {
        let eq = ShallowWater2D::new(GRAVITY);
        assert_eq!(eq.wave_speed(&Flow2D::dry()), 0.0);
        assert_eq!(eq.wave_speed(&Flow2D::new(-1e-3, 0.0, 0.0)), 0.0);
        // a thin film with leftover momentum is still silent
        assert_eq!(eq.wave_speed(&Flow2D::new(1e-9, 1e-3, 0.0)), 0.0);
        let w = Flow2D::new(1.0, 3.0, 4.0);
        assert!((eq.wave_speed(&w) - (5.0 + GRAVITY.sqrt())).abs() < TOL);
    }
}

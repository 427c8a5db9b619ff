//! Post-stage stabilization: TVD slope limiting and positivity scaling.
//!
//! Both passes run after every stage update and every stage combination
//! of the time integrator, limiting first and enforcing positivity
//! second. Both preserve element means of wet elements, and both are
//! idempotent.

mod slope_limiter;
mod slope_modification;

pub use slope_limiter::{slope_limiter_1d, slope_limiter_2d};
pub use slope_modification::{slope_modification_1d, slope_modification_2d};

/// Classic three-argument minmod: the smallest-magnitude argument when
/// all share a strict sign, zero otherwise.
pub(crate) fn minmod(a: f64, b: f64, c: f64) -> f64 {
    if a > 0.0 && b > 0.0 && c > 0.0 {
        a.min(b).min(c)
    } else if a < 0.0 && b < 0.0 && c < 0.0 {
        a.max(b).max(c)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::minmod;

    #[test]
    fn minmod_same_sign_picks_smallest_magnitude() {
        assert_eq!(minmod(1.0, 2.0, 3.0), 1.0);
        assert_eq!(minmod(3.0, 0.5, 2.0), 0.5);
        assert_eq!(minmod(-1.0, -2.0, -0.25), -0.25);
    }

    #[test]
    fn minmod_mixed_signs_is_zero() {
        assert_eq!(minmod(1.0, -1.0, 2.0), 0.0);
        assert_eq!(minmod(0.0, 1.0, 2.0), 0.0);
        assert_eq!(minmod(-1.0, 0.0, -2.0), 0.0);
    }
}

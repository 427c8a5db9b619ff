//! Numerical fluxes at element interfaces.

mod bed_jump;
mod interior;

pub use bed_jump::BedJump;
pub use interior::{llf_flux_1d, llf_flux_2d};

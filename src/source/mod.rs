//! Depth sources: rainfall and inflow forcing.
//!
//! A source adds to the depth equation only; momentum is never forced.
//! The rate is a field over the mesh nodes (or a uniform constant)
//! multiplied by an optional time scaling, so storms can ramp up and
//! decay without rebuilding the stepper.

/// Rainfall-style depth source.
pub struct Rainfall {
    uniform: f64,
    nodal: Option<Vec<f64>>,
    time_scale: Option<Box<dyn Fn(f64) -> f64 + Send + Sync>>,
}

impl Rainfall {
    /// No forcing.
    pub fn none() -> Self {
        Self {
            uniform: 0.0,
            nodal: None,
            time_scale: None,
        }
    }

    /// Spatially uniform rate in depth per unit time.
    pub fn constant(rate: f64) -> Self {
        Self {
            uniform: rate,
            nodal: None,
            time_scale: None,
        }
    }

    /// Nodal rate field laid out like a scalar DG field
    /// (`element * n_nodes + node`).
    pub fn from_nodal(rates: Vec<f64>) -> Self {
        Self {
            uniform: 0.0,
            nodal: Some(rates),
            time_scale: None,
        }
    }

    /// Multiply the rate by `f(t)` during stepping.
    pub fn with_time_scale(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.time_scale = Some(Box::new(f));
        self
    }

    /// Rate at one node at time `t`.
    pub fn rate(&self, element: usize, node: usize, n_nodes: usize, t: f64) -> f64 {
        let base = match &self.nodal {
            Some(rates) => rates[element * n_nodes + node],
            None => self.uniform,
        };
        match &self.time_scale {
            Some(f) => base * f(t),
            None => base,
        }
    }

    /// True when the source can never contribute.
    pub fn is_zero(&self) -> bool {
        self.nodal.is_none() && self.uniform == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn constant_rate_everywhere() {
        let rain = Rainfall::constant(0.2);
        assert!((rain.rate(0, 0, 4, 0.0) - 0.2).abs() < TOL);
        assert!((rain.rate(7, 3, 4, 123.0) - 0.2).abs() < TOL);
        assert!(!rain.is_zero());
    }

    #[test]
    fn nodal_rates_are_indexed_per_node() {
        let rain = Rainfall::from_nodal(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert!((rain.rate(1, 2, 4, 0.0) - 6.0).abs() < TOL);
    }

    #[test]
    fn time_scaling_modulates_the_rate() {
        let rain = Rainfall::constant(2.0).with_time_scale(|t| if t < 1.0 { 1.0 } else { 0.0 });
        assert!((rain.rate(0, 0, 4, 0.5) - 2.0).abs() < TOL);
        assert!(rain.rate(0, 0, 4, 1.5).abs() < TOL);
    }

    #[test]
    fn none_is_zero() {
        assert!(Rainfall::none().is_zero());
        assert!(Rainfall::none().rate(0, 0, 2, 1.0).abs() < TOL);
    }
}

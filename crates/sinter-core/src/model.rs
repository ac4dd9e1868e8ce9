//! The empirical density model.
//!
//! Density of the sintered composite is a fixed bivariate polynomial in gas
//! pressure `Pg` (atm) and temperature `T` (°C):
//!
//! ```text
//! rho(Pg, T) = a0 + a1*Pg + a2*T + a3*Pg*T + a4*T^2 + a5*Pg*T^2
//! ```
//!
//! Only the six coefficients vary between materials.

use serde::{Deserialize, Serialize};

/// Elementary operations charged for one evaluation of the polynomial.
pub const OPS_PER_SAMPLE: u64 = 13;

/// The six coefficients of the density polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Constant term.
    pub a0: f64,
    /// Pressure term.
    pub a1: f64,
    /// Temperature term.
    pub a2: f64,
    /// Pressure-temperature interaction.
    pub a3: f64,
    /// Quadratic temperature term.
    pub a4: f64,
    /// Pressure times quadratic temperature.
    pub a5: f64,
}

impl Coefficients {
    /// Build a set from an `[a0, .., a5]` array.
    #[must_use]
    pub const fn from_array(a: [f64; 6]) -> Self {
        Self {
            a0: a[0],
            a1: a[1],
            a2: a[2],
            a3: a[3],
            a4: a[4],
            a5: a[5],
        }
    }

    /// The coefficients as an `[a0, .., a5]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 6] {
        [self.a0, self.a1, self.a2, self.a3, self.a4, self.a5]
    }

    /// Evaluate the density at pressure `pg` and temperature `t`.
    #[must_use]
    pub fn density(&self, pg: f64, t: f64) -> f64 {
        let t2 = t * t;
        self.a0 + self.a1 * pg + self.a2 * t + self.a3 * pg * t + self.a4 * t2 + self.a5 * pg * t2
    }

    /// Whether all six coefficients are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|a| a.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WC_NI: Coefficients = Coefficients::from_array([-17.46, -0.00622, 0.04293, 1.5e-5, -1.4e-5, -5e-9]);

    #[test]
    fn reference_point() {
        let expected = -17.46
            + (-0.00622 * 40.0)
            + (0.04293 * 1300.0)
            + (1.5e-5 * 40.0 * 1300.0)
            + (-1.4e-5 * 1300.0 * 1300.0)
            + (-5e-9 * 40.0 * 1300.0 * 1300.0);

        let rho = WC_NI.density(40.0, 1300.0);
        assert!((rho - expected).abs() < 1e-12, "rho = {rho}");
        assert!((rho - 14.8822).abs() < 1e-9, "rho = {rho}");
    }

    #[test]
    fn constant_model() {
        let c = Coefficients::from_array([2.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(c.density(10.0, 1000.0), 2.5);
    }

    #[test]
    fn array_roundtrip() {
        assert_eq!(Coefficients::from_array(WC_NI.to_array()), WC_NI);
    }

    #[test]
    fn non_finite_detected() {
        let mut c = WC_NI;
        assert!(c.is_finite());
        c.a3 = f64::NAN;
        assert!(!c.is_finite());
    }
}

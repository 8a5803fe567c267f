// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

use crate::error::ConfigError;

/// Normal noise with scale `sigma`, truncated to `[0, n - 1]` and discretised onto the
/// integers by integrating over `[x - 0.5, x + 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedGaussian {
    sigma: f64,
}

impl TruncatedGaussian {
    pub fn new(sigma: f64) -> Result<Self, ConfigError> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(ConfigError::NonPositiveSigma(sigma));
        }
        Ok(Self { sigma })
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Probability mass assigned to integer `x` given hidden value `mu`.
    ///
    /// Clamped to `[0, 1]`. NaN is passed through for the caller to reject.
    pub fn mass(&self, x: usize, mu: usize, n: usize) -> f64 {
        if x >= n {
            return 0.0;
        }
        if n == 1 {
            // Zero-width support, all mass on the single solution.
            return 1.0;
        }
        let mu_f = mu as f64;
        // a <= 0 <= b since mu < n
        let a = (0.0 - mu_f) / self.sigma;
        let b = ((n - 1) as f64 - mu_f) / self.sigma;

        let x_f = x as f64;
        let upper = ((x_f + 0.5 - mu_f) / self.sigma).min(b);
        let lower = ((x_f - 0.5 - mu_f) / self.sigma).max(a);
        if upper <= lower {
            return 0.0;
        }
        // erf keeps full relative precision near zero, where wide windows put every
        // standardised bound; CDF values would all sit near 0.5 and cancel.
        let p = (std_erf(upper) - std_erf(lower)) / (std_erf(b) - std_erf(a));
        if p.is_nan() { p } else { p.clamp(0.0, 1.0) }
    }
}

/// `erf` of a standard normal variate, i.e. `2 * Phi(z) - 1`.
#[inline]
fn std_erf(z: f64) -> f64 {
    erf(z / SQRT_2)
}

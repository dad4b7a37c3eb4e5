use crate::{
    config::SamplerConfig,
    math::{PI_SQ, tanhc},
    rng::{BitSource, sample_gamma},
};
use std::f64::consts::PI;

const PI2_SQ_RECIP: f64 = 1.0 / (2.0 * PI_SQ);

/// Truncated gamma convolution for PG(h, z).
///
/// PG(h, z) has the representation
///
/// ```text
/// PG(h, z) = 1/(2π²) · Σ_{k≥1} g_k / ((k − ½)² + z²/(4π²)),   g_k ~ Gamma(h, 1)
/// ```
///
/// The first `terms` summands are drawn; the rest are replaced by their expectation, which is
/// known in closed form because the full mean of PG(h, z) is. The number of terms is chosen so
/// that the variance of what is dropped stays below `gamma_tolerance` times the variance kept.
/// The method never rejects, so it is also the fallback when an exact sampler stalls.
#[derive(Debug, Clone)]
pub(crate) struct GammaSeries {
    shape: f64,
    /// (z / 2π)²
    c2: f64,
    terms: usize,
    tail_mean: f64,
}

impl GammaSeries {
    pub(crate) fn new(shape: f64, tilt: f64, config: &SamplerConfig) -> Self {
        let c2 = (tilt / (2.0 * PI)).powi(2);
        let max_terms = config.gamma_max_terms.max(1);

        let mut kept_mean = 0.0;
        let mut kept_var = 0.0;
        let mut terms = 0;
        while terms < max_terms {
            terms += 1;
            let half = terms as f64 - 0.5;
            let den = half * half + c2;
            kept_mean += den.recip();
            kept_var += (den * den).recip();
            if remainder_variance(half, c2) <= config.gamma_tolerance * kept_var {
                break;
            }
        }

        // Σ_k 1/((k − ½)² + c²) = π²/2 · tanh(z/2)/(z/2)
        let full_mean = 0.5 * PI_SQ * tanhc(0.5 * tilt);
        let tail_mean = shape * (full_mean - kept_mean).max(0.0) * PI2_SQ_RECIP;

        Self {
            shape,
            c2,
            terms,
            tail_mean,
        }
    }

    pub(crate) fn draw<B: BitSource + ?Sized>(&self, bits: &mut B) -> f64 {
        let mut sum = 0.0;
        for k in 1..=self.terms {
            let half = k as f64 - 0.5;
            sum += sample_gamma(bits, self.shape) / (half * half + self.c2);
        }
        sum * PI2_SQ_RECIP + self.tail_mean
    }

    #[cfg(test)]
    fn terms(&self) -> usize {
        self.terms
    }
}

/// Upper bound on Σ_{j>k} 1/((j − ½)² + c²)² given `x = k − ½`, via ∫_x^∞ dy/(y² + c²)².
fn remainder_variance(x: f64, c2: f64) -> f64 {
    if x * x > 100.0 * c2 {
        (3.0 * x * x * x).recip()
    } else {
        let c = c2.sqrt();
        (c / x).atan() / (2.0 * c2 * c) - x / (2.0 * c2 * (x * x + c2))
    }
}

//! Tunable limits for the sampling loops.

/// Default cap on candidate proposals per exact draw.
pub const DEFAULT_MAX_PROPOSALS: usize = 1000;
/// Default cap on alternating-series terms evaluated per candidate.
pub const DEFAULT_MAX_SERIES_TERMS: usize = 500;
/// Default bound on the variance share of the terms the gamma convolution leaves out.
pub const DEFAULT_GAMMA_TOLERANCE: f64 = 1e-6;
/// Default cap on terms in the gamma convolution.
pub const DEFAULT_GAMMA_MAX_TERMS: usize = 1000;

/// Safety caps and truncation settings shared by the samplers.
///
/// The exact samplers (Devroye, alternate) run rejection loops whose length is random. With
/// sane parameters they accept after one or two proposals and a handful of series terms, so
/// the defaults are never reached. When a cap is hit the draw is redone with a sampler that
/// always terminates, and a `tracing` warning is emitted.
///
/// # Example
/// ```
/// use polyagamma::{Method, PolyaGamma, SamplerConfig};
///
/// let config = SamplerConfig::default()
///     .with_max_proposals(50)
///     .with_gamma_tolerance(1e-8);
/// let pg = PolyaGamma::new(2.0)?
///     .with_method(Method::Devroye)
///     .with_config(config);
/// assert_eq!(pg.config().max_proposals, 50);
/// # Ok::<(), polyagamma::PgError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Candidates drawn by one exact draw before giving up.
    pub max_proposals: usize,
    /// Series terms evaluated for one candidate before giving up.
    pub max_series_terms: usize,
    /// Largest share of the total variance the gamma convolution may drop.
    pub gamma_tolerance: f64,
    /// Hard cap on the number of gamma terms.
    pub gamma_max_terms: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_proposals: DEFAULT_MAX_PROPOSALS,
            max_series_terms: DEFAULT_MAX_SERIES_TERMS,
            gamma_tolerance: DEFAULT_GAMMA_TOLERANCE,
            gamma_max_terms: DEFAULT_GAMMA_MAX_TERMS,
        }
    }
}

impl SamplerConfig {
    pub fn with_max_proposals(mut self, max_proposals: usize) -> Self {
        self.max_proposals = max_proposals;
        self
    }

    pub fn with_max_series_terms(mut self, max_series_terms: usize) -> Self {
        self.max_series_terms = max_series_terms;
        self
    }

    /// A non-positive tolerance makes the convolution run to `gamma_max_terms`.
    pub fn with_gamma_tolerance(mut self, gamma_tolerance: f64) -> Self {
        self.gamma_tolerance = gamma_tolerance;
        self
    }

    /// A cap of zero is treated as one.
    pub fn with_gamma_max_terms(mut self, gamma_max_terms: usize) -> Self {
        self.gamma_max_terms = gamma_max_terms;
        self
    }
}

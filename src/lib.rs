//! # Polya-Gamma Sampler
//!
//! This crate draws random variates from the Polya-Gamma distribution PG(h, z), the latent
//! variable behind data augmentation for logistic, binomial and negative binomial models.
//!
//! ## Features
//!
//! - **Four samplers:**
//!   - a truncated sum of gamma variates ([`Method::Gamma`]), valid for every `h > 0`;
//!   - Devroye's exact rejection sampler for PG(1, z) ([`Method::Devroye`]);
//!   - Windle's alternate exact sampler for `1 <= h <= 4` ([`Method::Alternate`]);
//!   - a saddle-point approximation for large `h` ([`Method::Saddle`]).
//! - **Hybrid dispatch:** [`Method::Hybrid`] (the default) picks a sampler from `(h, z)`.
//!   Larger shapes are handled by superposition: PG(h + h', z) is the sum of independent
//!   PG(h, z) and PG(h', z) draws.
//! - **Batch sampling:** [`fill`], [`PolyaGamma::fill`] and, with the default `rayon`
//!   feature, reproducible parallel batches.
//!
//! The exact samplers run rejection loops bounded by the caps in [`SamplerConfig`]. Should a
//! cap ever be reached the draw is redone with a sampler that always terminates and a
//! `tracing` warning is emitted; callers never see a stall.
//!
//! ## Mathematical Background
//!
//! - Polson, N.G., Scott, J.G., & Windle, J. (2013). Bayesian Inference for Logistic Models
//!   Using Polya-Gamma Latent Variables. *JASA*, 108(504): 1339–1349.
//! - Windle, J., Polson, N.G., & Scott, J.G. (2014). Sampling Pólya-Gamma random variates:
//!   alternate and approximate techniques. arXiv:1405.0506.
//!
//! ## Usage Example
//!
//! ```rust
//! use polyagamma::{Method, PolyaGamma};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let pg = PolyaGamma::new(1.0)?;
//! let x = pg.draw(&mut rng, 1.5)?;
//! assert!(x > 0.0);
//!
//! let y = polyagamma::sample(&mut rng, 2.5, -0.7, Method::Alternate)?;
//! assert!(y > 0.0);
//! # Ok::<(), polyagamma::PgError>(())
//! ```
//!
//! ## License
//! This crate is dual-licensed under the MIT OR Apache-2.0 licenses.

use tracing::{debug, warn};

#[cfg(feature = "rayon")]
use rand::{Rng, SeedableRng, thread_rng};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

mod alternate;
mod config;
mod devroye;
mod error;
mod gamma;
mod math;
mod method;
mod rng;
mod saddle;

use alternate::{AlternateEnvelope, MAX_PIECE_SHAPE};
use devroye::DevroyeEnvelope;
use error::{NumericalStall, check_shape, check_tilt};
use gamma::GammaSeries;
use saddle::SaddlePoint;

pub use config::{
    DEFAULT_GAMMA_MAX_TERMS, DEFAULT_GAMMA_TOLERANCE, DEFAULT_MAX_PROPOSALS,
    DEFAULT_MAX_SERIES_TERMS, SamplerConfig,
};
pub use error::PgError;
pub use method::{Method, Sampler};
pub use rng::BitSource;

/// Tilts per parallel chunk in the deterministic batch functions.
#[cfg(feature = "rayon")]
const PAR_CHUNK_SIZE: usize = 32;

/// Polya-Gamma sampler for a fixed shape `h`.
///
/// The tilt `z` is passed per draw, so one sampler serves a whole vector of linear
/// predictors. The method defaults to [`Method::Hybrid`] and the limits to
/// [`SamplerConfig::default`].
///
/// # Example
/// ```rust
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// use polyagamma::PolyaGamma;
///
/// let mut pg = PolyaGamma::new(1.0)?;
/// let mut rng = StdRng::seed_from_u64(0);
///
/// // PG(1, 0.5)
/// let a = pg.draw(&mut rng, 0.5)?;
///
/// // PG(3.5, -1.2)
/// pg.set_shape(3.5)?;
/// let b = pg.draw(&mut rng, -1.2)?;
/// assert!(a > 0.0 && b > 0.0);
/// # Ok::<(), polyagamma::PgError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolyaGamma {
    shape: f64,
    method: Method,
    config: SamplerConfig,
}

impl PolyaGamma {
    /// Create a sampler for PG(`shape`, ·).
    ///
    /// # Errors
    /// [`PgError::Domain`] unless `shape` is positive and finite.
    pub fn new(shape: f64) -> Result<Self, PgError> {
        Ok(Self {
            shape: check_shape(shape)?,
            method: Method::default(),
            config: SamplerConfig::default(),
        })
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    /// Change the shape. On error the sampler is left unchanged.
    pub fn set_shape(&mut self, shape: f64) -> Result<(), PgError> {
        self.shape = check_shape(shape)?;
        Ok(())
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Mean of PG(h, `tilt`): `h·tanh(z/2) / (2z)`, or `h/4` at `z = 0`.
    pub fn mean(&self, tilt: f64) -> f64 {
        math::pg_mean(self.shape, tilt)
    }

    /// Variance of PG(h, `tilt`).
    pub fn variance(&self, tilt: f64) -> f64 {
        math::pg_variance(self.shape, tilt)
    }

    /// Draw a single Polya-Gamma random variate PG(h, `tilt`).
    ///
    /// # Errors
    /// [`PgError::Domain`] if `tilt` is not finite. No randomness is consumed in that case.
    pub fn draw<B: BitSource + ?Sized>(&self, bits: &mut B, tilt: f64) -> Result<f64, PgError> {
        let tilt = check_tilt(tilt)?;
        Ok(self.plan(tilt).draw(bits))
    }

    /// Fill `out` with independent PG(h, `tilt`) draws.
    ///
    /// The sampler is set up once for the whole buffer.
    ///
    /// # Example
    /// ```rust
    /// # use rand::SeedableRng;
    /// # use rand::rngs::StdRng;
    /// use polyagamma::PolyaGamma;
    ///
    /// let pg = PolyaGamma::new(10.0)?;
    /// let mut out = [0.0; 64];
    /// pg.fill(&mut StdRng::seed_from_u64(1), 2.0, &mut out)?;
    /// assert!(out.iter().all(|&x| x > 0.0));
    /// # Ok::<(), polyagamma::PgError>(())
    /// ```
    pub fn fill<B: BitSource + ?Sized>(
        &self,
        bits: &mut B,
        tilt: f64,
        out: &mut [f64],
    ) -> Result<(), PgError> {
        let tilt = check_tilt(tilt)?;
        if out.is_empty() {
            return Ok(());
        }
        self.plan(tilt).fill(bits, out);
        Ok(())
    }

    /// Draw one PG(h, z) variate for every `z` in `tilts`.
    ///
    /// # Errors
    /// [`PgError::Domain`] if any tilt is not finite; every tilt is checked before the first
    /// draw.
    pub fn draw_vec<B: BitSource + ?Sized>(
        &self,
        bits: &mut B,
        tilts: &[f64],
    ) -> Result<Vec<f64>, PgError> {
        check_tilts(tilts)?;
        Ok(tilts.iter().map(|&z| self.plan(z).draw(bits)).collect())
    }

    /// Draw one PG(h, z) variate for every `z` in `tilts`, in parallel.
    ///
    /// A seed is taken from `rng` and every chunk of tilts gets its own generator seeded
    /// from it, so the output depends only on the state of `rng` and not on the thread count.
    ///
    /// Note that this function is slightly slower than [`draw_vec_par`](Self::draw_vec_par),
    /// which should be preferred when reproducibility does not matter.
    ///
    /// # Example
    /// ```rust
    /// # use rand::SeedableRng;
    /// # use rand::rngs::StdRng;
    /// use polyagamma::PolyaGamma;
    ///
    /// let pg = PolyaGamma::new(1.0)?;
    /// let a = pg.draw_vec_par_deterministic(&mut StdRng::seed_from_u64(0), &[0.5; 100])?;
    /// let b = pg.draw_vec_par_deterministic(&mut StdRng::seed_from_u64(0), &[0.5; 100])?;
    /// assert_eq!(a, b);
    /// # Ok::<(), polyagamma::PgError>(())
    /// ```
    #[cfg(feature = "rayon")]
    pub fn draw_vec_par_deterministic<R: SeedableRng + Rng>(
        &self,
        rng: &mut R,
        tilts: &[f64],
    ) -> Result<Vec<f64>, PgError> {
        check_tilts(tilts)?;
        if tilts.is_empty() {
            return Ok(Vec::new());
        }
        let seed = rng.next_u64();
        Ok(tilts
            .par_chunks(PAR_CHUNK_SIZE)
            .enumerate()
            .flat_map_iter(|(i, chunk)| {
                let mut rng = R::seed_from_u64(seed.wrapping_add(i as u64));
                chunk
                    .iter()
                    .map(|&z| self.plan(z).draw(&mut rng))
                    .collect::<Vec<_>>()
            })
            .collect())
    }

    /// Fill `out` with PG(h, `tilt`) draws in parallel, reproducibly.
    ///
    /// Chunks are seeded the same way as in
    /// [`draw_vec_par_deterministic`](Self::draw_vec_par_deterministic).
    #[cfg(feature = "rayon")]
    pub fn fill_par_deterministic<R: SeedableRng + Rng>(
        &self,
        rng: &mut R,
        tilt: f64,
        out: &mut [f64],
    ) -> Result<(), PgError> {
        let tilt = check_tilt(tilt)?;
        if out.is_empty() {
            return Ok(());
        }
        let seed = rng.next_u64();
        let plan = self.plan(tilt);
        out.par_chunks_mut(PAR_CHUNK_SIZE)
            .enumerate()
            .for_each(|(i, chunk)| {
                let mut rng = R::seed_from_u64(seed.wrapping_add(i as u64));
                plan.fill(&mut rng, chunk);
            });
        Ok(())
    }

    /// Draw one PG(h, z) variate for every `z` in `tilts`, in parallel, with thread-local
    /// generators.
    ///
    /// # Example
    /// ```rust
    /// use polyagamma::PolyaGamma;
    ///
    /// let pg = PolyaGamma::new(1.0)?;
    /// let samples = pg.draw_vec_par(&[0.5; 100])?;
    /// assert_eq!(samples.len(), 100);
    /// # Ok::<(), polyagamma::PgError>(())
    /// ```
    #[cfg(feature = "rayon")]
    pub fn draw_vec_par(&self, tilts: &[f64]) -> Result<Vec<f64>, PgError> {
        check_tilts(tilts)?;
        Ok(tilts
            .par_iter()
            .map_init(thread_rng, |rng, &z| self.plan(z).draw(rng))
            .collect())
    }

    fn plan(&self, tilt: f64) -> Plan<'_> {
        Plan::new(self.shape, tilt, self.method, &self.config)
    }
}

/// Draw a single PG(`h`, `z`) variate with the given method.
///
/// # Errors
/// [`PgError::Domain`] if `h` is not positive and finite or `z` is not finite. The bit source
/// is untouched on error.
///
/// # Example
/// ```rust
/// use polyagamma::{Method, PgError, sample};
/// # use rand::SeedableRng;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
///
/// let x = sample(&mut rng, 1.0, 0.0, Method::Devroye)?;
/// assert!(x > 0.0);
/// assert!(matches!(sample(&mut rng, 0.0, 0.0, Method::Hybrid), Err(PgError::Domain { .. })));
/// # Ok::<(), PgError>(())
/// ```
pub fn sample<B: BitSource + ?Sized>(
    bits: &mut B,
    h: f64,
    z: f64,
    method: Method,
) -> Result<f64, PgError> {
    PolyaGamma::new(h)?.with_method(method).draw(bits, z)
}

/// Write `n` independent PG(`h`, `z`) draws into `out[..n]`.
///
/// Slots past `n` are left untouched and `n = 0` draws nothing.
///
/// # Errors
/// [`PgError::Domain`] for invalid `h` or `z`, and [`PgError::BufferTooSmall`] when
/// `out.len() < n`. Arguments are validated in that order, before any draw.
pub fn fill<B: BitSource + ?Sized>(
    bits: &mut B,
    h: f64,
    z: f64,
    method: Method,
    n: usize,
    out: &mut [f64],
) -> Result<(), PgError> {
    let pg = PolyaGamma::new(h)?.with_method(method);
    let z = check_tilt(z)?;
    let len = out.len();
    let slots = out.get_mut(..n).ok_or(PgError::BufferTooSmall { needed: n, len })?;
    pg.fill(bits, z, slots)
}

fn check_tilts(tilts: &[f64]) -> Result<(), PgError> {
    tilts.iter().try_for_each(|&z| check_tilt(z).map(drop))
}

/// A sampler resolved for one `(h, z)` pair.
///
/// Envelope constants are computed here once and shared by every draw made with the plan.
#[derive(Debug)]
struct Plan<'a> {
    tilt: f64,
    config: &'a SamplerConfig,
    kind: PlanKind,
}

#[derive(Debug)]
enum PlanKind {
    GammaSum(GammaSeries),
    /// `units` PG(1, z) draws plus an optional alternate draw for a fractional shape.
    Devroye {
        units: usize,
        unit: DevroyeEnvelope,
        remainder: Option<(f64, AlternateEnvelope)>,
    },
    /// `pieces` draws of equal shape, each at most [`MAX_PIECE_SHAPE`].
    Alternate {
        pieces: usize,
        piece_shape: f64,
        piece: AlternateEnvelope,
    },
    SaddlePoint(SaddlePoint),
}

impl<'a> Plan<'a> {
    fn new(h: f64, tilt: f64, method: Method, config: &'a SamplerConfig) -> Self {
        let sampler = method.resolve(h, tilt);
        let kind = match sampler {
            Sampler::Devroye | Sampler::Alternate if h < 1.0 => {
                debug!(h, z = tilt, %sampler, "shape below the exact range, using the gamma sum");
                PlanKind::GammaSum(GammaSeries::new(h, tilt, config))
            }
            Sampler::GammaSum => PlanKind::GammaSum(GammaSeries::new(h, tilt, config)),
            Sampler::Devroye => {
                let whole = h.floor();
                let fraction = h - whole;
                if fraction > 0.0 {
                    let rest = 1.0 + fraction;
                    PlanKind::Devroye {
                        units: whole as usize - 1,
                        unit: DevroyeEnvelope::new(tilt),
                        remainder: Some((rest, AlternateEnvelope::new(rest, tilt))),
                    }
                } else {
                    PlanKind::Devroye {
                        units: whole as usize,
                        unit: DevroyeEnvelope::new(tilt),
                        remainder: None,
                    }
                }
            }
            Sampler::Alternate => {
                let pieces = (h / MAX_PIECE_SHAPE).ceil();
                let piece_shape = (h / pieces).clamp(1.0, MAX_PIECE_SHAPE);
                PlanKind::Alternate {
                    pieces: pieces as usize,
                    piece_shape,
                    piece: AlternateEnvelope::new(piece_shape, tilt),
                }
            }
            Sampler::SaddlePoint => PlanKind::SaddlePoint(SaddlePoint::new(h, tilt)),
        };
        Self { tilt, config, kind }
    }

    fn fill<B: BitSource + ?Sized>(&self, bits: &mut B, out: &mut [f64]) {
        for slot in out {
            *slot = self.draw(bits);
        }
    }

    fn draw<B: BitSource + ?Sized>(&self, bits: &mut B) -> f64 {
        match &self.kind {
            PlanKind::GammaSum(series) => series.draw(bits),
            PlanKind::Devroye {
                units,
                unit,
                remainder,
            } => {
                let mut sum = 0.0;
                for _ in 0..*units {
                    sum += self.devroye_unit(bits, unit);
                }
                if let Some((shape, envelope)) = remainder {
                    sum += self.alternate_piece(bits, *shape, envelope);
                }
                sum
            }
            PlanKind::Alternate {
                pieces,
                piece_shape,
                piece,
            } => (0..*pieces)
                .map(|_| self.alternate_piece(bits, *piece_shape, piece))
                .sum(),
            PlanKind::SaddlePoint(saddle) => saddle.draw(bits),
        }
    }

    /// PG(1, z) by Devroye's method, redrawn with the alternate sampler on a stall.
    fn devroye_unit<B: BitSource + ?Sized>(&self, bits: &mut B, unit: &DevroyeEnvelope) -> f64 {
        match unit.draw(bits, self.config) {
            Ok(x) => x,
            Err(stall) => self.redraw_unit(bits, stall),
        }
    }

    /// Replace a stalled Devroye unit with an alternate draw at `h = 1`.
    fn redraw_unit<B: BitSource + ?Sized>(&self, bits: &mut B, stall: NumericalStall) -> f64 {
        self.report(1.0, stall, Sampler::Alternate);
        self.alternate_piece(bits, 1.0, &AlternateEnvelope::new(1.0, self.tilt))
    }

    /// PG(`shape`, z) by the alternate method, redrawn with the gamma sum on a stall.
    fn alternate_piece<B: BitSource + ?Sized>(
        &self,
        bits: &mut B,
        shape: f64,
        envelope: &AlternateEnvelope,
    ) -> f64 {
        match envelope.draw(bits, self.config) {
            Ok(x) => x,
            Err(stall) => {
                self.report(shape, stall, Sampler::GammaSum);
                GammaSeries::new(shape, self.tilt, self.config).draw(bits)
            }
        }
    }

    fn report(&self, shape: f64, stall: NumericalStall, fallback: Sampler) {
        warn!(
            h = shape,
            z = self.tilt,
            sampler = %stall.sampler,
            limit = stall.limit,
            %fallback,
            "{stall}, redrawing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Empirical mean from `n` draws
    fn empirical_mean(pg: &PolyaGamma, z: f64, n: usize, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = vec![0.0; n];
        pg.fill(&mut rng, z, &mut out).unwrap();
        out.iter().sum::<f64>() / n as f64
    }

    fn assert_mean(pg: &PolyaGamma, z: f64, n: usize, seed: u64) {
        let emp = empirical_mean(pg, z, n, seed);
        let se = (pg.variance(z) / n as f64).sqrt();
        assert!(
            (emp - pg.mean(z)).abs() < 4.0 * se,
            "PG({}, {z}) via {}: empirical {emp}, theory {}",
            pg.shape(),
            pg.method(),
            pg.mean(z)
        );
    }

    #[test]
    fn devroye_superposition_splits_the_shape() {
        let config = SamplerConfig::default();
        match Plan::new(3.0, 0.5, Method::Devroye, &config).kind {
            PlanKind::Devroye {
                units, remainder, ..
            } => {
                assert_eq!(units, 3);
                assert!(remainder.is_none());
            }
            other => panic!("unexpected plan {other:?}"),
        }
        match Plan::new(2.25, 0.5, Method::Devroye, &config).kind {
            PlanKind::Devroye {
                units, remainder, ..
            } => {
                assert_eq!(units, 1);
                assert_eq!(remainder.map(|(h, _)| h), Some(1.25));
            }
            other => panic!("unexpected plan {other:?}"),
        }
        match Plan::new(1.5, 0.5, Method::Devroye, &config).kind {
            PlanKind::Devroye { units, .. } => assert_eq!(units, 0),
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn alternate_pieces_stay_in_range() {
        let config = SamplerConfig::default();
        for (h, expected) in [(1.0, 1), (4.0, 1), (4.5, 2), (8.0, 2), (9.0, 3), (100.0, 25)] {
            match Plan::new(h, 1.0, Method::Alternate, &config).kind {
                PlanKind::Alternate {
                    pieces,
                    piece_shape,
                    ..
                } => {
                    assert_eq!(pieces, expected, "h = {h}");
                    assert!((1.0..=MAX_PIECE_SHAPE).contains(&piece_shape));
                    approx::assert_relative_eq!(pieces as f64 * piece_shape, h, max_relative = 1e-12);
                }
                other => panic!("unexpected plan {other:?}"),
            }
        }
    }

    #[test]
    fn small_shapes_fall_back_to_the_gamma_sum() {
        let config = SamplerConfig::default();
        for method in [Method::Devroye, Method::Alternate, Method::Gamma, Method::Hybrid] {
            let plan = Plan::new(0.4, 2.0, method, &config);
            assert!(matches!(plan.kind, PlanKind::GammaSum(_)), "{method}");
        }
    }

    #[test]
    fn non_integer_shape_means_match_theory() {
        for method in [Method::Devroye, Method::Alternate, Method::Hybrid] {
            let pg = PolyaGamma::new(1.7).unwrap().with_method(method);
            assert_mean(&pg, 0.0, 25_000, 1);
            assert_mean(&pg, 1.0, 25_000, 2);
        }
    }

    #[test]
    fn stalls_fall_back_without_bias() {
        let config = SamplerConfig::default()
            .with_max_proposals(0)
            .with_max_series_terms(0);
        for method in [Method::Devroye, Method::Alternate] {
            let pg = PolyaGamma::new(2.0)
                .unwrap()
                .with_method(method)
                .with_config(config);
            assert_mean(&pg, 1.5, 20_000, 3);
        }
    }

    #[test]
    fn stalled_devroye_units_are_redrawn_by_the_alternate_sampler() {
        let config = SamplerConfig::default();
        let z = 1.5;
        let plan = Plan::new(1.0, z, Method::Devroye, &config);
        let stall = NumericalStall {
            sampler: Sampler::Devroye,
            limit: config.max_proposals,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let n = 20_000;
        let mean = (0..n).map(|_| plan.redraw_unit(&mut rng, stall)).sum::<f64>() / n as f64;
        let se = (math::pg_variance(1.0, z) / n as f64).sqrt();
        assert!(
            (mean - math::pg_mean(1.0, z)).abs() < 4.0 * se,
            "redrawn PG(1, {z}): mean {mean}, expected {}",
            math::pg_mean(1.0, z)
        );

        // The alternate envelope accepts under these caps, so no gamma sum is involved.
        let envelope = AlternateEnvelope::new(1.0, z);
        assert!(envelope.draw(&mut rng, &config).is_ok());
    }

    #[test]
    fn set_shape_keeps_old_value_on_error() {
        let mut pg = PolyaGamma::new(2.0).unwrap();
        assert!(pg.set_shape(-1.0).is_err());
        assert_eq!(pg.shape(), 2.0);
        pg.set_shape(0.25).unwrap();
        assert_eq!(pg.shape(), 0.25);
    }

    #[test]
    fn empty_inputs_draw_nothing() {
        let pg = PolyaGamma::new(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(pg.draw_vec(&mut rng, &[]).unwrap().is_empty());
        pg.fill(&mut rng, 0.0, &mut []).unwrap();
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_batches_are_reproducible() {
        let pg = PolyaGamma::new(1.3).unwrap();
        let tilts: Vec<f64> = (0..500).map(|i| (i as f64 - 250.0) / 25.0).collect();
        let a = pg
            .draw_vec_par_deterministic(&mut StdRng::seed_from_u64(5), &tilts)
            .unwrap();
        let b = pg
            .draw_vec_par_deterministic(&mut StdRng::seed_from_u64(5), &tilts)
            .unwrap();
        assert_eq!(a, b);

        let mut x = vec![0.0; 300];
        let mut y = vec![0.0; 300];
        pg.fill_par_deterministic(&mut StdRng::seed_from_u64(6), 2.0, &mut x)
            .unwrap();
        pg.fill_par_deterministic(&mut StdRng::seed_from_u64(6), 2.0, &mut y)
            .unwrap();
        assert_eq!(x, y);
        assert!(x.iter().all(|v| v.is_finite() && *v > 0.0));

        let free = pg.draw_vec_par(&tilts).unwrap();
        assert_eq!(free.len(), tilts.len());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_batches_validate_first() {
        let pg = PolyaGamma::new(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pg.draw_vec_par(&[1.0, f64::NAN]).is_err());
        assert!(pg
            .draw_vec_par_deterministic(&mut rng, &[f64::INFINITY])
            .is_err());
        assert!(pg
            .fill_par_deterministic(&mut rng, f64::NAN, &mut [0.0; 4])
            .is_err());
    }
}

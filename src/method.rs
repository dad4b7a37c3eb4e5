//! Sampling method tags and the hybrid selection policy.

use std::fmt;
use std::str::FromStr;

use crate::error::PgError;

/// Shape at and above which the hybrid policy always uses the saddle-point sampler.
const SADDLE_MIN_SHAPE: f64 = 8.0;
/// Shape above which the saddle-point sampler is used when the half tilt is moderate.
const SADDLE_MODERATE_SHAPE: f64 = 4.0;
/// Largest half tilt `|z|/2` for which moderate shapes go to the saddle-point sampler.
const SADDLE_MAX_HALF_TILT: f64 = 4.0;
/// Largest half tilt for which integer shapes other than 1 go to Devroye's sampler.
const DEVROYE_MAX_HALF_TILT: f64 = 1.0;

/// Which algorithm to draw PG(h, z) with.
///
/// | method      | exact | best suited for                          |
/// |-------------|-------|------------------------------------------|
/// | `Gamma`     | no    | any `h`; truncated sum of gammas         |
/// | `Devroye`   | yes   | integer `h`, small `|z|`                 |
/// | `Alternate` | yes   | `h >= 1`, moderate `h`                   |
/// | `Saddle`    | no    | large `h`                                |
/// | `Hybrid`    | mixed | picks one of the above from `(h, z)`     |
///
/// `Devroye` and `Alternate` build a draw from unit or bounded-shape pieces, so their cost
/// grows linearly in `h`: PG(1000, z) takes a thousand Devroye units. Forcing either on a
/// very large shape is slow, and shapes beyond `usize::MAX` pieces never finish. `Hybrid`
/// sends every `h >= 8` to the saddle-point sampler, whose cost does not depend on `h`.
///
/// Methods parse from their lowercase names:
/// ```
/// use polyagamma::Method;
///
/// let m: Method = "Devroye".parse().unwrap();
/// assert_eq!(m, Method::Devroye);
/// assert!("slice".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    Gamma,
    Devroye,
    Alternate,
    Saddle,
    #[default]
    Hybrid,
}

/// One of the four concrete samplers a [`Method`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampler {
    GammaSum,
    Devroye,
    Alternate,
    SaddlePoint,
}

impl Method {
    /// All method tags, in declaration order.
    pub const ALL: [Method; 5] = [
        Method::Gamma,
        Method::Devroye,
        Method::Alternate,
        Method::Saddle,
        Method::Hybrid,
    ];

    /// Resolve this tag to a concrete sampler for PG(h, z).
    ///
    /// Explicit tags map to their own sampler. `Hybrid` applies the selection thresholds of
    /// Windle, Polson & Scott (2014) on `h` and the half tilt `|z|/2`:
    /// - saddle point when `h >= 8`, or `h > 4` and `|z|/2 <= 4`;
    /// - Devroye when `h == 1`, or `h` is an integer and `|z|/2 <= 1`;
    /// - alternate for the remaining `h >= 1`;
    /// - gamma convolution for `h < 1`, where neither exact sampler applies.
    ///
    /// ```
    /// use polyagamma::{Method, Sampler};
    ///
    /// assert_eq!(Method::Hybrid.resolve(1.0, 10.0), Sampler::Devroye);
    /// assert_eq!(Method::Hybrid.resolve(2.5, 0.0), Sampler::Alternate);
    /// assert_eq!(Method::Hybrid.resolve(20.0, 3.0), Sampler::SaddlePoint);
    /// assert_eq!(Method::Gamma.resolve(20.0, 3.0), Sampler::GammaSum);
    /// ```
    pub fn resolve(self, h: f64, z: f64) -> Sampler {
        match self {
            Method::Gamma => Sampler::GammaSum,
            Method::Devroye => Sampler::Devroye,
            Method::Alternate => Sampler::Alternate,
            Method::Saddle => Sampler::SaddlePoint,
            Method::Hybrid => hybrid(h, 0.5 * z.abs()),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Gamma => "gamma",
            Method::Devroye => "devroye",
            Method::Alternate => "alternate",
            Method::Saddle => "saddle",
            Method::Hybrid => "hybrid",
        }
    }
}

fn hybrid(h: f64, half_tilt: f64) -> Sampler {
    let integral = h == h.floor();
    if h >= SADDLE_MIN_SHAPE || (h > SADDLE_MODERATE_SHAPE && half_tilt <= SADDLE_MAX_HALF_TILT)
    {
        Sampler::SaddlePoint
    } else if h == 1.0 || (integral && half_tilt <= DEVROYE_MAX_HALF_TILT) {
        Sampler::Devroye
    } else if h >= 1.0 {
        Sampler::Alternate
    } else {
        Sampler::GammaSum
    }
}

impl FromStr for Method {
    type Err = PgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| PgError::UnsupportedMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sampler::GammaSum => "gamma-sum",
            Sampler::Devroye => "devroye",
            Sampler::Alternate => "alternate",
            Sampler::SaddlePoint => "saddle-point",
        })
    }
}

//! Error types surfaced by the sampling entry points.

use thiserror::Error;

use crate::method::Sampler;

/// Errors returned by [`PolyaGamma`](crate::PolyaGamma), [`sample`](crate::sample) and
/// [`fill`](crate::fill).
///
/// Every variant is raised before the bit source is touched, so a failed call never consumes
/// random draws.
///
/// # Examples
/// ```
/// use polyagamma::{PgError, PolyaGamma};
///
/// let err = PolyaGamma::new(-1.0).unwrap_err();
/// assert_eq!(err, PgError::Domain { name: "h", value: -1.0 });
/// assert_eq!(err.to_string(), "parameter h is outside its domain: -1");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PgError {
    /// A parameter lies outside the support of PG(h, z): `h` must be positive and finite,
    /// `z` must be finite.
    #[error("parameter {name} is outside its domain: {value}")]
    Domain {
        /// Parameter name, `"h"` or `"z"`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The method tag is not one of `gamma`, `devroye`, `alternate`, `saddle`, `hybrid`.
    #[error("unsupported sampling method: {0:?}")]
    UnsupportedMethod(String),

    /// The output buffer is shorter than the number of requested draws.
    #[error("output buffer holds {len} values but {needed} were requested")]
    BufferTooSmall {
        /// Number of draws requested.
        needed: usize,
        /// Length of the buffer supplied.
        len: usize,
    },
}

/// A rejection loop hit its safety cap.
///
/// Only the dispatcher sees this; it answers by substituting a sampler that always terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{sampler} sampler gave up after {limit} iterations")]
pub(crate) struct NumericalStall {
    pub(crate) sampler: Sampler,
    pub(crate) limit: usize,
}

pub(crate) fn check_shape(h: f64) -> Result<f64, PgError> {
    if h.is_finite() && h > 0.0 {
        Ok(h)
    } else {
        Err(PgError::Domain {
            name: "h",
            value: h,
        })
    }
}

pub(crate) fn check_tilt(z: f64) -> Result<f64, PgError> {
    if z.is_finite() {
        Ok(z)
    } else {
        Err(PgError::Domain {
            name: "z",
            value: z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_must_be_positive_and_finite() {
        assert_eq!(check_shape(0.5), Ok(0.5));
        assert!(check_shape(0.0).is_err());
        assert!(check_shape(-3.0).is_err());
        assert!(check_shape(f64::NAN).is_err());
        assert!(check_shape(f64::INFINITY).is_err());
    }

    #[test]
    fn tilt_may_be_any_finite_value() {
        assert_eq!(check_tilt(-40.0), Ok(-40.0));
        assert_eq!(check_tilt(0.0), Ok(0.0));
        assert!(check_tilt(f64::NAN).is_err());
        assert!(check_tilt(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = PgError::BufferTooSmall { needed: 8, len: 3 };
        assert_eq!(
            err.to_string(),
            "output buffer holds 3 values but 8 were requested"
        );
        let err = PgError::UnsupportedMethod("slice".into());
        assert_eq!(err.to_string(), "unsupported sampling method: \"slice\"");
    }
}

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` if the value exceeds
/// `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use zplot::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(100).unwrap(), 100.0);
///
/// let too_big = (MAX_SAFE_U64_INT + 1) as usize;
/// assert!(usize_to_f64_checked(too_big).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize) -> EvalResult<f64> {
    match u64::try_from(value) {
        Ok(v) if v <= MAX_SAFE_U64_INT => Ok(v as f64),
        _ => Err(RuntimeError::InvalidArgument { details: format!("{value} is too large to convert to a real number") }),
    }
}

/// Safely converts an `f64` to `usize` if the value is finite, non-negative,
/// within range, and not fractional.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` for non-finite, negative,
/// out-of-range, or fractional values.
///
/// ## Example
/// ```
/// use zplot::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(7.0).unwrap(), 7);
/// assert!(f64_to_usize_checked(-5.0).is_err());
/// assert!(f64_to_usize_checked(1.23).is_err());
/// assert!(f64_to_usize_checked(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_checked(value: f64) -> EvalResult<usize> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot convert non-finite value {value} to a count") });
    }
    if value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(RuntimeError::InvalidArgument { details: format!("{value} is out of range for a count") });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("{value} is fractional and cannot be used as a count") });
    }
    usize::try_from(value as u64).map_err(|_| RuntimeError::InvalidArgument { details: format!("{value} is out of range for a count") })
}

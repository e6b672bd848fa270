use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, symbols::Arity},
};

/// Checks that a callable received an accepted number of arguments.
///
/// The parser already enforces the arity a callable was registered with, so
/// this only fails when a callable is registered with a wider arity than its
/// body handles.
///
/// # Errors
/// `ArgumentCountMismatch` if `args.len()` lies outside `expected`.
///
/// # Example
/// ```
/// use zplot::interpreter::{evaluator::utils::check_arity, symbols::Arity};
///
/// assert!(check_arity(&[1.0, 2.0], Arity::exactly(2)).is_ok());
/// assert!(check_arity(&[1.0], Arity::exactly(2)).is_err());
/// ```
pub const fn check_arity<T>(args: &[T], expected: Arity) -> EvalResult<()> {
    if expected.contains(args.len()) {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { expected,
                                                  found: args.len() })
    }
}

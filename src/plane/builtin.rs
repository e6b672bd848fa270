use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        symbols::Arity,
        value::complex::ComplexNumber,
    },
};

/// Signature shared by every complex builtin.
pub type ComplexFn = fn(&[ComplexNumber]) -> EvalResult<ComplexNumber>;

/// Defines a one-argument builtin that forwards to a `ComplexNumber` method.
///
/// The generated functions accept exactly one argument and never fail; any
/// non-finite result is returned as is.
///
/// # Example
/// ```
/// use zplot::{plane::builtin::sin, ComplexNumber};
///
/// let r = sin(&[ComplexNumber::new(std::f64::consts::FRAC_PI_2, 0.0)]).unwrap();
/// assert!((r.real - 1.0).abs() < 1e-12);
/// ```
macro_rules! complex_builtin {
    ($fname:ident, $method:ident) => {
        pub fn $fname(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
            check_arity(args, Arity::exactly(1))?;
            Ok(args[0].$method())
        }
    };
}

complex_builtin!(sin, sin);
complex_builtin!(cos, cos);
complex_builtin!(tan, tan);
complex_builtin!(arcsin, asin);
complex_builtin!(arccos, acos);
complex_builtin!(arctan, atan);
complex_builtin!(sh, sinh);
complex_builtin!(ch, cosh);
complex_builtin!(th, tanh);
complex_builtin!(arsh, asinh);
complex_builtin!(arch, acosh);
complex_builtin!(arth, atanh);

/// The gamma function.
///
/// # Errors
/// `Singularity` at the poles `0, -1, -2, ...`.
///
/// # Example
/// ```
/// use zplot::{error::RuntimeError, plane::builtin::gamma, ComplexNumber};
///
/// let r = gamma(&[ComplexNumber::new(6.0, 0.0)]).unwrap();
/// assert!((r.real - 120.0).abs() < 1e-8);
///
/// let pole = gamma(&[ComplexNumber::new(-2.0, 0.0)]);
/// assert_eq!(pole, Err(RuntimeError::Singularity { function: "gamma" }));
/// ```
pub fn gamma(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(1))?;
    let z = args[0];
    if z.imaginary == 0.0 && z.real <= 0.0 && z.real.fract() == 0.0 {
        return Err(RuntimeError::Singularity { function: "gamma" });
    }
    Ok(z.gamma())
}

/// `a + b`
pub fn add(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(2))?;
    Ok(args[0] + args[1])
}

/// `a - b`
pub fn sub(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(2))?;
    Ok(args[0] - args[1])
}

/// `a * b`
pub fn mul(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(2))?;
    Ok(args[0] * args[1])
}

/// `a / b`
///
/// # Errors
/// `DivisionByZero` if `b` is exactly zero.
pub fn div(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(2))?;
    if args[1].is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(args[0] / args[1])
}

/// `a ^ b`, using the principal branch.
///
/// Real exponents go through the polar form directly; complex exponents
/// through `exp(b ln a)`.
///
/// # Errors
/// `DivisionByZero` for a zero base with an exponent whose real part is not
/// positive (other than `0 ^ 0`, which is 1).
pub fn pow(args: &[ComplexNumber]) -> EvalResult<ComplexNumber> {
    check_arity(args, Arity::exactly(2))?;
    let (base, exp) = (args[0], args[1]);

    if base.is_zero() && !exp.is_zero() && exp.real <= 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    if exp.imaginary == 0.0 && !base.is_zero() {
        return Ok(base.powf(exp.real));
    }
    Ok(base.powc(exp))
}

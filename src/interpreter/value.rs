/// Complex number support.
///
/// Defines the `ComplexNumber` type used by the complex-plane configuration:
/// arithmetic, powers, logarithms, trigonometric and hyperbolic functions and
/// their inverses, and the gamma function.
pub mod complex;

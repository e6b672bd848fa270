/// Complex callables backing the functions and operators of the language.
pub mod builtin;
/// Compiled user expressions bound to an engine, with fallback to the default
/// expression.
pub mod plot;
/// The complex-plane language: literal rules, constants, functions and
/// operators.
pub mod reference;
/// Sampling of a transformation over a grid of lines.
///
/// # Responsibilities
/// - Lays out vertical and horizontal lines over the viewed region.
/// - Replaces failed samples with an invalid marker instead of aborting.
/// - Samples sequentially or one line per `rayon` task with identical
///   results.
pub mod sampler;

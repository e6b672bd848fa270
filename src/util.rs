/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between `usize` and
/// `f64` without risking silent data loss or rounding errors. The grid sampler
/// uses them to turn spans and step sizes into line and sample counts.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or an error if the value is out of range or not an integer.
pub mod num;

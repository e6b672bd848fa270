//! # zplot
//!
//! zplot compiles user-written mathematical expressions into trees and
//! evaluates them many times over. The expression engine is generic over the
//! value type: the lexical rules and the tables of variables, functions and
//! operators are supplied at construction. The crate ships one such language
//! for complex-valued transformations `z -> f(z)` of the plane, together with
//! a sampler that evaluates a transformation over a grid of lines.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::error::Error;

use crate::{ast::CompiledExpr, interpreter::evaluator::bindings::Binding, plane::reference};

/// Defines the structure of compiled expressions.
///
/// This module declares the `Node` tree that the parser builds and the
/// evaluator walks, and the `CompiledExpr` wrapper handed out to callers.
///
/// # Responsibilities
/// - Represents literals, variable references and calls.
/// - Keeps each call's callable resolved at compile time.
/// - Prints trees fully parenthesised for inspection.
pub mod ast;
/// Provides the error types for compilation and evaluation.
///
/// Syntax errors carry the kind of failure and the character offset of the
/// offending token. Runtime errors report numeric failures and violations of
/// the symbol-table contract.
pub mod error;
/// The generic expression engine.
///
/// This module ties together the lexical rules, the symbol tables, the
/// tokenizer, the parser and the evaluator.
///
/// # Responsibilities
/// - Coordinates tokenizing, parsing and evaluation.
/// - Provides entry points for compiling and evaluating expressions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The complex-plane expression language and grid sampling.
pub mod plane;
/// General utilities for safe numeric conversion.
pub mod util;

pub use interpreter::value::complex::ComplexNumber;

/// Compiles `source` with the shared complex-plane engine.
///
/// # Errors
/// The syntax error, if `source` does not compile.
///
/// # Examples
/// ```
/// use zplot::compile;
///
/// let expr = compile("sin(z) + 1").unwrap();
/// assert_eq!(expr.variables(), ["z"]);
///
/// let err = compile("sin(z").unwrap_err();
/// assert_eq!(err.offset, 3);
/// ```
pub fn compile(source: &str) -> Result<CompiledExpr<ComplexNumber>, error::SyntaxError> {
    reference::shared().compile(source)
}

/// Compiles `source` and evaluates it once with `z` bound to the given point.
///
/// # Errors
/// Returns an error if compilation or evaluation fails.
///
/// # Examples
/// ```
/// use zplot::{evaluate_at, ComplexNumber};
///
/// let value = evaluate_at("z*z", ComplexNumber::new(0.0, 1.0)).unwrap();
/// assert_eq!(value, ComplexNumber::new(-1.0, 0.0));
///
/// assert!(evaluate_at("1/(z-1)", ComplexNumber::new(1.0, 0.0)).is_err());
/// ```
pub fn evaluate_at(source: &str, z: ComplexNumber) -> Result<ComplexNumber, Box<dyn Error>> {
    let engine = reference::shared();
    let expr = engine.compile(source)?;
    let binding = Binding::new(reference::FREE_VARIABLE, z);
    Ok(engine.evaluate(&expr, &binding)?)
}

/// Compile-time errors.
///
/// Defines the error produced when source text cannot be turned into a
/// compiled expression: unknown identifiers, malformed literals, arity
/// violations and unbalanced grouping. Every syntax error carries the
/// zero-based character offset of the offending token.
pub mod syntax_error;
/// Evaluation-time errors.
///
/// Contains the errors raised while evaluating a compiled expression or while
/// rebinding variables: numeric failures reported by stored callables and
/// symbol-table contract violations.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use syntax_error::{SyntaxError, SyntaxErrorKind};

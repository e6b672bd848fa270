/// The evaluator module computes results from compiled expressions.
///
/// The evaluator walks a compiled tree, resolves variables from the variable
/// table or from explicit bindings, and invokes the stored callables.
///
/// # Responsibilities
/// - Evaluates compiled trees for any value type.
/// - Supplies free-variable values per call instead of through shared state.
/// - Passes callable failures through to the caller untouched.
pub mod evaluator;
/// Ties the lexical rules and symbol tables together.
///
/// The engine is the entry point for compiling source strings and evaluating
/// the results.
pub mod engine;
/// The lexer module tokenizes source text for further parsing.
///
/// Punctuation and whitespace are fixed; literals follow the pluggable
/// character classes, and names are matched longest-first against the symbol
/// tables.
///
/// # Responsibilities
/// - Converts the input text into tokens with character offsets.
/// - Builds literal values through the literal constructor.
/// - Reports unknown names and rejected literals with their offset.
pub mod lexer;
/// The parser module builds compiled expressions from tokens.
///
/// # Responsibilities
/// - Groups operators by declared precedence, left to right.
/// - Validates call arity against the function and operator tables.
/// - Reports the offset of the first offending token.
pub mod parser;
/// Name-keyed tables for variables, functions and operators.
pub mod symbols;
/// Pluggable lexical rules: literal character classes and the literal
/// constructor.
pub mod syntax;
/// Value types for concrete expression languages.
///
/// The engine itself is generic; this module provides the complex number type
/// used by the complex-plane configuration.
pub mod value;

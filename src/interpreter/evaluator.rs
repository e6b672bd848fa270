/// Core evaluation logic.
///
/// Walks a compiled expression, resolves variables and invokes the stored
/// callables.
pub mod core;

/// Per-evaluation variable bindings.
///
/// Supplies values for free variables explicitly at each call instead of
/// through shared mutable state.
pub mod bindings;

/// Utility functions for evaluation.
///
/// Provides checks shared by callable implementations.
pub mod utils;

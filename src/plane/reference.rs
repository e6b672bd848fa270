//! The complex-plane expression language.
//!
//! Literals are non-negative real decimals such as `2`, `0.5` or `.25`. The
//! free variable `z` stands for the point being transformed; `i`, `pi` and `e`
//! are constants. The functions are the usual trigonometric and hyperbolic
//! families plus `gamma`, and the operators `+ - * / ^` are binary and
//! left-associative.

use std::{
    f64::consts::{E, PI},
    sync::LazyLock,
};

use crate::{
    ast::CompiledExpr,
    interpreter::{
        engine::{CompileResult, Engine},
        symbols::{
            Arity, FunctionEntry, OperatorEntry, SymbolStore, SymbolTables, VariableEntry,
        },
        syntax::Syntax,
        value::complex::{ComplexNumber, I, ZERO},
    },
    plane::builtin::{self, ComplexFn},
};

/// Name of the variable bound to the sampled point.
pub const FREE_VARIABLE: &str = "z";

/// Expression used when the requested one does not compile.
pub const DEFAULT_EXPRESSION: &str = "gamma(z)";

static FUNCTIONS: &[(&str, ComplexFn)] = &[("sin", builtin::sin),
                                           ("cos", builtin::cos),
                                           ("tan", builtin::tan),
                                           ("arcsin", builtin::arcsin),
                                           ("arccos", builtin::arccos),
                                           ("arctan", builtin::arctan),
                                           ("sh", builtin::sh),
                                           ("ch", builtin::ch),
                                           ("th", builtin::th),
                                           ("arsh", builtin::arsh),
                                           ("arch", builtin::arch),
                                           ("arth", builtin::arth),
                                           ("gamma", builtin::gamma)];

static OPERATORS: &[(&str, u32, ComplexFn)] = &[("+", 2, builtin::add),
                                                ("-", 2, builtin::sub),
                                                ("*", 3, builtin::mul),
                                                ("/", 3, builtin::div),
                                                ("^", 4, builtin::pow)];

static SHARED: LazyLock<Engine<ComplexNumber>> = LazyLock::new(engine);

/// Whether `c` may appear in a numeric literal.
#[must_use]
pub const fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Parses a real decimal literal into a point on the real axis.
///
/// # Example
/// ```
/// use zplot::{plane::reference::parse_literal, ComplexNumber};
///
/// assert_eq!(parse_literal(".5"), Some(ComplexNumber::new(0.5, 0.0)));
/// assert_eq!(parse_literal("1.2.3"), None);
/// ```
#[must_use]
pub fn parse_literal(text: &str) -> Option<ComplexNumber> {
    text.parse::<f64>().ok().map(|real| ComplexNumber::new(real, 0.0))
}

/// Lexical rules of the language.
#[must_use]
pub fn syntax() -> Syntax<ComplexNumber> {
    Syntax::new(is_literal_char, is_literal_char, parse_literal)
}

/// `z` (free, initially zero) and the constants `i`, `pi` and `e`.
#[must_use]
pub fn variables() -> SymbolStore<VariableEntry<ComplexNumber>> {
    let mut store = SymbolStore::new();
    store.insert(FREE_VARIABLE, VariableEntry::free(ZERO));
    store.insert("i", VariableEntry::constant(I));
    store.insert("pi", VariableEntry::constant(ComplexNumber::from(PI)));
    store.insert("e", VariableEntry::constant(ComplexNumber::from(E)));
    store
}

/// The unary functions.
#[must_use]
pub fn functions() -> SymbolStore<FunctionEntry<ComplexNumber>> {
    let mut store = SymbolStore::new();
    for &(name, func) in FUNCTIONS {
        store.insert(name, FunctionEntry::new(Arity::exactly(1), func));
    }
    store
}

/// The binary arithmetic operators.
#[must_use]
pub fn operators() -> SymbolStore<OperatorEntry<ComplexNumber>> {
    let mut store = SymbolStore::new();
    for &(name, precedence, func) in OPERATORS {
        store.insert(name, OperatorEntry::new(Arity::exactly(2), precedence, func));
    }
    store
}

/// All three symbol tables.
#[must_use]
pub fn symbols() -> SymbolTables<ComplexNumber> {
    SymbolTables::new(variables(), functions(), operators())
}

/// A fresh engine for the language.
///
/// Use this when the symbol tables need to be modified; otherwise
/// [`shared`] avoids rebuilding them.
///
/// # Example
/// ```
/// use zplot::{plane::reference, ComplexNumber};
///
/// let mut engine = reference::engine();
/// let expr = engine.compile("z*z + 1").unwrap();
///
/// engine.symbols_mut().rebind("z", ComplexNumber::new(0.0, 1.0)).unwrap();
/// assert_eq!(engine.evaluate(&expr, &()).unwrap(), ComplexNumber::new(0.0, 0.0));
/// ```
#[must_use]
pub fn engine() -> Engine<ComplexNumber> {
    Engine::new(syntax(), symbols())
}

/// A process-wide engine, built on first use.
#[must_use]
pub fn shared() -> &'static Engine<ComplexNumber> {
    &SHARED
}

/// Compiles [`DEFAULT_EXPRESSION`].
///
/// # Errors
/// Never fails with the built-in symbol tables; the error type is kept so
/// callers can treat it like any other compilation.
pub fn default_expression(engine: &Engine<ComplexNumber>) -> CompileResult<CompiledExpr<ComplexNumber>> {
    engine.compile(DEFAULT_EXPRESSION)
}

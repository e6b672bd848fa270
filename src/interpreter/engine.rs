use tracing::debug;

use crate::{
    ast::CompiledExpr,
    interpreter::{
        evaluator::{
            bindings::Bindings,
            core::{EvalResult, Evaluator},
        },
        lexer::{self, Token},
        parser::core::{ParseResult, parse_expression},
        symbols::SymbolTables,
        syntax::Syntax,
    },
};

/// Result type of compilation.
pub type CompileResult<T> = ParseResult<T>;

/// An expression language: lexical rules plus symbol tables.
///
/// The engine compiles source strings and evaluates the compiled trees. Both
/// operations only read the configuration, so one engine can serve any number
/// of compiled expressions and, when `T` is `Send + Sync`, any number of
/// threads.
///
/// # Example
/// ```
/// use zplot::interpreter::{
///     engine::Engine,
///     symbols::{Arity, OperatorEntry, SymbolTables, VariableEntry},
///     syntax::Syntax,
/// };
///
/// let syntax = Syntax::new(|c: char| c.is_ascii_digit(),
///                          |c: char| c.is_ascii_digit(),
///                          |text: &str| text.parse::<i64>().ok());
///
/// let mut symbols = SymbolTables::default();
/// symbols.variables.insert("x", VariableEntry::free(0));
/// symbols.operators.insert("+", OperatorEntry::new(Arity::exactly(2), 1, |a: &[i64]| Ok(a[0] + a[1])));
/// symbols.operators.insert("*", OperatorEntry::new(Arity::exactly(2), 2, |a: &[i64]| Ok(a[0] * a[1])));
///
/// let engine = Engine::new(syntax, symbols);
/// let expr = engine.compile("1 + 2*x").unwrap();
///
/// assert_eq!(engine.evaluate(&expr, &[("x", 5)]).unwrap(), 11);
/// assert_eq!(engine.evaluate(&expr, &()).unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine<T> {
    syntax:  Syntax<T>,
    symbols: SymbolTables<T>,
}

impl<T: Clone> Engine<T> {
    /// Builds an engine from its lexical rules and symbol tables.
    #[must_use]
    pub const fn new(syntax: Syntax<T>, symbols: SymbolTables<T>) -> Self {
        Self { syntax, symbols }
    }

    /// The lexical rules.
    #[must_use]
    pub const fn syntax(&self) -> &Syntax<T> {
        &self.syntax
    }

    /// The symbol tables.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTables<T> {
        &self.symbols
    }

    /// The symbol tables, for registering entries or rebinding free
    /// variables between evaluations.
    pub const fn symbols_mut(&mut self) -> &mut SymbolTables<T> {
        &mut self.symbols
    }

    /// Splits source text into classified tokens.
    ///
    /// # Errors
    /// See [`lexer::tokenize`].
    pub fn tokenize(&self, source: &str) -> CompileResult<Vec<Token<T>>> {
        lexer::tokenize(source, &self.syntax, &self.symbols)
    }

    /// Compiles source text into an evaluable expression.
    ///
    /// Compilation has no side effects. Compiling again, with the same or a
    /// different string, never depends on earlier compiles.
    ///
    /// # Errors
    /// A [`SyntaxError`](crate::error::SyntaxError) carrying the character
    /// offset of the offending token.
    pub fn compile(&self, source: &str) -> CompileResult<CompiledExpr<T>> {
        let result = self.tokenize(source).and_then(|tokens| {
                                               parse_expression(&tokens,
                                                                &self.symbols,
                                                                source.chars().count())
                                           });

        match &result {
            Ok(expr) => debug!(source, nodes = expr.root().size(), "compiled expression"),
            Err(err) => debug!(source, offset = err.offset, kind = ?err.kind, "compile failed"),
        }
        result
    }

    /// Evaluates a compiled expression once.
    ///
    /// Free variables take their value from `bindings` when bound there and
    /// from the variable table otherwise. Pass `&()` to use the stored values
    /// only.
    ///
    /// Each call sets up a fresh [`Evaluator`]. Hot loops should hold one
    /// from [`Engine::evaluator`] instead, which keeps its value stack.
    ///
    /// # Errors
    /// Any error raised by a callable, unchanged.
    pub fn evaluate<B>(&self, expr: &CompiledExpr<T>, bindings: &B) -> EvalResult<T>
        where B: Bindings<T> + ?Sized
    {
        self.evaluator().evaluate(expr, bindings)
    }

    /// A reusable evaluator over this engine's variables.
    #[must_use]
    pub const fn evaluator(&self) -> Evaluator<'_, T> {
        Evaluator::new(&self.symbols.variables)
    }
}

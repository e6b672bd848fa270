use tracing::debug;

use crate::{
    ast::{CompiledExpr, Node},
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        lexer::Token,
        symbols::{FunctionEntry, OperatorEntry, SymbolTables},
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest allowed nesting of groups, calls and prefix operators.
pub const MAX_DEPTH: usize = 256;

/// A cursor over an owned token sequence.
///
/// The parser never mutates the symbol tables and keeps no state between
/// compiles; a new cursor is created for every source string.
pub(crate) struct Parser<'a, T> {
    pub(in crate::interpreter::parser) tokens:  &'a [Token<T>],
    pub(in crate::interpreter::parser) symbols: &'a SymbolTables<T>,
    pos:                                        usize,
    depth:                                      usize,
    /// Character length of the source, reported when input runs out.
    end:                                        usize,
}

/// Parses a complete token sequence into a compiled expression.
///
/// Grammar:
/// ```text
///     expression := unary (operator unary)*
///     unary      := prefix_operator unary | primary
///     primary    := literal | variable | call | "(" expression ")"
///     call       := function "(" (expression ("," expression)*)? ")"
///                 | function primary
/// ```
/// Operators are grouped by precedence, then left to right.
///
/// # Parameters
/// - `tokens`: The tokens produced by the lexer.
/// - `symbols`: The tables the tokens were classified against.
/// - `end`: Character length of the source text.
///
/// # Errors
/// Returns the offset of the first token that cannot be part of a valid
/// expression. See [`SyntaxErrorKind`] for the possible reasons.
pub fn parse_expression<T: Clone>(tokens: &[Token<T>],
                                  symbols: &SymbolTables<T>,
                                  end: usize)
                                  -> ParseResult<CompiledExpr<T>> {
    if tokens.is_empty() {
        return Err(SyntaxError::new(SyntaxErrorKind::EmptyInput, 0));
    }

    let mut parser = Parser { tokens,
                              symbols,
                              pos: 0,
                              depth: 0,
                              end };
    let root = parser.parse_binary(0)?;

    if let Some(token) = parser.peek() {
        debug!(offset = token.offset, "trailing tokens after expression");
        return Err(SyntaxError::new(SyntaxErrorKind::TrailingTokens, token.offset));
    }

    Ok(CompiledExpr::new(root))
}

impl<'a, T: Clone> Parser<'a, T> {
    /// The next unread token.
    pub(in crate::interpreter::parser) fn peek(&self) -> Option<&'a Token<T>> {
        self.tokens.get(self.pos)
    }

    /// Consumes the next token.
    pub(in crate::interpreter::parser) const fn advance(&mut self) {
        self.pos += 1;
    }

    /// Error for input that ended where more was required.
    pub(in crate::interpreter::parser) const fn end_of_input(&self) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::UnexpectedEndOfInput, self.end)
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` at `offset` once [`MAX_DEPTH`] levels are
    /// open, so adversarial input cannot exhaust the stack.
    pub(in crate::interpreter::parser) fn nested<R>(&mut self,
                                                    offset: usize,
                                                    f: impl FnOnce(&mut Self) -> ParseResult<R>)
                                                    -> ParseResult<R> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::new(SyntaxErrorKind::NestingTooDeep, offset));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Resolves an operator token against the operator table.
    pub(in crate::interpreter::parser) fn operator(&self,
                                                   name: &str,
                                                   offset: usize)
                                                   -> ParseResult<&'a OperatorEntry<T>> {
        self.symbols
            .operators
            .get(name)
            .ok_or(SyntaxError::new(SyntaxErrorKind::UnknownIdentifier, offset))
    }

    /// Resolves a function token against the function table.
    pub(in crate::interpreter::parser) fn function(&self,
                                                   name: &str,
                                                   offset: usize)
                                                   -> ParseResult<&'a FunctionEntry<T>> {
        self.symbols
            .functions
            .get(name)
            .ok_or(SyntaxError::new(SyntaxErrorKind::UnknownIdentifier, offset))
    }

    /// Resolves a variable token, checking that it is still registered.
    pub(in crate::interpreter::parser) fn variable(&self,
                                                   name: &str,
                                                   offset: usize)
                                                   -> ParseResult<Node<T>> {
        if self.symbols.variables.contains(name) {
            Ok(Node::Variable(name.to_string()))
        } else {
            Err(SyntaxError::new(SyntaxErrorKind::UnknownIdentifier, offset))
        }
    }
}

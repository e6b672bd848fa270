use crate::{
    ast::{CallKind, Node},
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
        symbols::OperatorEntry,
    },
};

impl<'a, T: Clone> Parser<'a, T> {
    /// Parses an operand followed by any infix operators binding at least as
    /// tightly as `min_precedence`.
    ///
    /// Each operator found is consumed and its right operand is parsed with a
    /// threshold one above the operator's own precedence. Tighter operators
    /// are therefore absorbed into the right operand, while an operator of
    /// equal precedence ends it and is folded in by this loop, which makes
    /// every level left-associative:
    ///
    /// ```text
    ///     1 + 2 * 3   =>  (1 + (2 * 3))
    ///     8 - 3 - 2   =>  ((8 - 3) - 2)
    /// ```
    ///
    /// # Errors
    /// - `ArityMismatch` at an operator that is registered but cannot take two
    ///   operands.
    /// - Any error from parsing the operands.
    pub(in crate::interpreter::parser) fn parse_binary(&mut self,
                                                       min_precedence: u32)
                                                       -> ParseResult<Node<T>> {
        let mut left = self.parse_unary()?;

        while let Some((name, entry, offset)) = self.peek_infix(min_precedence)? {
            self.advance();
            let right = self.nested(offset, |p| {
                                p.parse_binary(entry.precedence.saturating_add(1))
                            })?;
            left = Node::call(CallKind::Operator, name, &entry.callable, vec![left, right]);
        }

        Ok(left)
    }

    /// Returns the next token if it is an operator at or above
    /// `min_precedence`.
    fn peek_infix(&self,
                  min_precedence: u32)
                  -> ParseResult<Option<(&'a str, &'a OperatorEntry<T>, usize)>> {
        let Some(Token { kind: TokenKind::Operator(name),
                         offset, }) = self.peek()
        else {
            return Ok(None);
        };

        let entry = self.operator(name, *offset)?;
        if entry.precedence < min_precedence {
            return Ok(None);
        }
        if !entry.is_infix() {
            return Err(SyntaxError::new(SyntaxErrorKind::ArityMismatch, *offset));
        }

        Ok(Some((name.as_str(), entry, *offset)))
    }
}

use crate::{
    ast::Node,
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl<T: Clone> Parser<'_, T> {
    /// Parses a comma-separated argument list after its opening parenthesis.
    ///
    /// An immediately encountered `)` produces an empty list; the caller
    /// checks the count against the function's arity.
    ///
    /// Grammar (simplified): `arguments := (expression ("," expression)*)? ")"`
    ///
    /// # Parameters
    /// - `open`: Offset of the opening parenthesis.
    /// - `max`: The most arguments the function accepts. A comma after the
    ///   last allowed argument is an arity error.
    ///
    /// # Errors
    /// - `ArityMismatch` at `open` when more than `max` arguments are given.
    /// - `UnclosedParen` at `open` when the input ends before `)`.
    /// - `UnexpectedToken` at any token other than `,` or `)` after an
    ///   argument.
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self,
                                                          open: usize,
                                                          max: usize)
                                                          -> ParseResult<Vec<Node<T>>> {
        let mut arguments = Vec::new();
        if let Some(Token { kind: TokenKind::RParen,
                            .. }) = self.peek()
        {
            self.advance();
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_binary(0)?);
            match self.peek() {
                Some(Token { kind: TokenKind::Comma,
                             .. }) => {
                    if arguments.len() >= max {
                        return Err(SyntaxError::new(SyntaxErrorKind::ArityMismatch, open));
                    }
                    self.advance();
                },
                Some(Token { kind: TokenKind::RParen,
                             .. }) => {
                    self.advance();
                    break;
                },
                Some(token) => {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, token.offset));
                },
                None => return Err(SyntaxError::new(SyntaxErrorKind::UnclosedParen, open)),
            }
        }

        Ok(arguments)
    }
}

use crate::{
    ast::{CallKind, Node},
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl<T: Clone> Parser<'_, T> {
    /// Parses a prefix operator application or a primary.
    ///
    /// An operator in operand position is a prefix operator. It is accepted
    /// only if its arity admits a single argument; its operand extends over
    /// every operator that binds tighter than itself, so with `-` at
    /// precedence 2 and `^` at 4, `-z^2` parses as `-(z^2)`.
    ///
    /// Grammar:
    /// ```text
    ///     unary := prefix_operator unary | primary
    /// ```
    ///
    /// # Errors
    /// - `UnexpectedToken` at an operator that cannot be used as a prefix.
    /// - `UnexpectedEndOfInput` if no operand follows.
    pub(in crate::interpreter::parser) fn parse_unary(&mut self) -> ParseResult<Node<T>> {
        match self.peek() {
            Some(Token { kind: TokenKind::Operator(name),
                         offset, }) => {
                let entry = self.operator(name, *offset)?;
                if !entry.is_prefix() {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, *offset));
                }
                self.advance();
                let operand = self.nested(*offset, |p| {
                                      p.parse_binary(entry.precedence.saturating_add(1))
                                  })?;
                Ok(Node::call(CallKind::Operator, name, &entry.callable, vec![operand]))
            },
            _ => self.parse_primary(),
        }
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Primary expressions are:
    /// - literals
    /// - variable references
    /// - function calls
    /// - parenthesised expressions
    ///
    /// Grammar:
    /// ```text
    ///     primary := literal
    ///              | variable
    ///              | function "(" arguments ")"
    ///              | function primary
    ///              | "(" expression ")"
    /// ```
    ///
    /// # Errors
    /// - `UnexpectedToken` at a `)`, `,` or operator in primary position.
    /// - `UnexpectedEndOfInput` if the tokens ran out.
    /// - Errors from nested groups and calls.
    pub(in crate::interpreter::parser) fn parse_primary(&mut self) -> ParseResult<Node<T>> {
        let token = self.peek().ok_or_else(|| self.end_of_input())?;

        match &token.kind {
            TokenKind::Literal(value) => {
                self.advance();
                Ok(Node::Literal(value.clone()))
            },
            TokenKind::Variable(name) => {
                let node = self.variable(name, token.offset)?;
                self.advance();
                Ok(node)
            },
            TokenKind::Function(name) => self.parse_call(name, token.offset),
            TokenKind::LParen => self.parse_grouping(token.offset),
            TokenKind::Operator(_) | TokenKind::RParen | TokenKind::Comma => {
                Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, token.offset))
            },
        }
    }

    /// Parses a function call, with or without a parenthesised argument list.
    ///
    /// `sin(z)` passes the listed arguments. `sin z` passes the single primary
    /// that follows the name, so `sin z^2` means `(sin z)^2`.
    ///
    /// # Errors
    /// `ArityMismatch` at the opening parenthesis (or at the function name
    /// for the bare form) if the argument count lies outside the declared
    /// arity.
    fn parse_call(&mut self, name: &str, offset: usize) -> ParseResult<Node<T>> {
        let entry = self.function(name, offset)?;
        self.advance();

        let (arguments, arity_offset) = match self.peek() {
            Some(Token { kind: TokenKind::LParen,
                         offset: paren, }) => {
                let paren = *paren;
                self.advance();
                (self.nested(paren, |p| p.parse_arguments(paren, entry.arity.max))?, paren)
            },
            _ => (vec![self.nested(offset, Self::parse_primary)?], offset),
        };

        if !entry.arity.contains(arguments.len()) {
            return Err(SyntaxError::new(SyntaxErrorKind::ArityMismatch, arity_offset));
        }

        Ok(Node::call(CallKind::Function, name, &entry.callable, arguments))
    }

    /// Parses a parenthesised expression.
    ///
    /// Grammar: `grouping := "(" expression ")"`
    ///
    /// # Errors
    /// - `UnclosedParen` at the opening parenthesis if the input ends first.
    /// - `UnexpectedToken` at whatever token stands where `)` was expected.
    fn parse_grouping(&mut self, open: usize) -> ParseResult<Node<T>> {
        self.advance();
        let inner = self.nested(open, |p| p.parse_binary(0))?;

        match self.peek() {
            Some(Token { kind: TokenKind::RParen,
                         .. }) => {
                self.advance();
                Ok(inner)
            },
            Some(token) => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, token.offset)),
            None => Err(SyntaxError::new(SyntaxErrorKind::UnclosedParen, open)),
        }
    }
}

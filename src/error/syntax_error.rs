/// Classifies why compilation stopped.
///
/// The kind is structural information for callers; it never replaces the
/// offset, which is always present on a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The text at the offset matches no registered variable, function or
    /// operator name.
    UnknownIdentifier,
    /// A literal was scanned but the literal constructor rejected it.
    InvalidLiteral,
    /// A call received a number of arguments outside the declared arity.
    ArityMismatch,
    /// An opening parenthesis was never closed.
    UnclosedParen,
    /// A token appeared where it cannot start or continue an expression.
    UnexpectedToken,
    /// The expression was complete but more tokens followed.
    TrailingTokens,
    /// The source contained no tokens at all.
    EmptyInput,
    /// The source ended where an operand was required.
    UnexpectedEndOfInput,
    /// Parentheses or prefix operators were nested too deeply.
    NestingTooDeep,
}

/// A failed compilation, located by character offset.
///
/// The offset is zero-based and counts characters, not bytes. It lies in
/// `0..=len` where `len` is the character length of the source; `len` itself
/// is used when the text ended too early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    /// Why compilation failed.
    pub kind:   SyntaxErrorKind,
    /// Character offset of the offending token.
    pub offset: usize,
}

impl SyntaxError {
    /// Creates a syntax error of the given kind at a character offset.
    ///
    /// # Example
    /// ```
    /// use zplot::error::{SyntaxError, SyntaxErrorKind};
    ///
    /// let err = SyntaxError::new(SyntaxErrorKind::TrailingTokens, 3);
    /// assert_eq!(err.offset, 3);
    /// assert_eq!(err.to_string(), "syntax error at offset 3: extra tokens after expression");
    /// ```
    #[must_use]
    pub const fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier => write!(f, "unknown identifier"),
            Self::InvalidLiteral => write!(f, "invalid literal"),
            Self::ArityMismatch => write!(f, "wrong number of arguments"),
            Self::UnclosedParen => write!(f, "unclosed parenthesis"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::TrailingTokens => write!(f, "extra tokens after expression"),
            Self::EmptyInput => write!(f, "empty input"),
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Self::NestingTooDeep => write!(f, "expression is nested too deeply"),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error at offset {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

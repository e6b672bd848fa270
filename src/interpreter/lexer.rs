use logos::Logos;
use tracing::trace;

use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        parser::core::ParseResult,
        symbols::{SymbolKind, SymbolTables},
        syntax::Syntax,
    },
};

/// The fixed part of the grammar.
///
/// Parentheses and commas are always punctuation, and whitespace always
/// separates tokens. Every other maximal stretch of characters is a `Run`
/// that the symbol tables and the literal rules split further.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Lexeme {
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Literals, names and operators without separating whitespace, such as
    /// `2*z` or `pi`.
    #[regex(r"[^\s(),]+")]
    Run,
    /// Whitespace.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// What a token stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<T> {
    /// A literal already converted by the literal constructor.
    Literal(T),
    /// A registered variable name.
    Variable(String),
    /// A registered function name.
    Function(String),
    /// A registered operator name.
    Operator(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

/// A classified token and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<T> {
    /// The token class and payload.
    pub kind:   TokenKind<T>,
    /// Zero-based character offset in the source.
    pub offset: usize,
}

impl<T> Token<T> {
    const fn new(kind: TokenKind<T>, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Converts the byte positions reported by the lexer into character offsets.
///
/// Positions must be requested in increasing order, so the whole scan stays
/// linear in the length of the source.
struct CharOffsets<'s> {
    source: &'s str,
    byte:   usize,
    chars:  usize,
}

impl<'s> CharOffsets<'s> {
    const fn new(source: &'s str) -> Self {
        Self { source,
               byte: 0,
               chars: 0 }
    }

    fn at(&mut self, byte: usize) -> usize {
        self.chars += self.source[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Splits source text into classified tokens.
///
/// Whitespace is skipped. Within each run of non-punctuation characters the
/// scanner repeatedly takes either a literal (when the current character
/// starts one) or the longest registered name at that position.
///
/// # Errors
/// - `InvalidLiteral` at the literal's first character if the literal
///   constructor rejects the scanned text.
/// - `UnknownIdentifier` at the first character that starts neither a literal
///   nor any registered name.
///
/// # Example
/// ```
/// use zplot::{interpreter::lexer::TokenKind, plane::reference};
///
/// let engine = reference::engine();
/// let tokens = engine.tokenize("sin(2*pi)").unwrap();
///
/// assert_eq!(tokens[0].kind, TokenKind::Function("sin".to_string()));
/// assert_eq!(tokens[3].kind, TokenKind::Operator("*".to_string()));
/// assert_eq!(tokens[4].offset, 6);
/// ```
pub fn tokenize<T>(source: &str,
                   syntax: &Syntax<T>,
                   symbols: &SymbolTables<T>)
                   -> ParseResult<Vec<Token<T>>> {
    let mut tokens = Vec::new();
    let mut offsets = CharOffsets::new(source);
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let offset = offsets.at(lexer.span().start);
        match lexeme {
            Ok(Lexeme::LParen) => tokens.push(Token::new(TokenKind::LParen, offset)),
            Ok(Lexeme::RParen) => tokens.push(Token::new(TokenKind::RParen, offset)),
            Ok(Lexeme::Comma) => tokens.push(Token::new(TokenKind::Comma, offset)),
            Ok(Lexeme::Run) => split_run(lexer.slice(), offset, syntax, symbols, &mut tokens)?,
            Ok(Lexeme::Ignored) => {},
            Err(()) => {
                return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, offset));
            },
        }
    }

    trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

/// Splits one run of adjacent literals and names.
fn split_run<T>(run: &str,
                mut offset: usize,
                syntax: &Syntax<T>,
                symbols: &SymbolTables<T>,
                tokens: &mut Vec<Token<T>>)
                -> ParseResult<()> {
    let mut rest = run;

    while !rest.is_empty() {
        let (len, kind) = if let Some(len) = syntax.literal_len(rest) {
            let value =
                syntax.make_literal(&rest[..len])
                      .ok_or(SyntaxError::new(SyntaxErrorKind::InvalidLiteral, offset))?;
            (len, TokenKind::Literal(value))
        } else if let Some(found) = symbols.longest_symbol(rest) {
            let name = found.name.to_string();
            let kind = match found.kind {
                SymbolKind::Function => TokenKind::Function(name),
                SymbolKind::Operator => TokenKind::Operator(name),
                SymbolKind::Variable => TokenKind::Variable(name),
            };
            (found.name.len(), kind)
        } else {
            return Err(SyntaxError::new(SyntaxErrorKind::UnknownIdentifier, offset));
        };

        tokens.push(Token::new(kind, offset));
        offset += rest[..len].chars().count();
        rest = &rest[len..];
    }

    Ok(())
}

use std::{fmt, sync::Arc};

/// A character-class test used while scanning literals.
pub type CharClass = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// Turns the text of a scanned literal into a value.
///
/// Returns `None` to reject the text, which the tokenizer reports as an
/// invalid literal at the literal's first character.
pub type LiteralConstructor<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// The pluggable lexical rules of an expression language.
///
/// A literal starts at a character accepted by `starts_literal` and extends
/// over every following character accepted by `continues_literal`. The
/// scanned text is handed to `make_literal`.
///
/// Built once and shared by reference; none of the closures may keep mutable
/// state that changes their answers between calls.
pub struct Syntax<T> {
    starts_literal:    CharClass,
    continues_literal: CharClass,
    make_literal:      LiteralConstructor<T>,
}

impl<T> Syntax<T> {
    /// Assembles the lexical rules.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::syntax::Syntax;
    ///
    /// let syntax = Syntax::new(|c: char| c.is_ascii_digit(),
    ///                          |c: char| c.is_ascii_digit() || c == '_',
    ///                          |text: &str| text.replace('_', "").parse::<i64>().ok());
    ///
    /// assert!(syntax.starts_literal('4'));
    /// assert!(!syntax.starts_literal('_'));
    /// assert_eq!(syntax.make_literal("1_000"), Some(1000));
    /// ```
    pub fn new<S, C, M>(starts_literal: S, continues_literal: C, make_literal: M) -> Self
        where S: Fn(char) -> bool + Send + Sync + 'static,
              C: Fn(char) -> bool + Send + Sync + 'static,
              M: Fn(&str) -> Option<T> + Send + Sync + 'static
    {
        Self { starts_literal:    Arc::new(starts_literal),
               continues_literal: Arc::new(continues_literal),
               make_literal:      Arc::new(make_literal), }
    }

    /// Whether `c` can begin a literal.
    #[must_use]
    pub fn starts_literal(&self, c: char) -> bool {
        (self.starts_literal)(c)
    }

    /// Whether `c` can extend a literal that has already started.
    #[must_use]
    pub fn continues_literal(&self, c: char) -> bool {
        (self.continues_literal)(c)
    }

    /// Builds a value from scanned literal text.
    #[must_use]
    pub fn make_literal(&self, text: &str) -> Option<T> {
        (self.make_literal)(text)
    }

    /// Byte length of the literal at the start of `text`, or `None` if `text`
    /// does not start a literal.
    #[must_use]
    pub fn literal_len(&self, text: &str) -> Option<usize> {
        let mut chars = text.chars();
        let first = chars.next().filter(|&c| self.starts_literal(c))?;
        let rest: usize = chars.take_while(|&c| self.continues_literal(c))
                               .map(char::len_utf8)
                               .sum();
        Some(first.len_utf8() + rest)
    }
}

impl<T> Clone for Syntax<T> {
    fn clone(&self) -> Self {
        Self { starts_literal:    Arc::clone(&self.starts_literal),
               continues_literal: Arc::clone(&self.continues_literal),
               make_literal:      Arc::clone(&self.make_literal), }
    }
}

impl<T> fmt::Debug for Syntax<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syntax").finish_non_exhaustive()
    }
}

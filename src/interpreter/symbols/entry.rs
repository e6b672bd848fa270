use std::{fmt, sync::Arc};

use crate::interpreter::evaluator::core::EvalResult;

/// A stored function or operator body.
///
/// Receives the evaluated arguments in source order. The slice length always
/// lies within the arity the entry was registered with.
pub type Callable<T> = Arc<dyn Fn(&[T]) -> EvalResult<T> + Send + Sync>;

/// Inclusive bounds on the number of arguments a callable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
    /// Fewest accepted arguments.
    pub min: usize,
    /// Most accepted arguments.
    pub max: usize,
}

impl Arity {
    /// Accepts exactly `n` arguments.
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Accepts between `min` and `max` arguments. Swapped bounds are
    /// reordered.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::symbols::Arity;
    ///
    /// let arity = Arity::range(2, 1);
    /// assert!(arity.contains(1) && arity.contains(2));
    /// assert!(!arity.contains(3));
    /// ```
    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Tests whether `n` arguments satisfy this arity.
    #[must_use]
    pub const fn contains(self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Whether a variable may be rebound after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// The value may change between evaluations, never during one.
    Free,
    /// The value is fixed at registration.
    Const,
}

/// A registered variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntry<T> {
    /// Free or constant.
    pub kind:  VarKind,
    /// Current value; the default for free variables that are not bound
    /// explicitly at evaluation time.
    pub value: T,
}

impl<T> VariableEntry<T> {
    /// A free variable with an initial value.
    #[must_use]
    pub const fn free(value: T) -> Self {
        Self { kind: VarKind::Free,
               value }
    }

    /// A constant.
    #[must_use]
    pub const fn constant(value: T) -> Self {
        Self { kind: VarKind::Const,
               value }
    }
}

/// A registered function.
///
/// Functions have no precedence: each applies to its parenthesised argument
/// list or to the single primary that follows its name.
pub struct FunctionEntry<T> {
    /// Accepted argument counts.
    pub arity:    Arity,
    /// The function body.
    pub callable: Callable<T>,
}

impl<T> FunctionEntry<T> {
    /// Wraps a function body with its arity.
    pub fn new<F>(arity: Arity, callable: F) -> Self
        where F: Fn(&[T]) -> EvalResult<T> + Send + Sync + 'static
    {
        Self { arity,
               callable: Arc::new(callable) }
    }
}

impl<T> Clone for FunctionEntry<T> {
    fn clone(&self) -> Self {
        Self { arity:    self.arity,
               callable: Arc::clone(&self.callable), }
    }
}

impl<T> fmt::Debug for FunctionEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// A registered operator.
///
/// Higher `precedence` binds tighter. Operators whose arity admits two
/// arguments may appear infix; operators whose arity admits one argument may
/// appear as a prefix.
pub struct OperatorEntry<T> {
    /// Accepted argument counts.
    pub arity:      Arity,
    /// Binding tightness.
    pub precedence: u32,
    /// The operator body.
    pub callable:   Callable<T>,
}

impl<T> OperatorEntry<T> {
    /// Wraps an operator body with its arity and precedence.
    pub fn new<F>(arity: Arity, precedence: u32, callable: F) -> Self
        where F: Fn(&[T]) -> EvalResult<T> + Send + Sync + 'static
    {
        Self { arity,
               precedence,
               callable: Arc::new(callable) }
    }

    /// Whether the operator can join two operands.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        self.arity.contains(2)
    }

    /// Whether the operator can stand in front of a single operand.
    #[must_use]
    pub const fn is_prefix(&self) -> bool {
        self.arity.contains(1)
    }
}

impl<T> Clone for OperatorEntry<T> {
    fn clone(&self) -> Self {
        Self { arity:      self.arity,
               precedence: self.precedence,
               callable:   Arc::clone(&self.callable), }
    }
}

impl<T> fmt::Debug for OperatorEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorEntry")
         .field("arity", &self.arity)
         .field("precedence", &self.precedence)
         .finish_non_exhaustive()
    }
}

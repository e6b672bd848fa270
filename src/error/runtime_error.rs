use crate::interpreter::symbols::Arity;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and rebinding.
pub enum RuntimeError {
    /// A compiled expression referenced a variable that is missing from the
    /// variable table it is evaluated against.
    UnresolvedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Tried to rebind a variable that was never registered.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Tried to rebind a constant.
    ConstantRebind {
        /// The name of the constant.
        name: String,
    },
    /// A callable received a number of arguments it cannot handle.
    ArgumentCountMismatch {
        /// The accepted argument counts.
        expected: Arity,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// A function was evaluated at one of its poles.
    Singularity {
        /// The function that hit the pole.
        function: &'static str,
    },
    /// An argument was invalid or out of range.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedVariable { name } => {
                write!(f, "Error: Variable '{name}' is not defined in this symbol table.")
            },
            Self::UnknownVariable { name } => write!(f, "Error: Unknown variable '{name}'."),
            Self::ConstantRebind { name } => {
                write!(f, "Error: Cannot rebind constant '{name}'.")
            },
            Self::ArgumentCountMismatch { expected, found } => write!(f,
                                                                      "Error: Argument count mismatch. Expected {expected}, but found {found}."),
            Self::DivisionByZero => write!(f, "Error: Division by zero."),
            Self::Singularity { function } => {
                write!(f, "Error: '{function}' is singular at this point.")
            },
            Self::InvalidArgument { details } => {
                write!(f, "Error: Invalid argument: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

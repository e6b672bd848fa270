use crate::{
    ast::{CompiledExpr, Instruction},
    error::RuntimeError,
    interpreter::{
        evaluator::bindings::Bindings,
        symbols::{SymbolStore, VarKind, VariableEntry},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions and stored callables return either a value of
/// type `T` or a `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Evaluates compiled expressions against a variable table.
///
/// The evaluator only reads the table. Its value stack is reused across
/// calls, so evaluating the same expression repeatedly does not allocate once
/// the stack has grown to the expression's depth.
///
/// Failures raised by callables are returned unchanged; deciding what to do
/// with them belongs to the caller.
pub struct Evaluator<'a, T> {
    variables: &'a SymbolStore<VariableEntry<T>>,
    stack:     Vec<T>,
}

impl<'a, T: Clone> Evaluator<'a, T> {
    /// Creates an evaluator reading from `variables`.
    #[must_use]
    pub const fn new(variables: &'a SymbolStore<VariableEntry<T>>) -> Self {
        Self { variables,
               stack: Vec::new() }
    }

    /// Evaluates an expression with the given free-variable bindings.
    ///
    /// Runs the expression's post-order program: literals push their value,
    /// variables push their current value, and calls pop their argument
    /// values and push the callable's result. The loop needs no recursion,
    /// so expression size is bounded only by memory.
    ///
    /// # Parameters
    /// - `expr`: An expression compiled against the same variable table.
    /// - `bindings`: Values for free variables for this evaluation only.
    ///
    /// # Errors
    /// - Any error returned by a callable.
    /// - `UnresolvedVariable` if the expression names a variable missing from
    ///   the table, which cannot happen for an expression compiled against
    ///   it.
    pub fn evaluate<B>(&mut self, expr: &CompiledExpr<T>, bindings: &B) -> EvalResult<T>
        where B: Bindings<T> + ?Sized
    {
        self.stack.clear();

        for instruction in expr.program() {
            let value = match instruction {
                Instruction::Literal(value) => value.clone(),
                Instruction::Variable(name) => self.resolve(name, bindings)?,
                Instruction::Call { callable, argc } => {
                    // Every argument pushed exactly one value.
                    let base = self.stack.len() - argc;
                    let result = callable(&self.stack[base..])?;
                    self.stack.truncate(base);
                    result
                },
            };
            self.stack.push(value);
        }

        let Some(value) = self.stack.pop() else {
            unreachable!("a compiled program always leaves its result on the stack")
        };
        Ok(value)
    }

    fn resolve<B>(&self, name: &str, bindings: &B) -> EvalResult<T>
        where B: Bindings<T> + ?Sized
    {
        let entry =
            self.variables
                .get(name)
                .ok_or_else(|| RuntimeError::UnresolvedVariable { name: name.to_string() })?;

        let value = match entry.kind {
            VarKind::Free => bindings.lookup(name).unwrap_or(&entry.value),
            VarKind::Const => &entry.value,
        };
        Ok(value.clone())
    }
}

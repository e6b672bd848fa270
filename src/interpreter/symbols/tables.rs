use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        symbols::{
            entry::{FunctionEntry, OperatorEntry, VarKind, VariableEntry},
            store::SymbolStore,
        },
    },
};

/// Which table a name was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A function name.
    Function,
    /// An operator name.
    Operator,
    /// A variable name.
    Variable,
}

/// The result of a longest-match lookup across all tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMatch<'t> {
    /// The matched prefix of the searched text.
    pub name: &'t str,
    /// The table the name belongs to.
    pub kind: SymbolKind,
}

/// Variables, functions and operators for one expression language.
///
/// The tables are filled once when a configuration is built. Afterwards only
/// the values of free variables may change, through [`SymbolTables::rebind`].
#[derive(Debug, Clone)]
pub struct SymbolTables<T> {
    /// Free and constant variables.
    pub variables: SymbolStore<VariableEntry<T>>,
    /// Named functions.
    pub functions: SymbolStore<FunctionEntry<T>>,
    /// Prefix and infix operators.
    pub operators: SymbolStore<OperatorEntry<T>>,
}

impl<T> Default for SymbolTables<T> {
    fn default() -> Self {
        Self { variables: SymbolStore::new(),
               functions: SymbolStore::new(),
               operators: SymbolStore::new(), }
    }
}

impl<T> SymbolTables<T> {
    /// Groups three existing stores.
    #[must_use]
    pub const fn new(variables: SymbolStore<VariableEntry<T>>,
                     functions: SymbolStore<FunctionEntry<T>>,
                     operators: SymbolStore<OperatorEntry<T>>)
                     -> Self {
        Self { variables,
               functions,
               operators }
    }

    /// Finds the longest registered name at the start of `text`.
    ///
    /// All three tables are searched. The longest match wins; on equal length
    /// functions beat operators, which beat variables.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::symbols::{SymbolKind, SymbolTables, VariableEntry};
    ///
    /// let mut tables = SymbolTables::<f64>::default();
    /// tables.variables.insert("p", VariableEntry::constant(1.0));
    /// tables.variables.insert("pi", VariableEntry::constant(std::f64::consts::PI));
    ///
    /// let found = tables.longest_symbol("pi*2").unwrap();
    /// assert_eq!(found.name, "pi");
    /// assert_eq!(found.kind, SymbolKind::Variable);
    /// ```
    #[must_use]
    pub fn longest_symbol<'t>(&self, text: &'t str) -> Option<SymbolMatch<'t>> {
        let candidates =
            [self.functions.longest_prefix(text).map(|(name, _)| (name, SymbolKind::Function)),
             self.operators.longest_prefix(text).map(|(name, _)| (name, SymbolKind::Operator)),
             self.variables.longest_prefix(text).map(|(name, _)| (name, SymbolKind::Variable))];

        let mut best: Option<SymbolMatch<'t>> = None;
        for (name, kind) in candidates.into_iter().flatten() {
            if best.is_none_or(|b| name.len() > b.name.len()) {
                best = Some(SymbolMatch { name, kind });
            }
        }
        best
    }

    /// Replaces the stored value of a free variable.
    ///
    /// The new value becomes the default for every later evaluation that does
    /// not bind the variable explicitly. Must not be called while an
    /// evaluation against these tables is in progress; the borrow checker
    /// enforces this for safe code.
    ///
    /// # Errors
    /// - `UnknownVariable` if `name` is not registered.
    /// - `ConstantRebind` if `name` is a constant.
    pub fn rebind(&mut self, name: &str, value: T) -> EvalResult<()> {
        let entry =
            self.variables
                .get_mut(name)
                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })?;

        match entry.kind {
            VarKind::Free => {
                entry.value = value;
                Ok(())
            },
            VarKind::Const => {
                debug!(name, "refused to rebind constant");
                Err(RuntimeError::ConstantRebind { name: name.to_string() })
            },
        }
    }
}

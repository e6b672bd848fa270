/// Entry types stored in the symbol tables.
///
/// Declares variable, function and operator entries together with their
/// arity bounds and the shared callable type.
pub mod entry;
/// The name-keyed store with longest-prefix lookup.
pub mod store;
/// The three symbol stores grouped together.
///
/// Classifies identifiers across all tables during tokenization and rebinds
/// free variables between evaluations.
pub mod tables;

pub use entry::{Arity, Callable, FunctionEntry, OperatorEntry, VarKind, VariableEntry};
pub use store::SymbolStore;
pub use tables::{SymbolKind, SymbolMatch, SymbolTables};

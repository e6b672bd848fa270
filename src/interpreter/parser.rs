/// The parser cursor and the compile entry point.
///
/// Holds the token arena, the read position and the nesting guard shared by
/// all parsing routines.
pub mod core;

/// Infix operator parsing.
///
/// Implements precedence climbing over the operator table: tighter operators
/// are parsed first and equal precedence groups left to right.
pub mod binary;

/// Primary and prefix parsing.
///
/// Literals, variable references, function calls, parenthesised groups and
/// prefix operators.
pub mod unary;

/// Helpers shared by the parsing routines.
pub mod utils;

use std::{fmt, mem, sync::Arc};

use crate::interpreter::symbols::Callable;

/// Which table a call node was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// A named function applied to an argument list.
    Function,
    /// A prefix or infix operator.
    Operator,
}

/// A node of a compiled expression.
///
/// Variables are held by name and resolved against the variable table at
/// evaluation time. Calls carry the callable they were resolved to, so
/// evaluation never searches the function or operator tables.
pub enum Node<T> {
    /// A constant produced by the literal constructor.
    Literal(T),
    /// Reference to a variable by name.
    Variable(String),
    /// A function or operator application.
    Call {
        /// Function or operator.
        kind:      CallKind,
        /// The registered name, kept for display and diagnostics.
        name:      String,
        /// The body resolved at compile time.
        callable:  Callable<T>,
        /// Operands in source order. The count lies within the arity of the
        /// resolved entry.
        arguments: Vec<Self>,
    },
}

impl<T> Node<T> {
    /// Creates a call node.
    pub(crate) fn call(kind: CallKind,
                       name: &str,
                       callable: &Callable<T>,
                       arguments: Vec<Self>)
                       -> Self {
        Self::Call { kind,
                     name: name.to_string(),
                     callable: Arc::clone(callable),
                     arguments }
    }

    /// Number of nodes in the subtree rooted here.
    #[must_use]
    pub fn size(&self) -> usize {
        self.post_order().count()
    }

    /// Iterates over the subtree in post-order: every node comes after all
    /// of its arguments, and arguments come left to right.
    ///
    /// The walk keeps its own stack, so arbitrarily deep trees are safe.
    ///
    /// # Example
    /// ```
    /// use zplot::{ast::Node, plane::reference};
    ///
    /// let expr = reference::engine().compile("1 + z").unwrap();
    /// let order = expr.root()
    ///                 .post_order()
    ///                 .map(|node| match node {
    ///                     Node::Literal(_) => "1".to_string(),
    ///                     Node::Variable(name) => name.clone(),
    ///                     Node::Call { name, .. } => name.clone(),
    ///                 })
    ///                 .collect::<Vec<_>>();
    /// assert_eq!(order, ["1", "z", "+"]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder { pending: vec![(self, false)] }
    }

    /// Writes the fully parenthesised form, formatting literals with `leaf`.
    fn write_tree<F>(&self, f: &mut fmt::Formatter<'_>, leaf: F) -> fmt::Result
        where F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                },
                Piece::Node(node) => node,
            };

            match node {
                Self::Literal(value) => leaf(value, f)?,
                Self::Variable(name) => f.write_str(name)?,
                Self::Call { kind,
                             name,
                             arguments,
                             .. } => match (kind, arguments.as_slice()) {
                    (CallKind::Operator, [operand]) => {
                        pending.extend([Piece::Text(")"), Piece::Node(operand), Piece::Text(name)]);
                        f.write_str("(")?;
                    },
                    (CallKind::Operator, [left, right]) => {
                        pending.extend([Piece::Text(")"),
                                        Piece::Node(right),
                                        Piece::Text(" "),
                                        Piece::Text(name),
                                        Piece::Text(" "),
                                        Piece::Node(left)]);
                        f.write_str("(")?;
                    },
                    _ => {
                        pending.push(Piece::Text(")"));
                        for (i, argument) in arguments.iter().enumerate().rev() {
                            pending.push(Piece::Node(argument));
                            if i > 0 {
                                pending.push(Piece::Text(", "));
                            }
                        }
                        write!(f, "{name}(")?;
                    },
                },
            }
        }
        Ok(())
    }
}

/// Post-order traversal of a [`Node`] tree. See [`Node::post_order`].
pub struct PostOrder<'n, T> {
    /// Nodes still to visit, flagged once their arguments have been queued.
    pending: Vec<(&'n Node<T>, bool)>,
}

impl<'n, T> Iterator for PostOrder<'n, T> {
    type Item = &'n Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.pending.pop() {
            match node {
                Node::Call { arguments, .. } if !expanded => {
                    self.pending.push((node, true));
                    self.pending
                        .extend(arguments.iter().rev().map(|argument| (argument, false)));
                },
                _ => return Some(node),
            }
        }
        None
    }
}

enum Piece<'n, T> {
    Node(&'n Node<T>),
    Text(&'n str),
}

impl<T> Drop for Node<T> {
    /// Unlinks the tree level by level so dropping a deep tree does not
    /// recurse.
    fn drop(&mut self) {
        let Self::Call { arguments, .. } = self else {
            return;
        };
        let mut pending = mem::take(arguments);
        while let Some(mut node) = pending.pop() {
            if let Self::Call { arguments, .. } = &mut node {
                pending.append(arguments);
            }
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        let mut built: Vec<Self> = Vec::new();

        for node in self.post_order() {
            let copy = match node {
                Self::Literal(value) => Self::Literal(value.clone()),
                Self::Variable(name) => Self::Variable(name.clone()),
                Self::Call { kind,
                             name,
                             callable,
                             arguments, } => {
                    let arguments = built.split_off(built.len() - arguments.len());
                    Self::Call { kind: *kind,
                                 name: name.clone(),
                                 callable: Arc::clone(callable),
                                 arguments }
                },
            };
            built.push(copy);
        }

        let Some(root) = built.pop() else {
            unreachable!("a post-order walk always ends at the root")
        };
        root
    }
}

/// Structural equality; callables are not compared.
impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Literal(a), Self::Literal(b)) if a == b => {},
                (Self::Variable(a), Self::Variable(b)) if a == b => {},
                (Self::Call { kind: ka,
                              name: na,
                              arguments: aa,
                              .. },
                 Self::Call { kind: kb,
                              name: nb,
                              arguments: ab,
                              .. }) if ka == kb && na == nb && aa.len() == ab.len() => {
                    pending.extend(aa.iter().zip(ab));
                },
                _ => return false,
            }
        }
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Node[")?;
        self.write_tree(f, |value, f| write!(f, "{value:?}"))?;
        f.write_str("]")
    }
}

/// Prints the tree fully parenthesised, e.g. `(1 + (2 * z))` or `sin(z)`.
impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, |value, f| write!(f, "{value}"))
    }
}

/// One step of a compiled expression's postfix program.
pub(crate) enum Instruction<T> {
    /// Push a constant.
    Literal(T),
    /// Push the current value of a variable.
    Variable(String),
    /// Pop `argc` values, push the callable's result.
    Call {
        callable: Callable<T>,
        argc:     usize,
    },
}

impl<T: Clone> Clone for Instruction<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Variable(name) => Self::Variable(name.clone()),
            Self::Call { callable, argc } => Self::Call { callable: Arc::clone(callable),
                                                          argc:     *argc, },
        }
    }
}

/// The immutable result of a successful compile.
///
/// A compiled expression owns its tree exclusively and can be evaluated any
/// number of times, against any bindings, from any number of threads. Next to
/// the tree it keeps the same nodes flattened in post-order, which is what
/// the evaluator runs.
#[derive(Clone)]
pub struct CompiledExpr<T> {
    root:    Node<T>,
    program: Vec<Instruction<T>>,
}

impl<T: Clone> CompiledExpr<T> {
    pub(crate) fn new(root: Node<T>) -> Self {
        let program = root.post_order()
                          .map(|node| match node {
                              Node::Literal(value) => Instruction::Literal(value.clone()),
                              Node::Variable(name) => Instruction::Variable(name.clone()),
                              Node::Call { callable,
                                           arguments,
                                           .. } => Instruction::Call { callable: Arc::clone(callable),
                                                                       argc:     arguments.len(), },
                          })
                          .collect();
        Self { root, program }
    }
}

impl<T> CompiledExpr<T> {
    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &Node<T> {
        &self.root
    }

    pub(crate) fn program(&self) -> &[Instruction<T>] {
        &self.program
    }

    /// Names of all referenced variables, in order of first appearance.
    ///
    /// # Example
    /// ```
    /// use zplot::plane::reference;
    ///
    /// let expr = reference::engine().compile("z*pi + z^2").unwrap();
    /// assert_eq!(expr.variables(), vec!["z", "pi"]);
    /// ```
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for instruction in &self.program {
            if let Instruction::Variable(name) = instruction
               && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }
}

impl<T: PartialEq> PartialEq for CompiledExpr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<T: fmt::Debug> fmt::Debug for CompiledExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledExpr").field(&self.root).finish()
    }
}

impl<T: fmt::Display> fmt::Display for CompiledExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

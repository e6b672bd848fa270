use std::{collections::HashMap, hash::BuildHasher};

/// Values for free variables, supplied per evaluation.
///
/// A binding only affects variables registered as free; constants always
/// evaluate to their registered value. Free variables without a binding fall
/// back to the value stored in the variable table.
pub trait Bindings<T> {
    /// The value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<&T>;
}

/// No bindings: every free variable keeps its stored value.
impl<T> Bindings<T> for () {
    fn lookup(&self, _name: &str) -> Option<&T> {
        None
    }
}

impl<T, S: BuildHasher> Bindings<T> for HashMap<String, T, S> {
    fn lookup(&self, name: &str) -> Option<&T> {
        self.get(name)
    }
}

impl<T> Bindings<T> for [(&str, T)] {
    fn lookup(&self, name: &str) -> Option<&T> {
        self.iter()
            .find_map(|(key, value)| (*key == name).then_some(value))
    }
}

impl<T, const N: usize> Bindings<T> for [(&str, T); N] {
    fn lookup(&self, name: &str) -> Option<&T> {
        self.as_slice().lookup(name)
    }
}

/// A single name bound to a value.
///
/// The cheapest way to drive one free variable through many evaluations, as
/// the grid sampler does.
///
/// # Example
/// ```
/// use zplot::{
///     interpreter::evaluator::bindings::Binding,
///     plane::reference,
///     ComplexNumber,
/// };
///
/// let engine = reference::engine();
/// let expr = engine.compile("z*z").unwrap();
///
/// let value = engine.evaluate(&expr, &Binding::new("z", ComplexNumber::new(0.0, 1.0)))
///                   .unwrap();
/// assert_eq!(value, ComplexNumber::new(-1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding<'n, T> {
    /// The variable name.
    pub name:  &'n str,
    /// Its value for this evaluation.
    pub value: T,
}

impl<'n, T> Binding<'n, T> {
    /// Binds `name` to `value`.
    #[must_use]
    pub const fn new(name: &'n str, value: T) -> Self {
        Self { name, value }
    }
}

impl<T> Bindings<T> for Binding<'_, T> {
    fn lookup(&self, name: &str) -> Option<&T> {
        (self.name == name).then_some(&self.value)
    }
}

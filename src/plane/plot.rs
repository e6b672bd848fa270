use tracing::warn;

use crate::{
    ast::CompiledExpr,
    error::SyntaxError,
    interpreter::{
        engine::{CompileResult, Engine},
        evaluator::{bindings::Binding, core::EvalResult},
        value::complex::ComplexNumber,
    },
    plane::{
        reference::{self, FREE_VARIABLE},
        sampler::{self, Grid, GridConfig},
    },
};

/// A user expression ready to be plotted.
///
/// If the source does not compile, the plot keeps the syntax error for
/// display and shows [`reference::DEFAULT_EXPRESSION`] instead.
#[derive(Debug, Clone)]
pub struct Plot<'e> {
    engine:     &'e Engine<ComplexNumber>,
    source:     String,
    expression: CompiledExpr<ComplexNumber>,
    error:      Option<SyntaxError>,
}

impl<'e> Plot<'e> {
    /// Compiles `source` with `engine`, falling back to the default
    /// expression on a syntax error.
    ///
    /// # Errors
    /// Only if the default expression itself does not compile with
    /// `engine`.
    pub fn new(engine: &'e Engine<ComplexNumber>, source: &str) -> CompileResult<Self> {
        let (expression, error) = match engine.compile(source) {
            Ok(expression) => (expression, None),
            Err(err) => {
                warn!(%err, fallback = reference::DEFAULT_EXPRESSION, "expression rejected");
                (reference::default_expression(engine)?, Some(err))
            },
        };
        Ok(Self { engine,
                  source: source.to_owned(),
                  expression,
                  error })
    }

    /// The source text as entered.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expression being plotted.
    #[must_use]
    pub const fn expression(&self) -> &CompiledExpr<ComplexNumber> {
        &self.expression
    }

    /// Why the source was rejected, if it was.
    #[must_use]
    pub const fn error(&self) -> Option<&SyntaxError> {
        self.error.as_ref()
    }

    /// Evaluates the expression with `z` bound to the given point.
    ///
    /// # Errors
    /// Any runtime error raised by the expression.
    pub fn evaluate(&self, z: ComplexNumber) -> EvalResult<ComplexNumber> {
        self.engine
            .evaluate(&self.expression, &Binding::new(FREE_VARIABLE, z))
    }

    /// Samples the expression over a grid.
    ///
    /// # Errors
    /// `InvalidArgument` for an unusable `config`.
    pub fn sample(&self, config: &GridConfig) -> EvalResult<Grid> {
        sampler::sample_grid(config, || self.transform())
    }

    /// Samples the expression over a grid, one line per `rayon` task.
    ///
    /// # Errors
    /// `InvalidArgument` for an unusable `config`.
    pub fn sample_parallel(&self, config: &GridConfig) -> EvalResult<Grid> {
        sampler::sample_grid_parallel(config, || self.transform())
    }

    /// The expression as a function of `z`, backed by one evaluator whose
    /// value stack is reused from call to call.
    fn transform(&self) -> impl FnMut(ComplexNumber) -> EvalResult<ComplexNumber> + '_ {
        let mut evaluator = self.engine.evaluator();
        move |z| evaluator.evaluate(&self.expression, &Binding::new(FREE_VARIABLE, z))
    }
}

impl Plot<'static> {
    /// Compiles `source` with the [shared](reference::shared) engine.
    ///
    /// # Example
    /// ```
    /// use zplot::{plane::plot::Plot, ComplexNumber};
    ///
    /// let plot = Plot::from_source("2*z").unwrap();
    /// assert!(plot.error().is_none());
    /// assert_eq!(plot.evaluate(ComplexNumber::new(1.0, 1.0)).unwrap(), ComplexNumber::new(2.0, 2.0));
    ///
    /// let broken = Plot::from_source("2*(z").unwrap();
    /// assert_eq!(broken.error().unwrap().offset, 2);
    /// assert_eq!(broken.expression().to_string(), "gamma(z)");
    /// ```
    ///
    /// # Errors
    /// See [`Plot::new`].
    pub fn from_source(source: &str) -> CompileResult<Self> {
        Self::new(reference::shared(), source)
    }
}

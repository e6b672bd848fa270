//! Sampling of a transformation over a rectangular grid of lines.
//!
//! The grid covers `[-R, R]` horizontally and `[-R/aspect, R/aspect]`
//! vertically. Every grid line is a polyline of points, each carrying its
//! position before and after the transformation so that a viewer can morph
//! between the two.

use rayon::prelude::*;
use tracing::{trace, warn};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::complex::{ComplexNumber, INVALID},
    },
    util::num::{f64_to_usize_checked, usize_to_f64_checked},
};

/// Tolerance absorbing rounding when counting steps across a span.
const STEP_EPSILON: f64 = 1e-9;

/// Extent and resolution of the sampled grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Half of the horizontal extent.
    pub half_range:  f64,
    /// Width over height of the viewed region.
    pub aspect:      f64,
    /// Distance between neighbouring grid lines.
    pub line_step:   f64,
    /// Distance between neighbouring samples along a line.
    pub sample_step: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { half_range:  4.0,
               aspect:      1920.0 / 1080.0,
               line_step:   0.25,
               sample_step: 0.05, }
    }
}

impl GridConfig {
    /// Half of the vertical extent.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.half_range / self.aspect
    }

    fn validate(&self) -> EvalResult<()> {
        let fields = [("half_range", self.half_range),
                      ("aspect", self.aspect),
                      ("line_step", self.line_step),
                      ("sample_step", self.sample_step)];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(RuntimeError::InvalidArgument { details: format!("grid {name} must be positive and finite, got {value}") });
            }
        }
        Ok(())
    }
}

/// A sample: a point of the plane and its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Position before the transformation.
    pub original:    ComplexNumber,
    /// Position after the transformation, or [`INVALID`].
    pub transformed: ComplexNumber,
}

impl Point {
    /// Position at progress `t` of the morph from `original` to
    /// `transformed`, eased with smoothstep. `t` is clamped to `[0, 1]`.
    ///
    /// # Example
    /// ```
    /// use zplot::{plane::sampler::Point, ComplexNumber};
    ///
    /// let p = Point { original:    ComplexNumber::new(0.0, 0.0),
    ///                 transformed: ComplexNumber::new(2.0, 4.0), };
    ///
    /// assert_eq!(p.at(0.5), ComplexNumber::new(1.0, 2.0));
    /// assert_eq!(p.at(7.0), p.transformed);
    /// ```
    #[must_use]
    pub fn at(&self, t: f64) -> ComplexNumber {
        let t = t.clamp(0.0, 1.0);
        let s = t * t * (3.0 - 2.0 * t);
        self.original + (self.transformed - self.original) * ComplexNumber::from(s)
    }

    /// Whether the transformation produced a value here.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.transformed.is_nan()
    }
}

/// One grid line.
pub type Line = Vec<Point>;

/// The sampled grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Lines of constant real part, left to right.
    pub vertical:   Vec<Line>,
    /// Lines of constant imaginary part, bottom to top.
    pub horizontal: Vec<Line>,
}

impl Grid {
    /// All lines, vertical first.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.vertical.iter().chain(&self.horizontal)
    }

    /// Number of samples where the transformation failed.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.lines()
            .flatten()
            .filter(|point| !point.is_valid())
            .count()
    }
}

/// Transforms one point, substituting [`INVALID`] when `transform` fails.
pub fn sample_point<F>(transform: &mut F, z: ComplexNumber) -> Point
    where F: FnMut(ComplexNumber) -> EvalResult<ComplexNumber>
{
    let transformed = transform(z).unwrap_or_else(|err| {
                                      trace!(%z, %err, "sample failed");
                                      INVALID
                                  });
    Point { original: z,
            transformed }
}

/// Evenly spaced positions from `-half` to `half` inclusive.
fn positions(half: f64, step: f64) -> EvalResult<Vec<f64>> {
    let intervals = f64_to_usize_checked((2.0 * half / step + STEP_EPSILON).floor())?;
    (0..=intervals).map(|k| Ok(-half + usize_to_f64_checked(k)? * step))
                   .collect()
}

struct Layout {
    xs:       Vec<f64>,
    ys:       Vec<f64>,
    sample_x: Vec<f64>,
    sample_y: Vec<f64>,
}

impl Layout {
    fn new(config: &GridConfig) -> EvalResult<Self> {
        config.validate()?;
        let half_height = config.half_height();
        Ok(Self { xs:       positions(config.half_range, config.line_step)?,
                  ys:       positions(half_height, config.line_step)?,
                  sample_x: positions(config.half_range, config.sample_step)?,
                  sample_y: positions(half_height, config.sample_step)?, })
    }

    fn vertical<F>(&self, mut transform: F, x: f64) -> Line
        where F: FnMut(ComplexNumber) -> EvalResult<ComplexNumber>
    {
        self.sample_y
            .iter()
            .map(|&y| sample_point(&mut transform, ComplexNumber::new(x, y)))
            .collect()
    }

    fn horizontal<F>(&self, mut transform: F, y: f64) -> Line
        where F: FnMut(ComplexNumber) -> EvalResult<ComplexNumber>
    {
        self.sample_x
            .iter()
            .map(|&x| sample_point(&mut transform, ComplexNumber::new(x, y)))
            .collect()
    }
}

fn report(grid: &Grid) {
    let invalid = grid.invalid_count();
    if invalid > 0 {
        warn!(invalid, "grid contains invalid samples");
    }
}

/// Samples a transformation over the grid described by `config`.
///
/// `line_transform` is called once per grid line and returns the
/// transformation used for every sample on that line, so per-line state such
/// as an evaluator and its value stack is reused along the line. A failing
/// sample never aborts the sweep; it is recorded as [`INVALID`].
///
/// # Errors
/// `InvalidArgument` if a field of `config` is not positive and finite.
///
/// # Example
/// ```
/// use zplot::{
///     ComplexNumber,
///     plane::sampler::{GridConfig, sample_grid},
/// };
///
/// let config = GridConfig { half_range:  1.0,
///                           aspect:      1.0,
///                           line_step:   1.0,
///                           sample_step: 0.5, };
/// let grid = sample_grid(&config, || |z: ComplexNumber| Ok(z)).unwrap();
///
/// assert_eq!(grid.vertical.len(), 3);
/// assert_eq!(grid.horizontal[0].len(), 5);
/// assert_eq!(grid.invalid_count(), 0);
/// ```
pub fn sample_grid<M, F>(config: &GridConfig, line_transform: M) -> EvalResult<Grid>
    where M: Fn() -> F,
          F: FnMut(ComplexNumber) -> EvalResult<ComplexNumber>
{
    let layout = Layout::new(config)?;
    let grid = Grid { vertical:   layout.xs.iter().map(|&x| layout.vertical(line_transform(), x)).collect(),
                      horizontal: layout.ys.iter().map(|&y| layout.horizontal(line_transform(), y)).collect(), };
    report(&grid);
    Ok(grid)
}

/// Same as [`sample_grid`], sampling each line as a separate `rayon` task.
///
/// Each task obtains its own transformation from `line_transform`.
///
/// # Errors
/// `InvalidArgument` if a field of `config` is not positive and finite.
pub fn sample_grid_parallel<M, F>(config: &GridConfig, line_transform: M) -> EvalResult<Grid>
    where M: Fn() -> F + Sync,
          F: FnMut(ComplexNumber) -> EvalResult<ComplexNumber>
{
    let layout = Layout::new(config)?;
    let grid = Grid { vertical:   layout.xs.par_iter().map(|&x| layout.vertical(line_transform(), x)).collect(),
                      horizontal: layout.ys.par_iter().map(|&y| layout.horizontal(line_transform(), y)).collect(), };
    report(&grid);
    Ok(grid)
}

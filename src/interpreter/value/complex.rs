use std::{f64::consts::PI, fmt::Display, ops};

use ordered_float::OrderedFloat;

/// `0.0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1.0` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);
/// Marker for a sample whose evaluation failed.
pub const INVALID: ComplexNumber = ComplexNumber::new(f64::NAN, f64::NAN);

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [0.999_999_999_999_809_93,
                                        676.520_368_121_885_1,
                                        -1_259.139_216_722_402_8,
                                        771.323_428_777_653_13,
                                        -176.615_029_162_140_59,
                                        12.507_343_278_686_905,
                                        -0.138_571_095_265_720_12,
                                        9.984_369_578_019_571_6e-6,
                                        1.505_632_735_149_311_6e-7];

/// Represents a complex number with real and imaginary parts.
///
/// Equality goes through [`OrderedFloat`]: NaN parts compare equal, so the
/// [`INVALID`] marker equals itself.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nan() {
            return write!(f, "NaN");
        }
        match (self.real, self.imaginary) {
            (0.0, 0.0) => write!(f, "0"),
            (real, 0.0) => write!(f, "{real}"),
            (0.0, imaginary) => write!(f, "{imaginary}i",),
            (real, imaginary) if imaginary > 0.0 => write!(f, "{real} + {imaginary}i"),
            (real, imaginary) => write!(f, "{real} - {}i", -imaginary),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Whether either part is NaN.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.real.is_nan() || self.imaginary.is_nan()
    }

    /// Whether the number is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// Returns the absolute value (magnitude) of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }
    /// Returns the argument (phase angle) in radians.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(0.0, 1.0);
    /// assert!((c.arg() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }
    /// Raises the complex number to a floating-point power.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(4.0, 0.0);
    /// let res = c.powf(0.5);
    /// assert!((res.real - 2.0).abs() < 1e-10);
    /// assert!(res.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        let r = self.abs();
        let theta = self.arg();

        let new_r = r.powf(exp);
        let new_theta = theta * exp;

        Self { real:      new_r * new_theta.cos(),
               imaginary: new_r * new_theta.sin(), }
    }
    /// Returns the principal square root of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(9.0, 0.0);
    /// let s = c.sqrt();
    /// assert!((s.real - 3.0).abs() < 1e-10);
    /// assert!(s.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = f64::midpoint(r, a).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt().copysign(b); // preserve sign of b

        Self { real, imaginary }
    }
    /// Returns the sine of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!(z.sin().real.abs() < 1e-10);
    /// assert!(z.sin().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }
    /// Returns the cosine of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!((z.cos().real - 1.0).abs() < 1e-10);
    /// assert!(z.cos().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }
    /// Returns the tangent of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!(z.tan().real.abs() < 1e-10);
    /// assert!(z.tan().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }
    /// Returns the hyperbolic sine of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!(z.sinh().real.abs() < 1e-10);
    /// assert!(z.sinh().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sinh(self) -> Self {
        Self { real:      self.real.sinh() * self.imaginary.cos(),
               imaginary: self.real.cosh() * self.imaginary.sin(), }
    }
    /// Returns the hyperbolic cosine of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!((z.cosh().real - 1.0).abs() < 1e-10);
    /// assert!(z.cosh().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn cosh(self) -> Self {
        Self { real:      self.real.cosh() * self.imaginary.cos(),
               imaginary: self.real.sinh() * self.imaginary.sin(), }
    }
    /// Returns the hyperbolic tangent of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!(z.tanh().real.abs() < 1e-10);
    /// assert!(z.tanh().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }
    /// Returns the exponential of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, 0.0);
    /// assert!((z.exp().real - 1.0).abs() < 1e-10);
    /// assert!(z.exp().imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn exp(self) -> Self {
        let exp_r = self.real.exp();
        Self { real:      exp_r * self.imaginary.cos(),
               imaginary: exp_r * self.imaginary.sin(), }
    }
    /// Returns the natural logarithm (ln) of the complex number.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(1.0, 0.0);
    /// let ln = z.ln();
    /// assert!((ln.real).abs() < 1e-10); // ln(1) == 0
    /// assert!((ln.imaginary).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }

    /// Raises the number to a complex power using the principal logarithm.
    ///
    /// `0^w` is `1` for `w = 0` and `0` when `w` has a positive real part.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::{ComplexNumber, I};
    /// let c = ComplexNumber::new(2.0, 0.0).powc(ComplexNumber::new(3.0, 0.0));
    /// assert!((c.real - 8.0).abs() < 1e-10);
    ///
    /// // i^i is real.
    /// let ii = I.powc(I);
    /// assert!((ii.real - (-std::f64::consts::FRAC_PI_2).exp()).abs() < 1e-12);
    /// assert!(ii.imaginary.abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn powc(self, exp: Self) -> Self {
        if self.is_zero() {
            if exp.is_zero() {
                return ONE;
            }
            if exp.real > 0.0 {
                return ZERO;
            }
        }
        (exp * self.ln()).exp()
    }
    /// Returns the principal inverse sine, `-i ln(iz + sqrt(1 - z^2))`.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.5, 0.0).asin();
    /// assert!((z.real - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
    /// assert!(z.imaginary.abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn asin(self) -> Self {
        -I * (I * self + (ONE - self * self).sqrt()).ln()
    }
    /// Returns the principal inverse cosine, `pi/2 - asin(z)`.
    #[must_use]
    pub fn acos(self) -> Self {
        Self::from(PI / 2.0) - self.asin()
    }
    /// Returns the principal inverse tangent,
    /// `(i/2) (ln(1 - iz) - ln(1 + iz))`.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(1.0, 0.0).atan();
    /// assert!((z.real - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn atan(self) -> Self {
        let iz = I * self;
        Self::new(0.0, 0.5) * ((ONE - iz).ln() - (ONE + iz).ln())
    }
    /// Returns the inverse hyperbolic sine, `ln(z + sqrt(z^2 + 1))`.
    #[must_use]
    pub fn asinh(self) -> Self {
        (self + (self * self + ONE).sqrt()).ln()
    }
    /// Returns the inverse hyperbolic cosine, `ln(z + sqrt(z + 1) sqrt(z - 1))`.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(1.0, 0.0).acosh();
    /// assert!(z.real.abs() < 1e-12 && z.imaginary.abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn acosh(self) -> Self {
        (self + (self + ONE).sqrt() * (self - ONE).sqrt()).ln()
    }
    /// Returns the inverse hyperbolic tangent, `(ln(1 + z) - ln(1 - z)) / 2`.
    #[must_use]
    pub fn atanh(self) -> Self {
        ((ONE + self).ln() - (ONE - self).ln()) * Self::from(0.5)
    }
    /// Returns the gamma function.
    ///
    /// Uses the Lanczos approximation (g = 7, nine coefficients) for
    /// `re(z) >= 0.5` and the reflection formula
    /// `pi / (sin(pi z) gamma(1 - z))` below that. At the poles
    /// (`0, -1, -2, ...`) the result is not finite.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::value::complex::ComplexNumber;
    /// let g = ComplexNumber::new(5.0, 0.0).gamma();
    /// assert!((g.real - 24.0).abs() < 1e-9);
    ///
    /// let half = ComplexNumber::new(0.5, 0.0).gamma();
    /// assert!((half.real - std::f64::consts::PI.sqrt()).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn gamma(self) -> Self {
        if self.real < 0.5 {
            let pi = Self::from(PI);
            return pi / ((pi * self).sin() * (ONE - self).gamma());
        }

        let z = self - ONE;
        let mut x = Self::from(LANCZOS_COEFFICIENTS[0]);
        for (k, coefficient) in (1u32..).zip(&LANCZOS_COEFFICIENTS[1..]) {
            x += Self::from(*coefficient) / (z + Self::from(k));
        }

        let t = z + Self::from(LANCZOS_G + 0.5);
        Self::from((2.0 * PI).sqrt()) * t.powc(z + Self::from(0.5)) * (-t).exp() * x
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::AddAssign for ComplexNumber {
    fn add_assign(&mut self, rhs: Self) {
        self.real += rhs.real;
        self.imaginary += rhs.imaginary;
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { real:      value.into(),
               imaginary: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}

//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! World geometry is measured in metres, screen geometry in logical pixels.
//! The only way across is a validated [`Scale`].

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    match check_positive(val) {
        Err(NumericError::Zero) => Ok(0.0),
        other => other,
    }
}

/// Length in metres (world unit)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Metres(pub f64);

impl Metres {
    pub const ZERO: Metres = Metres(0.0);

    /// Create a strictly positive length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Metres, NumericError> {
        check_positive(val).map(Metres)
    }

    /// Create a length that may be zero but not negative
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Metres, NumericError> {
        check_non_negative(val).map(Metres)
    }

    #[inline]
    pub fn min(self, other: Metres) -> Metres {
        Metres(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Metres) -> Metres {
        Metres(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Metres {
    type Output = Metres;
    fn add(self, rhs: Metres) -> Metres { Metres(self.0 + rhs.0) }
}
impl Sub for Metres {
    type Output = Metres;
    fn sub(self, rhs: Metres) -> Metres { Metres(self.0 - rhs.0) }
}
impl Mul<f64> for Metres {
    type Output = Metres;
    fn mul(self, rhs: f64) -> Metres { Metres(self.0 * rhs) }
}
impl Div<f64> for Metres {
    type Output = Metres;
    fn div(self, rhs: f64) -> Metres { Metres(self.0 / rhs) }
}
impl Neg for Metres {
    type Output = Metres;
    fn neg(self) -> Metres { Metres(-self.0) }
}

impl fmt::Display for Metres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

/// Logical pixels on the drawing canvas
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Pixels per metre. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Scale(f64);

impl Scale {
    /// Create a Scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(px_per_metre: f64) -> Result<Self, NumericError> {
        check_positive(px_per_metre).map(Scale)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Convert a world length to pixels.
    #[inline]
    pub fn len(self, m: Metres) -> Px {
        Px(m.0 * self.0)
    }

    /// Convert a world length to raw f64 pixels (convenience for scene output).
    #[inline]
    pub fn px(self, m: Metres) -> f64 {
        m.0 * self.0
    }

    /// Drawing ratio `1:N` for a given physical size of one logical pixel.
    pub fn ratio(self, mm_per_px: f64) -> f64 {
        1000.0 / (self.0 * mm_per_px)
    }
}

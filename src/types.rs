//! Strongly-typed numeric primitives for chart geometry (zero-cost newtypes).
//!
//! Angles and radii never mix: a sector is bounded by two `Angle`s and two
//! `Radius`es, and the only way from one to the other is through
//! [`polar`], which produces a cartesian point.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use glam::{DVec2, dvec2};

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

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Angle in radians, measured clockwise from 12 o'clock
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const HALF_TURN: Angle = Angle(PI);
    pub const QUARTER_TURN: Angle = Angle(PI / 2.0);
    pub const FULL_TURN: Angle = Angle(TAU);

    #[inline]
    pub const fn radians(val: f64) -> Angle {
        Angle(val)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }

    #[inline]
    pub fn abs(self) -> Angle {
        Angle(self.0.abs())
    }

    #[inline]
    pub fn max(self, other: Angle) -> Angle {
        Angle(self.0.max(other.0))
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle { Angle(self.0 + rhs.0) }
}
impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle { Angle(self.0 - rhs.0) }
}
impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle { Angle(self.0 * rhs) }
}
impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle { Angle(self.0 / rhs) }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}rad", self.0)
    }
}

/// Distance from the chart centre, in layout units
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Radius(pub f64);

impl Radius {
    pub const ZERO: Radius = Radius(0.0);

    #[inline]
    pub const fn units(val: f64) -> Radius {
        Radius(val)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Radius {
    type Output = Radius;
    fn add(self, rhs: Radius) -> Radius { Radius(self.0 + rhs.0) }
}
impl Sub for Radius {
    type Output = Radius;
    fn sub(self, rhs: Radius) -> Radius { Radius(self.0 - rhs.0) }
}
impl Mul<f64> for Radius {
    type Output = Radius;
    fn mul(self, rhs: f64) -> Radius { Radius(self.0 * rhs) }
}
impl Div<f64> for Radius {
    type Output = Radius;
    fn div(self, rhs: f64) -> Radius { Radius(self.0 / rhs) }
}

// NOTE: Radius / Radius and Angle * Radius are intentionally NOT implemented.
// Crossing between the two goes through `polar()`.

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cartesian point for an angle/radius pair (SVG y-down, origin at the chart centre).
#[inline]
pub fn polar(angle: Angle, radius: Radius) -> DVec2 {
    dvec2(radius.0 * angle.sin(), -radius.0 * angle.cos())
}

/// Width and height of the drawing area in pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Create dimensions with validation (both sides must be finite and positive)
    pub fn try_new(width: f64, height: f64) -> Result<Self, NumericError> {
        for side in [width, height] {
            let side = check_finite(side)?;
            if side == 0.0 {
                return Err(NumericError::Zero);
            }
            if side < 0.0 {
                return Err(NumericError::Negative);
            }
        }
        Ok(Dimensions { width, height })
    }

    pub fn center(&self) -> DVec2 {
        dvec2(self.width / 2.0, self.height / 2.0)
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

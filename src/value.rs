//! Numeric types and domain iteration for series sweeps.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types a series can be evaluated in, and the [`DomainSamples`] iterator
//! that discretizes a sweep domain.
//!
//! # Traits
//!
//! - [`Value`]: Extends `Float`, `Scalar`, and `ComplexField` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` for integer exponentiation and `factorial` for series terms.
//!   - `round_to` for the decimal rounding applied to sweep samples.
//!
//! # Iterators
//!
//! - [`DomainSamples`]: walks a closed interval by a fixed step, rounding each
//!   sample to a fixed number of decimals before it is used.
//!
//! # Example
//!
//! ```rust
//! use maclaurin::value::{DomainSamples, Value};
//!
//! // -1.0, -0.5, 0.0, 0.5, 1.0
//! let samples: Vec<f64> = DomainSamples::new(-1.0..=1.0, 0.5).collect();
//! assert_eq!(samples.len(), 5);
//!
//! assert_eq!(f64::factorial(5), 120.0);
//! assert_eq!(1.23456_f64.round_to(2), 1.23);
//! ```
use std::ops::{Range, RangeInclusive};

use crate::error::Error;

/// Decimal places every sweep sample is rounded to before use
pub const SAMPLE_DECIMALS: i32 = 4;

/// Numeric type for series evaluation
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `usize`
    fn as_usize(&self) -> Option<usize> {
        num_traits::cast(*self)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// The exponential function `e^self`
    #[must_use]
    fn exp(self) -> Self {
        nalgebra::ComplexField::exp(self)
    }

    /// True if the value is neither infinite nor NaN
    fn is_finite_value(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Computes the factorial of a non-negative integer `n`.
    ///
    /// `0! = 1! = 1`, and `n! = n · (n-1)!` otherwise. The product saturates to
    /// `infinity` once it leaves the range of the type (171! for `f64`).
    #[must_use]
    fn factorial(n: usize) -> Self {
        if n == 0 || n == 1 {
            Self::one()
        } else {
            let mut result = Self::one();
            for i in 2..=n {
                result *= Self::from_positive_int(i);
            }
            result
        }
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Rounds to the given number of decimal places, with halves rounded up.
    ///
    /// `floor(v · 10ⁿ + ½) / 10ⁿ`, so `-0.00005` rounds to `0` and `0.00005` to `0.0001`.
    #[must_use]
    fn round_to(self, decimals: i32) -> Self {
        let scale = Value::powi(Self::from_positive_int(10), decimals);
        let scaled = self * scale;
        if !scaled.is_finite_value() {
            // Too large to carry any decimals
            return self;
        }

        let half = Self::one() / Self::two();
        nalgebra::ComplexField::floor(scaled + half) / scale
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over the samples of a sweep domain.
///
/// Starting from `range.start`, each step:
/// - stops once the running accumulator exceeds `range.end`,
/// - rounds the accumulator to [`SAMPLE_DECIMALS`] places and yields that sample,
/// - continues from the *rounded* sample plus the raw `step`.
///
/// Rounding keeps float drift out of the samples without hiding the step itself.
/// If the samples stop increasing (a step below the rounding or float resolution),
/// iteration ends instead of repeating a sample forever.
#[derive(Debug, Clone)]
pub struct DomainSamples<T: Value> {
    accumulator: T,
    end: T,
    step: T,
    decimals: i32,
    last: Option<T>,
    done: bool,
}
impl<T: Value> DomainSamples<T> {
    /// Creates a new iterator over the samples of `range`, rounded to [`SAMPLE_DECIMALS`] places
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self::with_decimals(range, step, SAMPLE_DECIMALS)
    }

    /// Creates a new iterator over the samples of `range` with a custom rounding precision
    pub fn with_decimals(range: RangeInclusive<T>, step: T, decimals: i32) -> Self {
        let (start, end) = range.into_inner();
        Self {
            accumulator: start,
            end,
            step,
            decimals,
            last: None,
            done: false,
        }
    }

    /// Estimated number of samples remaining: `floor((end - current) / step) + 1`
    ///
    /// Float rounding at the upper bound can make the real count differ by one.
    pub fn estimated_len(&self) -> usize {
        if self.done || self.accumulator > self.end {
            return 0;
        }

        let steps = nalgebra::ComplexField::floor((self.end - self.accumulator) / self.step);
        steps.as_usize().map_or(0, |n| n.saturating_add(1))
    }
}
impl<T: Value> Iterator for DomainSamples<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        // NaN bounds fail this comparison too
        if self.done || !(self.accumulator <= self.end) {
            self.done = true;
            return None;
        }

        let sample = self.accumulator.round_to(self.decimals);
        if matches!(self.last, Some(last) if sample <= last) {
            self.done = true;
            return None;
        }

        self.last = Some(sample);
        self.accumulator = sample + self.step;
        Some(sample)
    }
}

/// Extension trait for accessing the `x` and `y` coordinates of a type.
///
/// This trait is intended for any type that conceptually represents a set of
/// 2D points, such as a curve sampled by a sweep.
///
/// # Examples
///
/// ```
/// # use maclaurin::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// assert_eq!(data.y_range(), Some(-2.0..3.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of this value.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of this value.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the y-coordinate of this value.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the range of finite y-coordinates of this value.
    fn y_range(&self) -> Option<Range<T>> {
        let y_min = self
            .y_iter()
            .filter(Value::is_finite_value)
            .fold(None, |acc: Option<(T, T)>, y| {
                Some(match acc {
                    Some((min, max)) => (
                        nalgebra::RealField::min(min, y),
                        nalgebra::RealField::max(max, y),
                    ),
                    None => (y, y),
                })
            });
        y_min.map(|(start, end)| start..end)
    }

    /// Converts the coordinates of this value to `f64`.
    ///
    /// # Errors
    /// Returns an error if any of the coordinates cannot be converted to `f64`.
    fn as_f64(&self) -> crate::error::Result<Vec<(f64, f64)>> {
        self.x_iter()
            .zip(self.y_iter())
            .map(|(x, y)| {
                let x_f64 = f64::try_cast(x)?;
                let y_f64 = f64::try_cast(y)?;
                Ok((x_f64, y_f64))
            })
            .collect()
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

/// Trait for infallible integer casting with clamping.
pub trait IntClampedCast:
    num_traits::Num + num_traits::NumCast + num_traits::Bounded + Copy + PartialOrd + Ord
{
    /// Clamps a value to the range of the target type and casts it.
    fn clamped_cast<T: num_traits::PrimInt>(self) -> T {
        //
        // Simple case: self is in range of T
        if let Some(v) = num_traits::cast(self) {
            return v;
        }

        let min = match num_traits::cast::<T, Self>(T::min_value()) {
            Some(v) => v,              // Self can go lower than T - clamp to min
            None => Self::min_value(), // Self cannot go lower than T
        };

        let max = match num_traits::cast::<T, Self>(T::max_value()) {
            Some(v) => v,              // Self can go higher than T - clamp to max
            None => Self::max_value(), // Self cannot go higher than T
        };

        let clamped = self.clamp(min, max);
        num_traits::cast(clamped).unwrap_or_else(T::max_value)
    }
}
impl<T: num_traits::PrimInt> IntClampedCast for T {}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn factorial_small_values() {
        assert_eq!(f64::factorial(0), 1.0);
        assert_eq!(f64::factorial(1), 1.0);
        assert_eq!(f64::factorial(2), 2.0);
        assert_eq!(f64::factorial(5), 120.0);
        assert_eq!(f64::factorial(10), 3_628_800.0);
    }

    #[test]
    fn factorial_overflows_to_infinity() {
        assert!(f64::factorial(170).is_finite());
        assert_eq!(f64::factorial(171), f64::INFINITY);
        assert_eq!(f32::factorial(35), f32::INFINITY);
    }

    #[test]
    fn round_to_four_places() {
        assert_eq!(1.234_56_f64.round_to(4), 1.2346);
        assert_eq!((-1.999_999_999_f64).round_to(4), -2.0);
        assert_eq!(0.000_05_f64.round_to(4), 0.0001);

        // Halves round up, not away from zero
        assert_eq!((-0.25_f64).round_to(1), -0.2);
        assert_eq!(0.25_f64.round_to(1), 0.3);
    }

    #[test]
    fn samples_include_both_bounds() {
        let samples: Vec<f64> = DomainSamples::new(-2.0..=2.0, 0.01).collect();
        assert_eq!(samples.len(), 401);
        assert_eq!(samples[0], -2.0);
        assert_eq!(samples[400], 2.0);
        assert_eq!(samples[200], 0.0);
    }

    #[test]
    fn samples_are_rounded_not_drifting() {
        let samples: Vec<f64> = DomainSamples::new(0.0..=1.0, 0.1).collect();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[3], 0.3);
        assert_eq!(samples[7], 0.7);
    }

    #[test]
    fn samples_step_past_upper_bound() {
        let samples: Vec<f64> = DomainSamples::new(-2.0..=2.0, 3.0).collect();
        assert_eq!(samples, vec![-2.0, 1.0]);
    }

    #[test]
    fn empty_when_bounds_reversed() {
        let mut samples = DomainSamples::new(2.0..=-2.0, 0.5);
        assert_eq!(samples.estimated_len(), 0);
        assert_eq!(samples.next(), None);
    }

    #[test]
    fn stalled_step_terminates() {
        // 1e-6 is below the rounding quantum; every sample would round back to 0
        let samples: Vec<f64> = DomainSamples::new(0.0..=1.0, 1e-6).collect();
        assert_eq!(samples, vec![0.0]);
    }

    #[test]
    fn nan_bounds_yield_nothing() {
        assert_eq!(DomainSamples::new(f64::NAN..=1.0, 0.1).count(), 0);
        assert_eq!(DomainSamples::new(0.0..=f64::NAN, 0.1).count(), 0);
    }

    #[test]
    fn estimated_len_matches_count() {
        let samples = DomainSamples::new(-2.0..=2.0, 0.25);
        assert_eq!(samples.estimated_len(), 17);
        assert_eq!(samples.count(), 17);
    }

    #[test]
    fn y_range_skips_non_finite() {
        let data = vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, -3.0), (3.0, f64::INFINITY)];
        assert_eq!(data.y_range(), Some(-3.0..1.0));
    }

    #[test]
    fn clamped_cast_edge_cases() {
        assert_eq!(0usize.clamped_cast::<i32>(), 0);
        assert_eq!(170usize.clamped_cast::<i32>(), 170);
        assert_eq!(usize::MAX.clamped_cast::<i32>(), i32::MAX);
        assert_eq!((-1i64).clamped_cast::<u8>(), 0);
        assert_eq!(256i64.clamped_cast::<u8>(), 255);
        assert_eq!(i64::MIN.clamped_cast::<i8>(), -128);
    }
}

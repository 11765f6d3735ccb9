//! Error metrics for comparing a series against the function it approximates
//!
//! - [`mean_absolute_error`]: Average absolute difference between true and approximate values. Lower is better.
//! - [`mean_squared_error`]: Average squared difference between true and approximate values. Lower is better.
//! - [`root_mean_squared_error`]: Square root of MSE, giving error in the same units as the values. Lower is better.
//!
//! The pointwise maximum error is tracked by the sweep itself, see [`crate::sweep::ErrorSummary`].
//!
//! All metrics divide by the number of pairs, so empty input produces `NaN`.
//!
//! # Examples
//!
//! ```rust
//! use maclaurin::statistics::{mean_absolute_error, root_mean_squared_error};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_approx = vec![1.0, 2.0, 2.0];
//!
//! assert_eq!(mean_absolute_error(y.iter().copied(), y_approx.iter().copied()), 1.0 / 3.0);
//! assert_eq!(root_mean_squared_error(y.into_iter(), y_approx.into_iter()), (1.0f64 / 3.0).sqrt());
//! ```
use crate::value::Value;

/// Computes the mean absolute error (MAE) between two sets of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MAE = (Σ |y_i - ŷ_i|) / N
/// where
///   y_i = true values, ŷ_i = approximate values,
///   N = number of pairs
/// ```
/// </div>
///
/// # Parameters
/// - `y`: Iterator over true values.
/// - `y_approx`: Iterator over approximate values.
pub fn mean_absolute_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_approx: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_approx) in y.zip(y_approx) {
        total += Value::abs(y - y_approx);
        n += T::one();
    }
    total / n
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MSE = (Σ (y_i - ŷ_i)²) / N
/// ```
/// </div>
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_approx: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_approx) in y.zip(y_approx) {
        let diff = y - y_approx;
        total += diff * diff;
        n += T::one();
    }
    total / n
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// RMSE is the square root of the mean squared error, giving the error
/// in the same units as the values. Lower values indicate a closer approximation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// RMSE = √( (Σ (y_i - ŷ_i)²) / N )
/// ```
/// </div>
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_approx: impl Iterator<Item = T>,
) -> T {
    nalgebra::ComplexField::sqrt(mean_squared_error(y, y_approx))
}

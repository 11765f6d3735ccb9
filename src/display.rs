//! Formatting of sweep results for people
//!
//! The strings produced here are a presentation contract: charts, stat cards and the
//! command line all show numbers the same way.
//!
//! - [`format_max_error`]: scientific below `1e-4`, otherwise 5 decimals.
//! - [`format_label`]: axis labels, 2 decimals.
//! - [`format_location`]: location of the maximum error, 3 decimals.
//! - [`format_step`]: the step as entered, shortest form that reads back the same.
//! - [`StatCard`]: all of the above for one sweep.
//!
//! # Example
//! ```rust
//! use maclaurin::display::{format_max_error, format_label};
//!
//! assert_eq!(format_max_error(0.000_012_34), "1.23e-5");
//! assert_eq!(format_max_error(0.5), "0.50000");
//! assert_eq!(format_label(-0.0), "0.00");
//! ```
use crate::{sweep::Sweep, value::Value};

pub mod unicode;

/// Errors below this are shown in scientific notation
pub const SCIENTIFIC_THRESHOLD: f64 = 1e-4;

/// Formats a maximum error.
///
/// Values below [`SCIENTIFIC_THRESHOLD`] use 2 fractional digits in scientific notation with a
/// signed exponent (`1.23e-5`, `0.00e+0`); everything else uses 5 fixed decimals.
pub fn format_max_error<T: Value>(error: T) -> String {
    let threshold = T::try_cast(SCIENTIFIC_THRESHOLD).unwrap_or_else(|_| T::zero());
    if error < threshold {
        unicode::float(error, None, 2)
    } else {
        to_fixed(error, 5)
    }
}

/// Formats a sample for an axis label, with 2 decimals.
///
/// Exact halves round away from zero (`0.125` is `0.13`). Negative zero is shown as `0.00`.
pub fn format_label<T: Value>(x: T) -> String {
    to_fixed(x, 2)
}

/// Formats the location of the maximum error, with 3 decimals.
///
/// Exact halves round away from zero (`0.0625` is `0.063`). Negative zero is shown as `0.000`.
pub fn format_location<T: Value>(x: T) -> String {
    to_fixed(x, 3)
}

/// Fixed-point text with `decimals` places.
///
/// `{:.N}` rounds exact halves to even; here they go to the larger magnitude instead.
fn to_fixed<T: Value>(x: T, decimals: usize) -> String {
    let x = x + T::zero();
    match exact_half(x, decimals) {
        Some(text) => text,
        None => format!("{x:.decimals$}"),
    }
}

/// If `x` lies exactly halfway between two `decimals`-place values, the one further from zero
fn exact_half<T: Value>(x: T, decimals: usize) -> Option<String> {
    let places = i32::try_from(decimals).ok()?;
    let scale = T::two() * Value::powi(T::from_positive_int(10), places);

    // A half is an odd multiple of 1 / scale; the fused residual proves the product is exact
    let doubled = x * scale;
    if !doubled.is_finite_value()
        || num_traits::float::FloatCore::fract(doubled) != T::zero()
        || nalgebra::ComplexField::mul_add(x, scale, -doubled) != T::zero()
    {
        return None;
    }

    let doubled = Value::abs(doubled).as_usize()?;
    if doubled % 2 == 0 {
        return None;
    }

    let digits = format!("{:0>width$}", doubled / 2 + 1, width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let sign = if x < T::zero() { "-" } else { "" };
    Some(if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    })
}

/// Formats a step in the shortest form that parses back to the same value.
///
/// ```
/// # use maclaurin::display::format_step;
/// assert_eq!(format_step(0.01), "0.01");
/// assert_eq!(format_step(1.0), "1");
/// ```
pub fn format_step<T: Value>(step: T) -> String {
    format!("{step}")
}

/// The summary figures shown alongside a sweep's charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    /// Truncation degree
    pub degree: usize,

    /// See [`format_max_error`]
    pub max_error: String,

    /// See [`format_location`]
    pub location: String,

    /// See [`format_step`]
    pub step: String,
}
impl StatCard {
    /// Builds the card for a sweep
    pub fn new<T: Value>(sweep: &Sweep<T>) -> Self {
        let summary = sweep.summary();
        Self {
            degree: sweep.degree(),
            max_error: format_max_error(summary.max_error),
            location: format_location(summary.location),
            step: format_step(sweep.params().step),
        }
    }
}
impl std::fmt::Display for StatCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Degree     {}", self.degree)?;
        writeln!(f, "Max error  {}", self.max_error)?;
        writeln!(f, "At x       {}", self.location)?;
        write!(f, "Step       {}", self.step)
    }
}

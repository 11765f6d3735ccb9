//! Sweep parameters, and the validate-or-default step that produces them.
//!
//! Inputs usually arrive unvalidated: typed into form fields, read from a config
//! file, or passed on the command line. Rather than rejecting bad values, the
//! sweep substitutes documented fallbacks:
//!
//! | Input  | Fallback | Used when |
//! |--------|----------|-----------|
//! | step   | `0.01`   | NaN, infinite, or `<= 0` |
//! | degree | `9`      | NaN, infinite, negative, or not a whole number |
//! | lower  | `-2`     | NaN or infinite |
//! | upper  | `2`      | NaN or infinite |
//!
//! A `lower` bound above `upper` is kept as-is and produces an empty sweep.
//!
//! # Example
//! ```rust
//! use maclaurin::inputs::{normalize_inputs, RawInputs, SweepParams};
//!
//! let raw = RawInputs { step: -1.0, degree: f64::NAN, ..RawInputs::default() };
//! assert_eq!(normalize_inputs(&raw), SweepParams::default());
//! ```
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Lower bound of the reference domain
pub const DEFAULT_LOWER: f64 = -2.0;

/// Upper bound of the reference domain
pub const DEFAULT_UPPER: f64 = 2.0;

/// Step used when the supplied step is unusable
pub const DEFAULT_STEP: f64 = 0.01;

/// Degree used when the supplied degree is unusable
pub const DEFAULT_DEGREE: usize = 9;

/// Validated parameters for a sweep.
///
/// Build these with [`normalize_inputs`] when the values come from outside, or directly
/// when they are already known to be good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParams<T: Value = f64> {
    /// First sample of the domain
    pub lower: T,

    /// Samples stop once they pass this bound
    pub upper: T,

    /// Distance between consecutive samples
    pub step: T,

    /// Truncation degree of the series
    pub degree: usize,
}
impl<T: Value> SweepParams<T> {
    /// Creates a new set of sweep parameters
    pub fn new(lower: T, upper: T, step: T, degree: usize) -> Self {
        Self {
            lower,
            upper,
            step,
            degree,
        }
    }

    /// The same parameters with a different truncation degree
    #[must_use]
    pub fn with_degree(self, degree: usize) -> Self {
        Self { degree, ..self }
    }

    /// The same parameters with a different step
    #[must_use]
    pub fn with_step(self, step: T) -> Self {
        Self { step, ..self }
    }
}
impl Default for SweepParams<f64> {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER, DEFAULT_UPPER, DEFAULT_STEP, DEFAULT_DEGREE)
    }
}

/// Unvalidated sweep inputs.
///
/// All fields are plain floats so that anything a caller can produce, including NaN,
/// reaches [`normalize_inputs`]. Missing fields in a deserialized config take the
/// reference values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    /// Lower bound of the domain
    pub lower: f64,

    /// Upper bound of the domain
    pub upper: f64,

    /// Step between samples
    pub step: f64,

    /// Truncation degree; must be a whole, non-negative number
    pub degree: f64,
}
impl Default for RawInputs {
    #[allow(clippy::cast_precision_loss)]
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            step: DEFAULT_STEP,
            degree: DEFAULT_DEGREE as f64,
        }
    }
}
impl RawInputs {
    /// Builds inputs from the text of a degree field and a step field, over the reference domain.
    ///
    /// See [`parse_degree_field`] and [`parse_step_field`] for how the text is read.
    ///
    /// # Example
    /// ```rust
    /// # use maclaurin::inputs::RawInputs;
    /// let raw = RawInputs::from_fields("12", "0.05");
    /// assert_eq!(raw.degree, 12.0);
    /// assert_eq!(raw.step, 0.05);
    /// ```
    #[must_use]
    pub fn from_fields(degree: &str, step: &str) -> Self {
        Self {
            degree: parse_degree_field(degree),
            step: parse_step_field(step),
            ..Self::default()
        }
    }

    /// Loads inputs from a JSON object; missing fields take the reference values.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid JSON object of numbers.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads inputs from a JSON config file. See [`RawInputs::from_json`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, or does not hold a valid JSON object of numbers.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Validates raw inputs, substituting fallbacks for anything unusable.
///
/// Never fails; see the [module documentation](self) for the fallback table.
#[must_use]
pub fn normalize_inputs(raw: &RawInputs) -> SweepParams<f64> {
    SweepParams {
        lower: finite_or(raw.lower, DEFAULT_LOWER),
        upper: finite_or(raw.upper, DEFAULT_UPPER),
        step: normalize_step(raw.step),
        degree: normalize_degree(raw.degree),
    }
}

/// Returns `step` if it is a positive finite number, otherwise [`DEFAULT_STEP`].
///
/// Steps finer than the sample rounding are kept. The sweep then advances one rounding
/// quantum at a time, or ends once a rounded sample stops increasing.
#[must_use]
pub fn normalize_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        DEFAULT_STEP
    }
}

/// Returns `degree` as a `usize` if it is a whole, non-negative number, otherwise [`DEFAULT_DEGREE`]
#[must_use]
pub fn normalize_degree(degree: f64) -> usize {
    if !degree.is_finite() || degree < 0.0 || degree.fract() != 0.0 {
        return DEFAULT_DEGREE;
    }

    degree.as_usize().unwrap_or(DEFAULT_DEGREE)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Reads a degree from form-field text.
///
/// Like an integer prefix parse: leading whitespace and an optional sign are accepted,
/// then digits are read up to the first non-digit. Returns NaN when no digits are found.
///
/// # Example
/// ```rust
/// # use maclaurin::inputs::parse_degree_field;
/// assert_eq!(parse_degree_field("7"), 7.0);
/// assert_eq!(parse_degree_field(" 12abc"), 12.0);
/// assert_eq!(parse_degree_field("9.8"), 9.0);
/// assert!(parse_degree_field("abc").is_nan());
/// ```
#[must_use]
pub fn parse_degree_field(text: &str) -> f64 {
    let text = text.trim_start();
    let (negative, rest) = split_sign(text);
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return f64::NAN;
    }

    let value: f64 = rest[..digits].parse().unwrap_or(f64::NAN);
    if negative {
        -value
    } else {
        value
    }
}

/// Reads a step from form-field text.
///
/// Like a float prefix parse: leading whitespace is skipped, then the longest prefix of the
/// form `[+-]digits[.digits][e[+-]digits]` is read. Returns NaN when no number is found.
///
/// # Example
/// ```rust
/// # use maclaurin::inputs::parse_step_field;
/// assert_eq!(parse_step_field("0.05"), 0.05);
/// assert_eq!(parse_step_field("1e-2"), 0.01);
/// assert_eq!(parse_step_field(".5x"), 0.5);
/// assert!(parse_step_field("").is_nan());
/// ```
#[must_use]
pub fn parse_step_field(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    //
    // Exponent only counts if it has digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

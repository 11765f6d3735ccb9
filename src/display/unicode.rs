//! Unicode formatting utilities
use std::ops::Range;

use crate::value::Value;

/// Format a floating point number as a string
///
/// # Parameters
/// - `n`: The number to format
/// - `fixed_range`: An optional range specifying the values that will not be formatted in scientific notation
/// - `precision`: The number of decimal places to include
///
/// Scientific notation always carries an explicit exponent sign, e.g. `1.23e-5` or `4.00e+2`.
///
/// # Example
/// ```
/// # use maclaurin::display::unicode::float;
/// assert_eq!(float(0.5, Some(1e-4..f64::INFINITY), 3), "0.500");
/// assert_eq!(float(1.2345e-5, Some(1e-4..f64::INFINITY), 2), "1.23e-5");
/// assert_eq!(float(0.0, None, 2), "0.00e+0");
/// ```
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => format!("{n:.precision$}"),
        _ => signed_exponent(&format!("{n:.precision$e}")),
    }
}

/// `1.00e5` -> `1.00e+5`; anything without a bare exponent is returned unchanged
fn signed_exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => s.to_string(),
    }
}

/// Convert a string into a superscript string, ignoring invalid characters
///
/// ```
/// # use maclaurin::display::unicode::superscript;
/// assert_eq!(superscript("12"), "¹²");
/// assert_eq!(superscript("-n"), "⁻ⁿ");
/// ```
pub fn superscript(s: &str) -> String {
    s.chars().filter_map(to_superscript).collect()
}

/// Convert a string into a subscript string, ignoring invalid characters
///
/// ```
/// # use maclaurin::display::unicode::subscript;
/// assert_eq!(subscript("10"), "₁₀");
/// ```
pub fn subscript(s: &str) -> String {
    s.chars().filter_map(to_subscript).collect()
}

fn to_superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '(' => '⁽',
        ')' => '⁾',
        'i' => 'ⁱ',
        'n' => 'ⁿ',
        'x' => 'ˣ',
        _ => return None,
    })
}

fn to_subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '(' => '₍',
        ')' => '₎',
        'i' => 'ᵢ',
        'n' => 'ₙ',
        'x' => 'ₓ',
        _ => return None,
    })
}

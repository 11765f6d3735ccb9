//! Truncated Maclaurin series of the exponential function.
//!
//! The Maclaurin series of `eˣ` is `Σ xⁱ / i!`. Truncating it after the term of
//! degree `n` gives the polynomial approximation `Pₙ(x)` evaluated here.
//!
//! - [`evaluate_series`] evaluates `Pₙ(x)` at a single point, recomputing every factorial.
//! - [`MaclaurinSeries`] precomputes the factorials for a degree once ([`FactorialTable`]) and
//!   then evaluates any number of points. Results are bit-identical to [`evaluate_series`].
//!
//! Neither form has an error path. At large degrees the factorials overflow to infinity, so
//! a term becomes `0` (finite numerator) or `NaN` (`∞ / ∞`). That output is reproducible and
//! is passed through unchanged.
//!
//! # Example
//! ```rust
//! use maclaurin::series::{evaluate_series, MaclaurinSeries};
//!
//! let p9 = MaclaurinSeries::<f64>::new(9);
//! assert_eq!(p9.y(0.0), 1.0);
//! assert_eq!(p9.y(1.5), evaluate_series(1.5, 9));
//! assert!((p9.y(1.0) - std::f64::consts::E).abs() < 1e-6);
//! ```
use crate::{
    display::unicode,
    value::{IntClampedCast, Value},
};

/// Evaluates the Maclaurin polynomial of `eˣ` with the given degree at `x`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Pₙ(x) = Σ_{i=0..n} xⁱ / i!
/// ```
/// Terms are summed left to right, from `i = 0`.
/// </div>
///
/// - `degree = 0` always returns exactly `1`.
/// - `x = 0` always returns exactly `1`.
///
/// Factorials are recomputed for every term. Use [`MaclaurinSeries`] to evaluate many points.
///
/// # Example
/// ```rust
/// # use maclaurin::series::evaluate_series;
/// assert_eq!(evaluate_series(2.0, 0), 1.0);
/// assert_eq!(evaluate_series(2.0, 2), 5.0); // 1 + 2 + 4/2
/// ```
pub fn evaluate_series<T: Value>(x: T, degree: usize) -> T {
    let mut result = T::zero();
    for i in 0..=degree {
        result += Value::powi(x, i.clamped_cast()) / T::factorial(i);
    }
    result
}

/// Factorials `0!` through `n!`, computed once by the recurrence `i! = i · (i-1)!`.
///
/// The same products as [`Value::factorial`], in the same order, so the values are identical.
/// Storage stops at the first factorial that overflows to infinity, since every later one
/// is infinite too.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorialTable<T: Value> {
    values: Vec<T>,
    degree: usize,
}
impl<T: Value> FactorialTable<T> {
    /// Builds the table for `0!..=degree!`
    #[must_use]
    pub fn new(degree: usize) -> Self {
        let mut values = vec![T::one()];

        let mut current = T::one();
        for i in 1..=degree {
            if i > 1 {
                current *= T::from_positive_int(i);
            }
            values.push(current);
            if !current.is_finite_value() {
                break;
            }
        }

        Self { values, degree }
    }

    /// Returns `i!`, if `i` is within the table
    #[must_use]
    pub fn get(&self, i: usize) -> Option<T> {
        if i > self.degree {
            return None;
        }
        Some(
            self.values
                .get(i)
                .copied()
                .unwrap_or_else(<T as num_traits::float::FloatCore>::infinity),
        )
    }

    /// Largest `i` with `i!` in the table
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The stored factorials, in order of increasing `i`.
    ///
    /// Ends at the first infinite factorial when the degree is large enough to overflow.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// True if factorials past the end of [`FactorialTable::as_slice`] are all infinite
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.values.len() <= self.degree
    }
}

/// The degree-`n` Maclaurin polynomial of `eˣ`, ready to be evaluated at many points.
///
/// Construct it once per sweep; the factorial table is reused for every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MaclaurinSeries<T: Value = f64> {
    factorials: FactorialTable<T>,
}
impl<T: Value> MaclaurinSeries<T> {
    /// Creates the degree-`degree` truncation of the series
    #[must_use]
    pub fn new(degree: usize) -> Self {
        Self {
            factorials: FactorialTable::new(degree),
        }
    }

    /// The truncation degree: the highest power of `x` retained
    #[must_use]
    pub fn degree(&self) -> usize {
        self.factorials.degree()
    }

    /// The factorial table used by this series
    #[must_use]
    pub fn factorials(&self) -> &FactorialTable<T> {
        &self.factorials
    }

    /// Evaluates `Pₙ(x)`.
    ///
    /// Bit-identical to [`evaluate_series`] for the same degree.
    pub fn y(&self, x: T) -> T {
        let mut y = T::zero();
        for (i, &factorial) in self.factorials.as_slice().iter().enumerate() {
            y += Value::powi(x, i.clamped_cast()) / factorial;
        }
        if let Some(tail) = self.overflowed_terms(x) {
            y += tail;
        }
        y
    }

    /// Sum of the terms whose factorial is infinite, if there are any.
    ///
    /// Each is `xⁱ / ∞`: `0` while `xⁱ` is finite, `NaN` once it is not. `|x|ⁱ` grows with
    /// `i`, so the highest power decides.
    fn overflowed_terms(&self, x: T) -> Option<T> {
        if !self.factorials.is_truncated() {
            return None;
        }

        let highest = Value::powi(x, self.degree().clamped_cast());
        Some(Value::abs(highest) / <T as num_traits::float::FloatCore>::infinity())
    }

    /// Evaluates the polynomial at multiple x-values.
    ///
    /// # Returns
    /// `(x, Pₙ(x))` pairs, in input order.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// The contribution `xⁱ / i!` of each term at `x`, lowest degree first.
    ///
    /// Summing these left to right gives [`MaclaurinSeries::y`]. Terms past the first
    /// infinite factorial are not listed, they are all `0` or `NaN`.
    pub fn terms(&self, x: T) -> Vec<T> {
        self.factorials
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &factorial)| Value::powi(x, i.clamped_cast()) / factorial)
            .collect()
    }

    /// Monomial coefficients `1 / i!`, lowest degree first.
    ///
    /// Stops at the first infinite factorial; every later coefficient is `0`.
    pub fn coefficients(&self) -> Vec<T> {
        self.factorials
            .as_slice()
            .iter()
            .map(|&factorial| T::one() / factorial)
            .collect()
    }

    /// Human-readable form of the polynomial, e.g. `P₃(x) = 1 + x + x²/2! + x³/3!`
    #[must_use]
    pub fn equation(&self) -> String {
        let degree = self.degree();
        let name = format!("P{}", unicode::subscript(&degree.to_string()));
        let stored = self.factorials.as_slice().len();
        let mut terms: Vec<String> = (0..stored).map(format_term).collect();
        if self.factorials.is_truncated() {
            terms.push("…".to_string());
            terms.push(format_term(degree));
        }
        format!("{name}(x) = {}", terms.join(" + "))
    }
}

fn format_term(i: usize) -> String {
    match i {
        0 => "1".to_string(),
        1 => "x".to_string(),
        _ => {
            let power = unicode::superscript(&i.to_string());
            format!("x{power}/{i}!")
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn degree_zero_is_one() {
        for x in [-100.0, -2.0, -0.5, 0.0, 0.5, 2.0, 100.0] {
            assert_eq!(evaluate_series(x, 0), 1.0);
            assert_eq!(MaclaurinSeries::new(0).y(x), 1.0);
        }
    }

    #[test]
    fn zero_input_is_one_for_any_degree() {
        for degree in [0, 1, 2, 9, 20, 170, 171, 300] {
            assert_eq!(evaluate_series(0.0, degree), 1.0);
            assert_eq!(MaclaurinSeries::<f64>::new(degree).y(0.0), 1.0);
        }
    }

    #[test]
    fn low_degree_values() {
        // 1 + x
        assert_eq!(evaluate_series(3.0, 1), 4.0);
        // 1 + x + x²/2
        assert_eq!(evaluate_series(2.0, 2), 5.0);
        // 1 - 1 + 1/2 - 1/6
        assert_close!(evaluate_series(-1.0, 3), 1.0 / 3.0, tol = 1e-15);
    }

    #[test]
    fn converges_towards_exp() {
        for x in [-2.0_f64, -1.0, -0.3, 0.7, 1.0, 2.0] {
            let exact = x.exp();
            let coarse = (evaluate_series(x, 0) - exact).abs();
            let fine = (evaluate_series(x, 20) - exact).abs();
            assert!(fine < coarse, "x = {x}: {fine} >= {coarse}");
            approx::assert_relative_eq!(evaluate_series(x, 20), exact, max_relative = 1e-12);
        }
    }

    #[test]
    fn memoized_matches_unmemoized() {
        for degree in [0, 1, 5, 9, 20, 60] {
            let series = MaclaurinSeries::<f64>::new(degree);
            for x in [-2.0, -1.37, -0.01, 0.0, 0.42, 1.0, 2.0] {
                assert_eq!(series.y(x).to_bits(), evaluate_series(x, degree).to_bits());
            }
        }
    }

    #[test]
    fn factorial_table_matches_factorial() {
        let table = FactorialTable::<f64>::new(175);
        assert_eq!(table.degree(), 175);
        for i in 0..=175 {
            assert_eq!(table.get(i), Some(f64::factorial(i)));
        }
        assert_eq!(table.get(176), None);
    }

    #[test]
    fn large_degree_is_reproducible() {
        // 171! overflows; with a finite numerator the extra terms are 0
        let a: f64 = evaluate_series(1.0, 200);
        let b: f64 = evaluate_series(1.0, 200);
        assert_eq!(a.to_bits(), b.to_bits());
        assert_close!(a, std::f64::consts::E, tol = 1e-14);

        // ∞ / ∞ poisons the sum
        let huge: f64 = evaluate_series(1e300, 200);
        assert!(huge.is_nan());
        assert!(MaclaurinSeries::<f64>::new(200).y(1e300).is_nan());
    }

    #[test]
    fn overflowed_factorials_are_not_stored() {
        let degree = 1_000_000_000_000;
        let series = MaclaurinSeries::<f64>::new(degree);
        assert_eq!(series.degree(), degree);
        assert_eq!(series.factorials().as_slice().len(), 172);
        assert!(series.factorials().is_truncated());
        assert_eq!(series.factorials().get(degree), Some(f64::INFINITY));
        assert_eq!(series.factorials().get(degree + 1), None);
        assert_eq!(series.terms(0.5).len(), 172);

        // |x| <= 1 keeps every power finite, anything larger eventually reaches ∞ / ∞
        assert_close!(series.y(0.5), 0.5_f64.exp(), tol = 1e-15);
        assert_close!(series.y(-1.0), (-1.0_f64).exp(), tol = 1e-15);
        assert!(series.y(1.5).is_nan());
        assert!(series.y(-2.0).is_nan());
        assert!(series.equation().ends_with(" + … + x¹⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰/1000000000000!"));
    }

    #[test]
    fn overflowed_tail_matches_unmemoized() {
        for degree in [171, 172, 200, 400] {
            let series = MaclaurinSeries::<f64>::new(degree);
            for x in [-2.0, -0.5, 0.0, 1.0, 2.0, 1e300, -1e300] {
                let memoized = series.y(x);
                let direct = evaluate_series(x, degree);
                assert!(
                    memoized.to_bits() == direct.to_bits() || (memoized.is_nan() && direct.is_nan()),
                    "degree = {degree}, x = {x}: {memoized} != {direct}"
                );
            }
        }
    }

    #[test]
    fn terms_sum_to_value() {
        let series = MaclaurinSeries::<f64>::new(6);
        let terms = series.terms(1.5);
        assert_eq!(terms.len(), 7);
        assert_eq!(terms[0], 1.0);
        assert_eq!(terms[1], 1.5);
        assert_eq!(terms[2], 1.125);
        assert_eq!(terms.iter().fold(0.0, |acc, t| acc + t), series.y(1.5));
    }

    #[test]
    fn coefficients_are_reciprocal_factorials() {
        let coefficients = MaclaurinSeries::<f64>::new(4).coefficients();
        assert_eq!(coefficients, vec![1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0]);
    }

    #[test]
    fn solve_keeps_order() {
        let series = MaclaurinSeries::<f64>::new(2);
        let solution = series.solve([0.0, 1.0, 2.0]);
        assert_eq!(solution, vec![(0.0, 1.0), (1.0, 2.5), (2.0, 5.0)]);
    }

    #[test]
    fn equation_rendering() {
        assert_eq!(MaclaurinSeries::<f64>::new(0).equation(), "P₀(x) = 1");
        assert_eq!(
            MaclaurinSeries::<f64>::new(3).equation(),
            "P₃(x) = 1 + x + x²/2! + x³/3!"
        );
        assert_eq!(
            MaclaurinSeries::<f64>::new(10).equation().split(" + ").last(),
            Some("x¹⁰/10!")
        );
    }

    #[test]
    fn works_in_f32() {
        let p = MaclaurinSeries::<f32>::new(9);
        assert_eq!(p.y(0.0), 1.0);
        assert!((p.y(1.0) - std::f32::consts::E).abs() < 1e-5);
    }
}

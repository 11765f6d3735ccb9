//! Sampling & error analysis of the series over a domain.
//!
//! A [`Sweep`] walks the domain described by [`SweepParams`], and at every sample
//! evaluates both `eˣ` and the truncated series `Pₙ(x)`. It keeps the results as
//! parallel sequences, which is the shape chart renderers consume, and reduces the
//! pointwise error into an [`ErrorSummary`].
//!
//! The sweep is a pure function of its parameters: no state survives between runs,
//! and two runs with the same parameters produce identical output.
//!
//! # Example
//! ```rust
//! use maclaurin::sweep::run_sweep;
//!
//! let sweep = run_sweep(-2.0, 2.0, 0.01, 9.0);
//! assert_eq!(sweep.len(), 401);
//! assert_eq!(sweep.labels()[400], "2.00");
//! assert_eq!(sweep.summary().location, 2.0);
//! assert!(sweep.summary().max_error < 4e-4);
//! ```
use serde::Serialize;

use crate::{
    display,
    inputs::{normalize_inputs, RawInputs, SweepParams},
    series::MaclaurinSeries,
    statistics,
    value::{DomainSamples, Value},
};

/// Upper limit on the capacity reserved up front; longer sweeps just grow
const MAX_RESERVED_SAMPLES: usize = 1 << 20;

/// The outcome of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationResult<T: Value = f64> {
    /// The (rounded) sample
    pub x: T,

    /// `eˣ`
    pub true_value: T,

    /// `Pₙ(x)`
    pub approx_value: T,

    /// Signed error, `eˣ - Pₙ(x)`
    pub error: T,
}
impl<T: Value> EvaluationResult<T> {
    /// Evaluates `series` and the exponential at `x`
    pub fn evaluate(series: &MaclaurinSeries<T>, x: T) -> Self {
        let true_value = Value::exp(x);
        let approx_value = series.y(x);
        Self {
            x,
            true_value,
            approx_value,
            error: true_value - approx_value,
        }
    }

    /// `|eˣ - Pₙ(x)|`
    pub fn abs_error(&self) -> T {
        Value::abs(self.error)
    }
}

/// The largest absolute error seen in a sweep, and where it occurred.
///
/// Starts at `(0, 0)` and only moves on a strictly larger error, so:
/// - ties keep the first (lowest-x) sample,
/// - if no sample has a positive error, `location` stays `0`,
/// - NaN errors never replace the current maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorSummary<T: Value = f64> {
    /// Maximum absolute error observed
    pub max_error: T,

    /// Sample at which `max_error` occurred
    pub location: T,
}
impl<T: Value> Default for ErrorSummary<T> {
    fn default() -> Self {
        Self {
            max_error: T::zero(),
            location: T::zero(),
        }
    }
}
impl<T: Value> ErrorSummary<T> {
    /// Folds one signed error into the summary.
    ///
    /// Returns true if it became the new maximum.
    pub fn observe(&mut self, x: T, error: T) -> bool {
        let abs_error = Value::abs(error);
        if abs_error > self.max_error {
            self.max_error = abs_error;
            self.location = x;
            true
        } else {
            false
        }
    }
}

/// One full pass of the series over a domain.
///
/// All sequences have the same length and line up index by index with [`Sweep::samples`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sweep<T: Value = f64> {
    params: SweepParams<T>,
    samples: Vec<T>,
    labels: Vec<String>,
    true_values: Vec<T>,
    approx_values: Vec<T>,
    errors: Vec<T>,
    summary: ErrorSummary<T>,
}
impl<T: Value> Sweep<T> {
    /// Runs a sweep with already-validated parameters.
    ///
    /// Never fails. Unusable parameters just produce odd output: reversed bounds give an
    /// empty sweep, and a step too small to advance the rounded samples ends the sweep early.
    /// Use [`run_sweep`] or [`crate::inputs::normalize_inputs`] for unvalidated input.
    pub fn run(params: &SweepParams<T>) -> Self {
        let series = MaclaurinSeries::<T>::new(params.degree);
        let samples = DomainSamples::new(params.lower..=params.upper, params.step);

        let capacity = samples.estimated_len().min(MAX_RESERVED_SAMPLES);
        let mut sweep = Self {
            params: *params,
            samples: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
            true_values: Vec::with_capacity(capacity),
            approx_values: Vec::with_capacity(capacity),
            errors: Vec::with_capacity(capacity),
            summary: ErrorSummary::default(),
        };

        for x in samples {
            let result = EvaluationResult::evaluate(&series, x);
            sweep.push(&result);
        }

        sweep
    }

    fn push(&mut self, result: &EvaluationResult<T>) {
        self.samples.push(result.x);
        self.labels.push(display::format_label(result.x));
        self.true_values.push(result.true_value);
        self.approx_values.push(result.approx_value);
        self.errors.push(result.error);
        self.summary.observe(result.x, result.error);
    }

    /// The parameters this sweep was run with
    pub fn params(&self) -> &SweepParams<T> {
        &self.params
    }

    /// Truncation degree of the series
    pub fn degree(&self) -> usize {
        self.params.degree
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the domain produced no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The rounded samples, in increasing order
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// The samples formatted with two decimals, for axis labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `eˣ` at each sample
    pub fn true_values(&self) -> &[T] {
        &self.true_values
    }

    /// `Pₙ(x)` at each sample
    pub fn approx_values(&self) -> &[T] {
        &self.approx_values
    }

    /// Signed error `eˣ - Pₙ(x)` at each sample
    pub fn errors(&self) -> &[T] {
        &self.errors
    }

    /// Maximum absolute error and its location
    pub fn summary(&self) -> &ErrorSummary<T> {
        &self.summary
    }

    /// Iterates the per-sample results
    pub fn results(&self) -> impl Iterator<Item = EvaluationResult<T>> + '_ {
        self.samples
            .iter()
            .zip(&self.true_values)
            .zip(&self.approx_values)
            .zip(&self.errors)
            .map(|(((&x, &true_value), &approx_value), &error)| EvaluationResult {
                x,
                true_value,
                approx_value,
                error,
            })
    }

    /// `(x, eˣ)` points
    pub fn true_curve(&self) -> Vec<(T, T)> {
        pairs(&self.samples, &self.true_values)
    }

    /// `(x, Pₙ(x))` points
    pub fn approx_curve(&self) -> Vec<(T, T)> {
        pairs(&self.samples, &self.approx_values)
    }

    /// `(x, eˣ - Pₙ(x))` points
    pub fn error_curve(&self) -> Vec<(T, T)> {
        pairs(&self.samples, &self.errors)
    }

    /// Mean absolute error over the sweep. See [`statistics::mean_absolute_error`].
    pub fn mean_absolute_error(&self) -> T {
        statistics::mean_absolute_error(
            self.true_values.iter().copied(),
            self.approx_values.iter().copied(),
        )
    }

    /// Root mean squared error over the sweep. See [`statistics::root_mean_squared_error`].
    pub fn root_mean_squared_error(&self) -> T {
        statistics::root_mean_squared_error(
            self.true_values.iter().copied(),
            self.approx_values.iter().copied(),
        )
    }
}

fn pairs<T: Value>(x: &[T], y: &[T]) -> Vec<(T, T)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

/// Validates the inputs, then sweeps the series over `lower..=upper`.
///
/// Unusable `step` or `degree` values are replaced with `0.01` and `9`, see
/// [`crate::inputs::normalize_inputs`]. `degree` is taken as a float so that NaN and
/// fractional values reach that fallback instead of being truncated by the caller.
///
/// # Example
/// ```rust
/// # use maclaurin::sweep::run_sweep;
/// let fallback = run_sweep(-2.0, 2.0, -1.0, f64::NAN);
/// assert_eq!(fallback, run_sweep(-2.0, 2.0, 0.01, 9.0));
/// ```
#[must_use]
pub fn run_sweep(lower: f64, upper: f64, step: f64, degree: f64) -> Sweep<f64> {
    let params = normalize_inputs(&RawInputs {
        lower,
        upper,
        step,
        degree,
    });
    Sweep::run(&params)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_close, series::evaluate_series};

    #[test]
    fn reference_sweep_at_upper_bound() {
        let sweep = run_sweep(-2.0, 2.0, 0.01, 9.0);
        assert_eq!(sweep.len(), 401);
        assert_eq!(sweep.samples()[0], -2.0);
        assert_eq!(sweep.labels()[0], "-2.00");

        let last = sweep.results().last().unwrap();
        assert_eq!(last.x, 2.0);
        assert_close!(last.approx_value, 7.3887, tol = 1e-4);
        assert_close!(last.true_value, 7.3891, tol = 1e-4);
        assert!(last.error > 3.0e-4 && last.error < 4.0e-4, "{}", last.error);

        // Error grows with |x|, and is larger on the positive side
        assert_eq!(sweep.summary().location, 2.0);
        assert_eq!(sweep.summary().max_error, last.abs_error());
    }

    #[test]
    fn degree_zero_is_constant() {
        let sweep = run_sweep(-2.0, 2.0, 1.0, 0.0);
        assert_eq!(sweep.samples(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert!(sweep.approx_values().iter().all(|&y| y == 1.0));

        let e2 = 2.0f64.exp();
        assert_eq!(sweep.errors()[4], e2 - 1.0);
        assert_close!(sweep.errors()[4], 6.389, tol = 1e-3);
        assert_eq!(sweep.summary().max_error, e2 - 1.0);
        assert_eq!(sweep.summary().location, 2.0);
    }

    #[test]
    fn invalid_inputs_match_reference() {
        let fallback = run_sweep(-2.0, 2.0, -1.0, f64::NAN);
        let reference = run_sweep(-2.0, 2.0, 0.01, 9.0);
        assert_eq!(fallback, reference);
        assert_eq!(fallback.degree(), 9);
        assert_eq!(fallback.params().step, 0.01);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let params = SweepParams::new(-1.5, 3.0, 0.07, 5);
        let a = Sweep::run(&params);
        let b = Sweep::run(&params);
        assert_eq!(a, b);
        assert_eq!(a.summary(), b.summary());
    }

    #[test]
    fn sequence_lengths_agree() {
        for (lower, upper, step) in [
            (-2.0_f64, 2.0, 0.01),
            (-2.0, 2.0, 0.3),
            (0.0, 1.0, 0.1),
            (-5.0, 5.0, 0.0137),
            (1.0, 1.0, 0.5),
        ] {
            let sweep = Sweep::run(&SweepParams::new(lower, upper, step, 4));
            let expected = ((upper - lower) / step).floor() + 1.0;
            let actual = sweep.len() as f64;
            assert!((actual - expected).abs() <= 1.0, "{lower}..={upper} by {step}: {actual} vs {expected}");

            assert_eq!(sweep.labels().len(), sweep.len());
            assert_eq!(sweep.true_values().len(), sweep.len());
            assert_eq!(sweep.approx_values().len(), sweep.len());
            assert_eq!(sweep.errors().len(), sweep.len());
        }
    }

    #[test]
    fn values_match_direct_evaluation() {
        let sweep = run_sweep(-1.0, 1.0, 0.25, 6.0);
        for result in sweep.results() {
            assert_eq!(result.true_value, result.x.exp());
            assert_eq!(result.approx_value, evaluate_series(result.x, 6));
            assert_eq!(result.error, result.true_value - result.approx_value);
        }
    }

    #[test]
    fn reversed_bounds_are_empty() {
        let sweep = run_sweep(2.0, -2.0, 0.01, 9.0);
        assert!(sweep.is_empty());
        assert_eq!(sweep.summary(), &ErrorSummary::default());
        assert!(sweep.mean_absolute_error().is_nan());
    }

    #[test]
    fn fine_steps_are_kept() {
        // Finer than the 4-place rounding, so samples land one quantum apart
        let sweep = run_sweep(-2.0, 2.0, 7e-5, 9.0);
        assert_eq!(sweep.params().step, 7e-5);
        assert_eq!(sweep.len(), 40_001);
        assert_eq!(sweep.samples()[1], -1.9999);
        assert_eq!(sweep.samples().last(), Some(&2.0));

        // Too fine to move a rounded sample at all
        let stalled = run_sweep(-2.0, 2.0, 1e-6, 9.0);
        assert_eq!(stalled.params().step, 1e-6);
        assert_eq!(stalled.samples(), &[-2.0]);
    }

    #[test]
    fn tie_labels_round_away_from_zero() {
        let sweep = run_sweep(-0.5, 0.75, 0.125, 2.0);
        assert_eq!(
            sweep.labels(),
            &[
                "-0.50", "-0.38", "-0.25", "-0.13", "0.00", "0.13", "0.25", "0.38", "0.50", "0.63",
                "0.75"
            ]
        );
    }

    #[test]
    fn summary_keeps_first_of_ties() {
        let mut summary = ErrorSummary::default();
        assert!(summary.observe(-1.0, 0.5));
        assert!(!summary.observe(1.0, -0.5));
        assert_eq!(summary.location, -1.0);
        assert_eq!(summary.max_error, 0.5);
    }

    #[test]
    fn summary_ignores_zero_and_nan() {
        let mut summary = ErrorSummary::default();
        assert!(!summary.observe(5.0, 0.0));
        assert!(!summary.observe(6.0, f64::NAN));
        assert_eq!(summary, ErrorSummary::default());
    }

    #[test]
    fn exact_sweep_keeps_default_location() {
        // Only x = 0 is sampled, where every degree is exact
        let sweep = run_sweep(0.0, 0.0, 0.5, 3.0);
        assert_eq!(sweep.len(), 1);
        assert_eq!(sweep.errors()[0], 0.0);
        assert_eq!(sweep.summary(), &ErrorSummary::default());
    }

    #[test]
    fn labels_have_two_decimals() {
        let sweep = run_sweep(-0.5, 0.5, 0.25, 2.0);
        assert_eq!(sweep.labels(), &["-0.50", "-0.25", "0.00", "0.25", "0.50"]);
    }

    #[test]
    fn curves_pair_samples() {
        let sweep = run_sweep(0.0, 1.0, 0.5, 1.0);
        assert_eq!(sweep.approx_curve(), vec![(0.0, 1.0), (0.5, 1.5), (1.0, 2.0)]);
        assert_eq!(sweep.true_curve()[2], (1.0, 1.0f64.exp()));
        assert_eq!(sweep.error_curve()[0], (0.0, 0.0));
    }

    #[test]
    fn higher_degree_lowers_error_metrics() {
        let params = SweepParams::default();
        let coarse = Sweep::run(&params.with_degree(2));
        let fine = Sweep::run(&params.with_degree(12));
        assert!(fine.summary().max_error < coarse.summary().max_error);
        assert!(fine.mean_absolute_error() < coarse.mean_absolute_error());
        assert!(fine.root_mean_squared_error() < coarse.root_mean_squared_error());
        assert!(coarse.mean_absolute_error() <= coarse.summary().max_error);
    }

    #[test]
    fn serializes_to_json() {
        let sweep = run_sweep(0.0, 1.0, 1.0, 1.0);
        let json = serde_json::to_value(&sweep).unwrap();
        assert_eq!(json["params"]["degree"], 1);
        assert_eq!(json["labels"][1], "1.00");
        assert_eq!(json["approx_values"][1], 2.0);
        assert_eq!(json["summary"]["location"], 1.0);
    }
}

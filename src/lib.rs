//! # Maclaurin
//! ## How good is a truncated series, really?
//!
//! The Maclaurin series of `eˣ` is `1 + x + x²/2! + x³/3! + …`. Cut it off after the term of
//! degree `n` and you get a polynomial, `Pₙ(x)`, that is exact at 0 and drifts away from `eˣ`
//! the further out you go.
//!
//! This crate measures that drift:
//! - Evaluate `Pₙ(x)` at a point, or build it once and evaluate it everywhere
//! - Sweep it over a domain next to `eˣ`, and get the error at every sample
//! - Find the worst error and where it happens
//! - Turn the results into labels, stat cards, and charts (`plotting` feature)
//!
//! ```rust
//! use maclaurin::run_sweep;
//!
//! let sweep = run_sweep(-2.0, 2.0, 0.01, 9.0);
//! println!("{}", maclaurin::display::StatCard::new(&sweep));
//!
//! // The error grows with |x|, so the worst sample is at the upper bound
//! assert_eq!(sweep.summary().location, 2.0);
//! maclaurin::assert_max_error!(sweep, 4e-4);
//! ```
//!
//! # Core Concepts
//! - The **degree** of the series is the highest power of `x` kept.
//!     - Degree 0 is the constant `1`; each extra degree adds one term.
//! - A [`MaclaurinSeries`] is the truncated polynomial for one degree.
//!     - Its factorials are computed once, so evaluating many points is cheap.
//!     - [`evaluate_series`] does the same for a single point, and agrees bit-for-bit.
//! - A [`Sweep`] evaluates the series and `eˣ` across `[lower, upper]` at a fixed step.
//!     - Samples are rounded to 4 decimals before use, so they don't accumulate float drift.
//!     - The maximum absolute error and its location are tracked in a [`sweep::ErrorSummary`].
//! - Inputs from the outside world are never rejected. [`normalize_inputs`] swaps anything unusable
//!   for a documented fallback, and the sweep itself cannot fail.
//!
//! # Implementation Details
//!
//! Evaluation is generic over the float type through [`value::Value`], built on `nalgebra` and
//! `num-traits`; `f64` is the default everywhere.
//!
//! # Testing utilities
//!
//! See [`test`] for the assertion macros; [`assert_max_error!`] plots the sweep on failure
//! when the `plotting` feature is on.
//!
//! # Features
//! - `plotting`: two-panel sweep charts as SVG or PNG, see [`plotting`] (feature-gated).
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]


#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plotting;

pub mod display;
pub mod error;
pub mod inputs;
pub mod series;
pub mod statistics;
pub mod sweep;
pub mod value;

pub use inputs::{normalize_inputs, RawInputs, SweepParams};
pub use series::{evaluate_series, MaclaurinSeries};
pub use sweep::{run_sweep, Sweep};

pub use nalgebra;

//! Core traits and helpers shared by all indicators.

use refindex_core::{Candle, Sample};
use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while configuring indicators.
///
/// Computation itself never fails: insufficient history and numeric hazards
/// resolve to documented fallback values instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// A period or window of zero was supplied.
    #[error("{indicator} period must be greater than zero (got {period})")]
    InvalidPeriod {
        /// Indicator that rejected the value.
        indicator: &'static str,
        /// The rejected period.
        period: usize,
    },
    /// Any other parameter outside its accepted domain.
    #[error("{indicator} parameter `{parameter}` is invalid: {value}")]
    InvalidParameter {
        /// Indicator that rejected the value.
        indicator: &'static str,
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Rendered value of the parameter.
        value: String,
    },
}

impl IndicatorError {
    /// Convenience constructor for invalid period errors.
    pub fn invalid_period(indicator: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { indicator, period }
    }

    /// Convenience constructor for invalid parameter errors.
    pub fn invalid_parameter(
        indicator: &'static str,
        parameter: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            indicator,
            parameter,
            value: value.to_string(),
        }
    }
}

/// Values that can be fed into single-series indicators.
pub trait Input {
    /// Returns the scalar the indicator operates on (the close for bars).
    fn value(&self) -> f64;
}

impl Input for f64 {
    fn value(&self) -> f64 {
        *self
    }
}

impl Input for Sample {
    fn value(&self) -> f64 {
        self.close
    }
}

impl Input for Candle {
    fn value(&self) -> f64 {
        self.close
    }
}

/// Inputs that also carry traded volume.
pub trait VolumeInput: Input {
    /// Volume traded during the observation.
    fn volume(&self) -> f64;
}

impl VolumeInput for Sample {
    fn volume(&self) -> f64 {
        self.volume
    }
}

impl Input for (f64, f64) {
    fn value(&self) -> f64 {
        self.0
    }
}

impl VolumeInput for (f64, f64) {
    fn volume(&self) -> f64 {
        self.1
    }
}

/// A pure batch transform over a chronologically ordered series.
///
/// Implementations only hold their parameters; `compute` depends on nothing
/// but its argument, so the same instance may be shared across series.
pub trait Indicator {
    /// Element type of the input series.
    type Input;
    /// Result of a full pass over the input.
    type Output;

    /// Runs the indicator over the full series.
    fn compute(&self, inputs: &[Self::Input]) -> Self::Output;
}

/// Round half-to-even on the exact binary value of `value`.
///
/// Non-finite values are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

/// Lossless-enough conversion of a period into a float divisor.
pub(crate) fn float_from_usize(value: usize) -> f64 {
    value as f64
}

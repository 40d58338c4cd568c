//! Exponential Moving Average (EMA).

use std::marker::PhantomData;

use crate::core::{float_from_usize, Indicator, IndicatorError, Input};

/// Exponentially-weighted moving average with `k = 2 / (period + 1)`.
///
/// The recursion is seeded with the first raw input (`ema[0] = x[0]`) rather
/// than a simple average of the first window, so early values lean towards
/// the first observation.
#[derive(Debug, Clone)]
pub struct Ema<I = f64> {
    period: usize,
    alpha: f64,
    retain: f64,
    marker: PhantomData<I>,
}

impl<I> Ema<I>
where
    I: Input,
{
    /// Creates a new EMA with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("EMA", period));
        }

        let alpha = 2.0 / float_from_usize(period + 1);

        Ok(Self {
            period,
            alpha,
            retain: 1.0 - alpha,
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Advances the recursion by one observation.
    pub fn step(&self, previous: f64, value: f64) -> f64 {
        value * self.alpha + previous * self.retain
    }
}

impl<I> Indicator for Ema<I>
where
    I: Input,
{
    type Input = I;
    type Output = Vec<f64>;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let mut output = Vec::with_capacity(inputs.len());
        let mut values = inputs.iter().map(Input::value);
        let Some(seed) = values.next() else {
            return output;
        };
        output.push(seed);
        let mut current = seed;
        for value in values {
            current = self.step(current, value);
            output.push(current);
        }
        output
    }
}

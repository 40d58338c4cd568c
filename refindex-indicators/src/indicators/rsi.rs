//! Relative Strength Index (RSI).

use std::marker::PhantomData;

use crate::core::{float_from_usize, round_dp, Indicator, IndicatorError, Input};

/// Placeholder emitted while the averages are warming up. It is not a real
/// RSI reading and callers should treat it as indeterminate.
pub const NEUTRAL_RSI: f64 = 50.0;
/// Value reported when the average loss is zero.
pub const MAX_RSI: f64 = 100.0;

const RSI_DECIMALS: u32 = 2;

/// Computes Wilder's RSI oscillator scaled between 0 and 100.
///
/// The output has one value per input. The first `period + 1` entries are
/// [`NEUTRAL_RSI`]; the seed averages (simple means of the first `period`
/// gains and losses) are never emitted directly, the first real value already
/// includes one smoothing step.
#[derive(Debug, Clone)]
pub struct Rsi<I = f64> {
    period: usize,
    divisor: f64,
    decay: f64,
    marker: PhantomData<I>,
}

impl<I> Rsi<I>
where
    I: Input,
{
    /// Creates a new RSI with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("RSI", period));
        }

        Ok(Self {
            period,
            divisor: float_from_usize(period),
            decay: float_from_usize(period - 1),
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            MAX_RSI
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        }
    }
}

impl<I> Indicator for Rsi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Vec<f64>;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let len = inputs.len();
        if len <= self.period {
            return vec![NEUTRAL_RSI; len];
        }

        let deltas: Vec<f64> = inputs
            .windows(2)
            .map(|pair| pair[1].value() - pair[0].value())
            .collect();
        let gains: Vec<f64> = deltas.iter().map(|delta| delta.max(0.0)).collect();
        let losses: Vec<f64> = deltas.iter().map(|delta| delta.min(0.0).abs()).collect();

        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / self.divisor;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / self.divisor;

        let mut output = vec![NEUTRAL_RSI; self.period + 1];
        output.reserve(len - output.len());
        for (gain, loss) in gains[self.period..].iter().zip(&losses[self.period..]) {
            avg_gain = (avg_gain * self.decay + gain) / self.divisor;
            avg_loss = (avg_loss * self.decay + loss) / self.divisor;
            output.push(round_dp(Self::compute_rsi(avg_gain, avg_loss), RSI_DECIMALS));
        }
        output
    }
}

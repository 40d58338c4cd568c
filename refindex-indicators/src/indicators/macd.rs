//! Moving Average Convergence Divergence indicator implementation.

use std::marker::PhantomData;

use crate::core::{round_dp, Indicator, IndicatorError, Input};
use crate::indicators::ema::Ema;

const MACD_DECIMALS: u32 = 4;

/// MACD output series (line, signal line, and histogram), all the length of
/// the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MacdSeries {
    /// MACD line (fast EMA minus slow EMA).
    pub macd: Vec<f64>,
    /// Signal line (EMA of the MACD line).
    pub signal: Vec<f64>,
    /// Distance between the MACD and signal lines.
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Number of points in each of the three series.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Moving Average Convergence Divergence indicator.
///
/// Every EMA involved is seeded with its first input, see [`Ema`].
#[derive(Debug, Clone)]
pub struct Macd<I = f64> {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    marker: PhantomData<I>,
}

impl<I> Macd<I>
where
    I: Input,
{
    /// Create a MACD indicator with custom fast/slow/signal periods.
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, IndicatorError> {
        if fast_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", fast_period));
        }
        if slow_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", slow_period));
        }
        if signal_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", signal_period));
        }
        if fast_period >= slow_period {
            return Err(IndicatorError::invalid_parameter(
                "MACD",
                "fast_period",
                format!("{fast_period} must be shorter than slow period {slow_period}"),
            ));
        }
        Ok(Self {
            fast: Ema::new(fast_period)?,
            slow: Ema::new(slow_period)?,
            signal: Ema::new(signal_period)?,
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for Macd<I>
where
    I: Input,
{
    type Input = I;
    type Output = MacdSeries;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let closes: Vec<f64> = inputs.iter().map(Input::value).collect();
        let fast = self.fast.compute(&closes);
        let slow = self.slow.compute(&closes);

        let macd: Vec<f64> = fast
            .iter()
            .zip(&slow)
            .map(|(fast, slow)| round_dp(fast - slow, MACD_DECIMALS))
            .collect();
        // The signal runs on the rounded MACD line; the histogram uses the
        // unrounded signal and is rounded afterwards.
        let raw_signal = self.signal.compute(&macd);
        let histogram = macd
            .iter()
            .zip(&raw_signal)
            .map(|(line, signal)| round_dp(line - signal, MACD_DECIMALS))
            .collect();
        let signal = raw_signal
            .into_iter()
            .map(|value| round_dp(value, MACD_DECIMALS))
            .collect();

        MacdSeries {
            macd,
            signal,
            histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_series_match_input_length() {
        let macd = Macd::<f64>::new(12, 26, 9).unwrap();
        let closes: Vec<f64> = (1..=50).map(f64::from).collect();
        let series = macd.compute(&closes);
        assert_eq!(series.len(), 50);
        assert_eq!(series.signal.len(), 50);
        assert_eq!(series.histogram.len(), 50);
    }

    #[test]
    fn starts_flat_and_turns_positive_in_uptrend() {
        let macd = Macd::<f64>::new(3, 6, 3).unwrap();
        let closes: Vec<f64> = (1..=16).map(f64::from).collect();
        let series = macd.compute(&closes);
        assert_eq!(series.macd[0], 0.0);
        assert_eq!(series.signal[0], 0.0);
        assert_eq!(series.histogram[0], 0.0);
        assert!(series.macd[1..].iter().all(|value| *value > 0.0));
    }

    #[test]
    fn hand_computed_values() {
        // fast alpha = 0.5, slow alpha = 0.25, signal alpha = 0.5
        let macd = Macd::<f64>::new(3, 7, 3).unwrap();
        let series = macd.compute(&[10.0, 12.0, 11.0]);
        // fast: 10, 11, 11 ; slow: 10, 10.5, 10.625
        assert_eq!(series.macd, vec![0.0, 0.5, 0.375]);
        // signal: 0, 0.25, 0.3125
        assert_eq!(series.signal, vec![0.0, 0.25, 0.3125]);
        assert_eq!(series.histogram, vec![0.0, 0.25, 0.0625]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let macd = Macd::<f64>::new(12, 26, 9).unwrap();
        assert!(macd.compute(&[]).is_empty());
    }

    #[test]
    fn rejects_inverted_periods() {
        assert!(matches!(
            Macd::<f64>::new(26, 12, 9),
            Err(IndicatorError::InvalidParameter { .. })
        ));
        assert!(Macd::<f64>::new(12, 26, 0).is_err());
    }
}

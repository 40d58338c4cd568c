//! Realized volatility from log returns, annualized over calendar days.

use std::marker::PhantomData;

use crate::core::{round_dp, Indicator, IndicatorError, Input};
use crate::stats::{std_dev, Variance};

/// Days per year used for annualization (calendar days, not trading days).
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;
/// Scale applied to express volatility in percent.
pub const PERCENT: f64 = 100.0;
/// Fewest returns a window needs before a volatility is reported.
pub const MIN_RETURNS: usize = 2;

const VOLATILITY_DECIMALS: u32 = 2;

/// Annualized rolling standard deviation of daily log returns, in percent.
///
/// Windows expand from the first return until `window` returns are available
/// and trail afterwards. Windows with fewer than [`MIN_RETURNS`] returns
/// report zero.
#[derive(Debug, Clone)]
pub struct AnnualizedVolatility<I = f64> {
    window: usize,
    annualization: f64,
    marker: PhantomData<I>,
}

impl<I> AnnualizedVolatility<I>
where
    I: Input,
{
    /// Creates a new volatility indicator over `window` returns.
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        if window == 0 {
            return Err(IndicatorError::invalid_period("AnnualizedVolatility", window));
        }
        Ok(Self {
            window,
            annualization: CALENDAR_DAYS_PER_YEAR.sqrt(),
            marker: PhantomData,
        })
    }

    /// `ln(p_i / p_{i-1})` with a leading zero; non-positive prices count as
    /// a zero return.
    pub fn log_returns(inputs: &[I]) -> Vec<f64> {
        let mut returns = Vec::with_capacity(inputs.len());
        if inputs.is_empty() {
            return returns;
        }
        returns.push(0.0);
        returns.extend(inputs.windows(2).map(|pair| {
            let (prev, current) = (pair[0].value(), pair[1].value());
            if prev > 0.0 && current > 0.0 {
                (current / prev).ln()
            } else {
                0.0
            }
        }));
        returns
    }
}

impl<I> Indicator for AnnualizedVolatility<I>
where
    I: Input,
{
    type Input = I;
    type Output = Vec<f64>;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let returns = Self::log_returns(inputs);
        (0..returns.len())
            .map(|idx| {
                // The leading placeholder return never enters a window.
                let start = (idx + 1).saturating_sub(self.window).max(1);
                let window = returns.get(start..=idx).unwrap_or_default();
                if window.len() < MIN_RETURNS {
                    return 0.0;
                }
                let std = std_dev(window, Variance::Sample).unwrap_or_default();
                let vol = std * self.annualization * PERCENT;
                round_dp(vol, VOLATILITY_DECIMALS)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_returns_guard_non_positive_prices() {
        let returns = AnnualizedVolatility::<f64>::log_returns(&[100.0, 0.0, 50.0, 100.0]);
        assert_eq!(returns.len(), 4);
        assert_eq!(returns[..3], [0.0, 0.0, 0.0]);
        assert!((returns[3] - 2.0_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn first_two_values_are_zero() {
        let vol = AnnualizedVolatility::<f64>::new(30).unwrap();
        let output = vol.compute(&[100.0, 110.0, 99.0]);
        assert_eq!(output[0], 0.0);
        assert_eq!(output[1], 0.0);
        assert!(output[2] > 0.0);
    }

    #[test]
    fn hand_computed_expanding_window() {
        let vol = AnnualizedVolatility::<f64>::new(30).unwrap();
        let closes = [100.0, 110.0, 99.0];
        let r1 = (110.0_f64 / 100.0).ln();
        let r2 = (99.0_f64 / 110.0).ln();
        let mean = (r1 + r2) / 2.0;
        let std = (((r1 - mean).powi(2) + (r2 - mean).powi(2)) / 1.0).sqrt();
        let expected = crate::round_dp(std * 365.0_f64.sqrt() * 100.0, 2);
        assert_eq!(vol.compute(&closes)[2], expected);
    }

    #[test]
    fn trailing_window_drops_old_returns() {
        let vol = AnnualizedVolatility::<f64>::new(3).unwrap();
        // One violent move followed by a perfectly steady climb.
        let mut closes = vec![100.0, 200.0];
        for _ in 0..6 {
            let last = *closes.last().unwrap();
            closes.push(last * 1.01);
        }
        let output = vol.compute(&closes);
        assert_eq!(output.len(), closes.len());
        assert!(output[3] > 0.0);
        // From index 4 on the window no longer contains the jump.
        assert!(output[4..].iter().all(|value| *value == 0.0));
    }

    #[test]
    fn constant_growth_settles_to_constant_volatility() {
        let vol = AnnualizedVolatility::<f64>::new(30).unwrap();
        let closes: Vec<f64> = (0..90).map(|day| 100.0 * 1.02_f64.powi(day)).collect();
        let output = vol.compute(&closes);
        let settled = output[30];
        assert!(output[30..].iter().all(|value| *value == settled));
        assert!(output.iter().all(|value| *value >= 0.0));
    }

    #[test]
    fn rejects_zero_window() {
        assert!(AnnualizedVolatility::<f64>::new(0).is_err());
    }
}

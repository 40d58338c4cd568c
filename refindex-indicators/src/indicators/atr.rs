//! Average True Range indicator implementation.

use refindex_core::Candle;

use crate::core::{round_dp, Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// Value used to fill the series when no candles are available.
pub const FLAT_ATR: f64 = 0.0;

const ATR_DECIMALS: u32 = 2;

/// Average True Range over OHLC candles.
///
/// True ranges are smoothed with the EMA recursion (`k = 2 / (period + 1)`)
/// seeded with the first candle's high-low range. The seed is emitted as is;
/// every later value is rounded and the recursion continues from the
/// rounded value.
#[derive(Debug, Clone)]
pub struct Atr {
    smoother: Ema,
}

impl Atr {
    /// Create a new ATR indicator with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("ATR", period));
        }
        Ok(Self {
            smoother: Ema::new(period)?,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.smoother.period()
    }

    /// Like [`Indicator::compute`], but an empty candle series yields
    /// `fallback_len` copies of [`FLAT_ATR`] so the caller can align it with
    /// another series.
    pub fn compute_or_flat(&self, candles: &[Candle], fallback_len: usize) -> Vec<f64> {
        if candles.is_empty() {
            return vec![FLAT_ATR; fallback_len];
        }
        self.compute(candles)
    }

    fn true_range(candle: &Candle, prev_close: Option<f64>) -> f64 {
        let high_low = candle.range();
        match prev_close {
            None => high_low,
            Some(prev_close) => {
                let high_close = (candle.high - prev_close).abs();
                let low_close = (candle.low - prev_close).abs();
                high_low.max(high_close).max(low_close)
            }
        }
    }
}

impl Indicator for Atr {
    type Input = Candle;
    type Output = Vec<f64>;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let mut output = Vec::with_capacity(inputs.len());
        let mut prev_close = None;
        let mut current: Option<f64> = None;
        for candle in inputs {
            let tr = Self::true_range(candle, prev_close);
            prev_close = Some(candle.close);
            let next = match current {
                Some(previous) => round_dp(self.smoother.step(previous, tr), ATR_DECIMALS),
                None => tr,
            };
            current = Some(next);
            output.push(next);
        }
        output
    }
}

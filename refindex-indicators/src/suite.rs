//! Runs every indicator over one asset's series.

use refindex_core::{Candle, Sample};

use crate::config::IndicatorConfig;
use crate::core::{Indicator, IndicatorError};
use crate::indicators::{
    AnnualizedVolatility, Atr, BollingerBands, BollingerSeries, Macd, MacdSeries, Rsi, Vwap,
};

/// Which timestamps the ATR series lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtrSource {
    /// Computed from candles; one value per candle.
    Candles,
    /// No candles were supplied; a flat series aligned with the samples.
    Flat,
}

/// All indicator outputs for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorReport {
    /// RSI per sample.
    pub rsi: Vec<f64>,
    /// MACD line, signal and histogram per sample.
    pub macd: MacdSeries,
    /// Bollinger bands per sample.
    pub bollinger: BollingerSeries,
    /// Normalized Bollinger width per sample.
    pub bollinger_width: Vec<f64>,
    /// ATR per candle, or per sample when [`AtrSource::Flat`].
    pub atr: Vec<f64>,
    /// Alignment of [`IndicatorReport::atr`].
    pub atr_source: AtrSource,
    /// Cumulative VWAP per sample.
    pub vwap: Vec<f64>,
    /// Annualized volatility (percent) per sample.
    pub annualized_volatility: Vec<f64>,
}

/// The six indicators, built once from an [`IndicatorConfig`].
#[derive(Debug, Clone)]
pub struct IndicatorSuite {
    rsi: Rsi<Sample>,
    macd: Macd<Sample>,
    bollinger: BollingerBands<Sample>,
    atr: Atr,
    vwap: Vwap<Sample>,
    volatility: AnnualizedVolatility<Sample>,
}

impl IndicatorSuite {
    /// Builds every indicator, failing on the first invalid parameter.
    pub fn from_config(config: &IndicatorConfig) -> Result<Self, IndicatorError> {
        Ok(Self {
            rsi: Rsi::new(config.rsi.period)?,
            macd: Macd::new(config.macd.fast, config.macd.slow, config.macd.signal)?,
            bollinger: BollingerBands::new(
                config.bollinger.period,
                config.bollinger.std_multiplier,
            )?,
            atr: Atr::new(config.atr.period)?,
            vwap: Vwap::new(),
            volatility: AnnualizedVolatility::new(config.volatility.window)?,
        })
    }

    /// Computes every indicator. `candles` may be empty, in which case ATR
    /// degrades to a flat series of `samples.len()` zeros.
    pub fn compute(&self, samples: &[Sample], candles: &[Candle]) -> IndicatorReport {
        let bollinger = self.bollinger.compute(samples);
        let bollinger_width = bollinger.width();
        let atr_source = if candles.is_empty() {
            AtrSource::Flat
        } else {
            AtrSource::Candles
        };

        IndicatorReport {
            rsi: self.rsi.compute(samples),
            macd: self.macd.compute(samples),
            bollinger,
            bollinger_width,
            atr: self.atr.compute_or_flat(candles, samples.len()),
            atr_source,
            vwap: self.vwap.compute(samples),
            annualized_volatility: self.volatility.compute(samples),
        }
    }
}

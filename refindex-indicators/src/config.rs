//! Explicit indicator parameters.
//!
//! Every routine receives its parameters from an [`IndicatorConfig`]; the
//! defaults reproduce the periods the published indexes were calibrated on.

use serde::{Deserialize, Serialize};

use crate::core::IndicatorError;
use crate::suite::IndicatorSuite;

/// Default RSI lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;
/// Default MACD fast EMA period.
pub const DEFAULT_MACD_FAST: usize = 12;
/// Default MACD slow EMA period.
pub const DEFAULT_MACD_SLOW: usize = 26;
/// Default MACD signal EMA period.
pub const DEFAULT_MACD_SIGNAL: usize = 9;
/// Default Bollinger window.
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
/// Default Bollinger band width in standard deviations.
pub const DEFAULT_BOLLINGER_STD: f64 = 2.0;
/// Default ATR smoothing period.
pub const DEFAULT_ATR_PERIOD: usize = 14;
/// Default realized volatility window, in returns.
pub const DEFAULT_VOLATILITY_WINDOW: usize = 30;

/// RSI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    /// Wilder smoothing period.
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

/// MACD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Fast EMA period.
    pub fast: usize,
    /// Slow EMA period.
    pub slow: usize,
    /// Signal EMA period.
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_MACD_FAST,
            slow: DEFAULT_MACD_SLOW,
            signal: DEFAULT_MACD_SIGNAL,
        }
    }
}

/// Bollinger Bands parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    /// Rolling window length.
    pub period: usize,
    /// Band offset in population standard deviations.
    pub std_multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_BOLLINGER_PERIOD,
            std_multiplier: DEFAULT_BOLLINGER_STD,
        }
    }
}

/// ATR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrParams {
    /// Smoothing period.
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
        }
    }
}

/// Annualized volatility parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityParams {
    /// Number of trailing log returns once the window has filled.
    pub window: usize,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_VOLATILITY_WINDOW,
        }
    }
}

/// Parameters for the full indicator suite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// RSI settings.
    pub rsi: RsiParams,
    /// MACD settings.
    pub macd: MacdParams,
    /// Bollinger Bands settings.
    pub bollinger: BollingerParams,
    /// ATR settings.
    pub atr: AtrParams,
    /// Annualized volatility settings.
    pub volatility: VolatilityParams,
}

impl IndicatorConfig {
    /// Checks every parameter by building the suite it describes.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        IndicatorSuite::from_config(self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_parameters() {
        let config = IndicatorConfig::default();
        assert_eq!(config.rsi.period, 14);
        assert_eq!(
            (config.macd.fast, config.macd.slow, config.macd.signal),
            (12, 26, 9)
        );
        assert_eq!(config.bollinger.period, 20);
        assert_eq!(config.bollinger.std_multiplier, 2.0);
        assert_eq!(config.atr.period, 14);
        assert_eq!(config.volatility.window, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_reports_offending_indicator() {
        let mut config = IndicatorConfig::default();
        config.volatility.window = 0;
        assert_eq!(
            config.validate(),
            Err(IndicatorError::invalid_period("AnnualizedVolatility", 0))
        );

        let mut config = IndicatorConfig::default();
        config.bollinger.std_multiplier = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(IndicatorError::InvalidParameter { .. })
        ));
    }
}

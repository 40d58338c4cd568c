//! Built-in indicator implementations provided by the crate.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod volatility;
pub mod vwap;

pub use atr::Atr;
pub use bollinger::{BandWarmup, BollingerBands, BollingerSeries};
pub use ema::Ema;
pub use macd::{Macd, MacdSeries};
pub use rsi::Rsi;
pub use volatility::AnnualizedVolatility;
pub use vwap::Vwap;

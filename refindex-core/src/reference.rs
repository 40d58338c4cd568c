//! Reference index wire records consumed by the external risk service.

use serde::{Deserialize, Serialize};

/// Fixed `base` field carried by every reference index.
pub const REFERENCE_BASE: f64 = 1.0;

/// One `{time, value}` observation of a reference index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub time: String,
    pub value: f64,
}

/// Wire record `{riskFactorID, marketObjectCode, base, data}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIndex {
    #[serde(rename = "riskFactorID")]
    pub risk_factor_id: String,
    #[serde(rename = "marketObjectCode")]
    pub market_object_code: String,
    pub base: f64,
    pub data: Vec<IndexPoint>,
}

impl ReferenceIndex {
    /// Build a record with the fixed [`REFERENCE_BASE`].
    pub fn new(
        risk_factor_id: impl Into<String>,
        market_object_code: impl Into<String>,
        data: Vec<IndexPoint>,
    ) -> Self {
        Self {
            risk_factor_id: risk_factor_id.into(),
            market_object_code: market_object_code.into(),
            base: REFERENCE_BASE,
            data,
        }
    }

    /// Most recent value, if the index has any data.
    pub fn latest(&self) -> Option<f64> {
        self.data.last().map(|point| point.value)
    }
}

/// The ten indicator series published per asset, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Rsi,
    Macd,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerLower,
    BollingerWidth,
    Atr,
    Vwap,
    AnnualizedVolatility,
}

impl IndexKind {
    pub const ALL: [IndexKind; 10] = [
        IndexKind::Rsi,
        IndexKind::Macd,
        IndexKind::MacdSignal,
        IndexKind::MacdHistogram,
        IndexKind::BollingerUpper,
        IndexKind::BollingerLower,
        IndexKind::BollingerWidth,
        IndexKind::Atr,
        IndexKind::Vwap,
        IndexKind::AnnualizedVolatility,
    ];

    fn id_stem(self) -> &'static str {
        match self {
            IndexKind::Rsi => "RSI",
            IndexKind::Macd => "MACD",
            IndexKind::MacdSignal => "MACD_SIGNAL",
            IndexKind::MacdHistogram => "MACD_HIST",
            IndexKind::BollingerUpper => "BB_UPPER",
            IndexKind::BollingerLower => "BB_LOWER",
            IndexKind::BollingerWidth => "BB_WIDTH",
            IndexKind::Atr => "ATR",
            IndexKind::Vwap => "VWAP",
            IndexKind::AnnualizedVolatility => "ANN_VOL",
        }
    }

    fn code_stem(self) -> &'static str {
        match self {
            IndexKind::MacdHistogram => "MACD_HISTOGRAM",
            IndexKind::AnnualizedVolatility => "ANNUALIZED_VOL",
            other => other.id_stem(),
        }
    }

    /// Risk factor identifier, e.g. `ETH_MACD_HIST_01`.
    pub fn risk_factor_id(self, asset: &str) -> String {
        format!("{asset}_{}_01", self.id_stem())
    }

    /// Market object code, e.g. `ETH_MACD_HISTOGRAM`.
    pub fn market_object_code(self, asset: &str) -> String {
        format!("{asset}_{}", self.code_stem())
    }
}

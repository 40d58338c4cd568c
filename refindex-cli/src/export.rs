//! Packages indicator output into reference index records and renders them.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use refindex_core::{format_wire_time, Candle, IndexKind, IndexPoint, ReferenceIndex, Sample};
use refindex_indicators::{AtrSource, IndicatorReport};

/// Wrap every series of `report` into a [`ReferenceIndex`], in [`IndexKind::ALL`] order.
///
/// Values are paired with sample timestamps, except ATR which follows the
/// candles it was computed from. Pairing stops at the shorter side.
pub fn package(
    report: &IndicatorReport,
    samples: &[Sample],
    candles: &[Candle],
    asset: &str,
) -> Vec<ReferenceIndex> {
    let sample_times: Vec<String> = samples
        .iter()
        .map(|sample| format_wire_time(sample.time))
        .collect();
    let candle_times: Vec<String> = candles
        .iter()
        .map(|candle| format_wire_time(candle.time))
        .collect();

    IndexKind::ALL
        .iter()
        .map(|&kind| {
            let times = match (kind, report.atr_source) {
                (IndexKind::Atr, AtrSource::Candles) => &candle_times,
                _ => &sample_times,
            };
            ReferenceIndex::new(
                kind.risk_factor_id(asset),
                kind.market_object_code(asset),
                zip_points(times, series(report, kind)),
            )
        })
        .collect()
}

fn series(report: &IndicatorReport, kind: IndexKind) -> &[f64] {
    match kind {
        IndexKind::Rsi => &report.rsi,
        IndexKind::Macd => &report.macd.macd,
        IndexKind::MacdSignal => &report.macd.signal,
        IndexKind::MacdHistogram => &report.macd.histogram,
        IndexKind::BollingerUpper => &report.bollinger.upper,
        IndexKind::BollingerLower => &report.bollinger.lower,
        IndexKind::BollingerWidth => &report.bollinger_width,
        IndexKind::Atr => &report.atr,
        IndexKind::Vwap => &report.vwap,
        IndexKind::AnnualizedVolatility => &report.annualized_volatility,
    }
}

fn zip_points(times: &[String], values: &[f64]) -> Vec<IndexPoint> {
    times
        .iter()
        .zip(values)
        .map(|(time, value)| IndexPoint {
            time: time.clone(),
            value: *value,
        })
        .collect()
}

/// Serialize the records as a JSON array.
pub fn to_json(indexes: &[ReferenceIndex], pretty: bool) -> Result<String> {
    let body = if pretty {
        serde_json::to_string_pretty(indexes)
    } else {
        serde_json::to_string(indexes)
    };
    body.context("failed to serialize reference indexes")
}

/// Write the records to `path` as JSON.
pub fn write_json(path: &Path, indexes: &[ReferenceIndex], pretty: bool) -> Result<()> {
    let body = to_json(indexes, pretty)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// One line per index with its latest value and number of points.
pub fn render_summary(indexes: &[ReferenceIndex]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>14} {:>8}", "INDEX", "LATEST", "POINTS");
    for index in indexes {
        let latest = index
            .latest()
            .map(|value| format!("{value:.4}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<24} {:>14} {:>8}",
            index.risk_factor_id,
            latest,
            index.data.len()
        );
    }
    out
}

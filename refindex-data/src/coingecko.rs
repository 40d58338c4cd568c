//! Parsers for CoinGecko `market_chart` and `ohlc` payloads saved to disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use refindex_core::{Candle, Sample};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

/// Body of `/coins/{id}/market_chart`. Market caps are ignored.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<Vec<JsonValue>>,
    #[serde(default)]
    total_volumes: Vec<Vec<JsonValue>>,
}

/// Parse a `market_chart` body into samples.
///
/// Volumes are matched to prices by position; a price without a matching
/// volume row gets a volume of zero. Malformed price rows are skipped.
pub fn parse_market_chart(body: &str) -> Result<Vec<Sample>> {
    let response: MarketChartResponse =
        serde_json::from_str(body).context("invalid market_chart payload")?;
    let total = response.prices.len();
    let samples: Vec<Sample> = response
        .prices
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let (time, close) = parse_price_entry(entry)?;
            let volume = response
                .total_volumes
                .get(idx)
                .and_then(|row| row.get(1))
                .and_then(JsonValue::as_f64)
                .unwrap_or(0.0);
            Some(Sample::new(time, close, volume))
        })
        .collect();
    if samples.len() < total {
        warn!(
            skipped = total - samples.len(),
            "dropped malformed market_chart price rows"
        );
    }
    Ok(samples)
}

/// Parse an `ohlc` body (`[[ts_ms, open, high, low, close], ...]`) into candles.
pub fn parse_ohlc(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<JsonValue>> = serde_json::from_str(body).context("invalid ohlc payload")?;
    let total = rows.len();
    let candles: Vec<Candle> = rows.iter().filter_map(|row| parse_ohlc_entry(row)).collect();
    if candles.len() < total {
        warn!(
            skipped = total - candles.len(),
            "dropped malformed ohlc rows"
        );
    }
    Ok(candles)
}

fn parse_timestamp_millis(value: &JsonValue) -> Option<DateTime<Utc>> {
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().map(|ms| ms as i64))?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn parse_price_entry(entry: &[JsonValue]) -> Option<(DateTime<Utc>, f64)> {
    if entry.len() < 2 {
        return None;
    }
    let time = parse_timestamp_millis(entry.first()?)?;
    let price = entry.get(1)?.as_f64()?;
    Some((time, price))
}

fn parse_ohlc_entry(entry: &[JsonValue]) -> Option<Candle> {
    if entry.len() < 5 {
        return None;
    }
    let time = parse_timestamp_millis(entry.first()?)?;
    let open = entry.get(1)?.as_f64()?;
    let high = entry.get(2)?.as_f64()?;
    let low = entry.get(3)?.as_f64()?;
    let close = entry.get(4)?.as_f64()?;
    Some(Candle {
        time,
        open,
        high,
        low,
        close,
    })
}

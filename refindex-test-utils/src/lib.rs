//! Fixtures shared by the refindex test suites.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use refindex_core::{format_wire_time, Candle, Sample};
use serde_json::json;

/// Midnight UTC on the first fixture day.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base timestamp")
}

/// Timestamp of the `idx`-th fixture day.
pub fn day(idx: usize) -> DateTime<Utc> {
    base_time() + Duration::days(idx as i64)
}

/// One sample per day with a constant volume.
pub fn daily_samples(closes: &[f64], volume: f64) -> Vec<Sample> {
    closes
        .iter()
        .enumerate()
        .map(|(idx, close)| Sample::new(day(idx), *close, volume))
        .collect()
}

/// One candle per day spanning 1% either side of the close; each candle opens
/// at the previous close.
pub fn daily_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(idx, close)| Candle {
            time: day(idx),
            open: if idx == 0 { *close } else { closes[idx - 1] },
            high: close * 1.01,
            low: close * 0.99,
            close: *close,
        })
        .collect()
}

/// `[100, 102, 101, 105, 104, 108, 107, 110, 109, 112]` repeated `cycles` times.
pub fn sawtooth_closes(cycles: usize) -> Vec<f64> {
    [100.0, 102.0, 101.0, 105.0, 104.0, 108.0, 107.0, 110.0, 109.0, 112.0].repeat(cycles)
}

/// Writes a CoinGecko-style `market_chart` payload for the samples.
pub fn write_market_chart(path: &Path, samples: &[Sample]) -> Result<()> {
    let prices: Vec<_> = samples
        .iter()
        .map(|sample| json!([sample.time.timestamp_millis(), sample.close]))
        .collect();
    let volumes: Vec<_> = samples
        .iter()
        .map(|sample| json!([sample.time.timestamp_millis(), sample.volume]))
        .collect();
    let payload = json!({
        "prices": prices,
        "market_caps": [],
        "total_volumes": volumes,
    });
    fs::write(path, serde_json::to_vec_pretty(&payload)?)?;
    Ok(())
}

/// Writes a CoinGecko-style `ohlc` payload for the candles.
pub fn write_ohlc(path: &Path, candles: &[Candle]) -> Result<()> {
    let rows: Vec<_> = candles
        .iter()
        .map(|candle| {
            json!([
                candle.time.timestamp_millis(),
                candle.open,
                candle.high,
                candle.low,
                candle.close
            ])
        })
        .collect();
    fs::write(path, serde_json::to_vec(&rows)?)?;
    Ok(())
}

/// Writes `time,close,volume` rows using the wire timestamp layout.
pub fn write_samples_csv(path: &Path, samples: &[Sample]) -> Result<()> {
    let mut body = String::from("time,close,volume\n");
    for sample in samples {
        writeln!(
            body,
            "{},{},{}",
            format_wire_time(sample.time),
            sample.close,
            sample.volume
        )?;
    }
    fs::write(path, body)?;
    Ok(())
}

/// Writes `time,open,high,low,close` rows using the wire timestamp layout.
pub fn write_candles_csv(path: &Path, candles: &[Candle]) -> Result<()> {
    let mut body = String::from("time,open,high,low,close\n");
    for candle in candles {
        writeln!(
            body,
            "{},{},{},{},{}",
            format_wire_time(candle.time),
            candle.open,
            candle.high,
            candle.low,
            candle.close
        )?;
    }
    fs::write(path, body)?;
    Ok(())
}

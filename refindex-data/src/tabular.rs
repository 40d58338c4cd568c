//! CSV readers for manually exported price and candle files.

use std::io::Read;

use anyhow::{Context, Result};
use refindex_core::{parse_timestamp, Candle, Sample};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SampleRow {
    time: String,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CandleRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

/// Read `time,close[,volume]` rows. A missing or empty volume counts as zero.
pub fn read_samples<R: Read>(source: R) -> Result<Vec<Sample>> {
    let mut reader = reader(source);
    let mut samples = Vec::new();
    for (idx, row) in reader.deserialize::<SampleRow>().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("invalid sample row at line {line}"))?;
        let time = parse_timestamp(&row.time)
            .with_context(|| format!("invalid sample time at line {line}"))?;
        samples.push(Sample::new(time, row.close, row.volume.unwrap_or(0.0)));
    }
    Ok(samples)
}

/// Read `time,open,high,low,close` rows. Rows missing a high or low are errors.
pub fn read_candles<R: Read>(source: R) -> Result<Vec<Candle>> {
    let mut reader = reader(source);
    let mut candles = Vec::new();
    for (idx, row) in reader.deserialize::<CandleRow>().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("invalid candle row at line {line}"))?;
        let time = parse_timestamp(&row.time)
            .with_context(|| format!("invalid candle time at line {line}"))?;
        candles.push(Candle {
            time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        });
    }
    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_column_is_optional() {
        let body = "time,close\n2024-01-01,100.5\n2024-01-02,101.25\n";
        let samples = read_samples(body.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].close, 101.25);
        assert_eq!(samples[1].volume, 0.0);
    }

    #[test]
    fn empty_volume_counts_as_zero() {
        let body = "time,close,volume\n2024-01-01T00:00:00, 100.5 ,\n1704153600000,99,12.5\n";
        let samples = read_samples(body.as_bytes()).unwrap();
        assert_eq!(samples[0].volume, 0.0);
        assert_eq!(samples[1].volume, 12.5);
    }

    #[test]
    fn candle_rows_require_high_and_low() {
        let body = "time,open,high,low,close\n2024-01-01,10,12,9,11\n";
        let candles = read_candles(body.as_bytes()).unwrap();
        assert_eq!(candles[0].high, 12.0);

        let missing = "time,open,close\n2024-01-01,10,11\n";
        assert!(read_candles(missing.as_bytes()).is_err());
    }

    #[test]
    fn reports_line_of_bad_timestamp() {
        let body = "time,close\n2024-01-01,1\nsoon,2\n";
        let err = read_samples(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }
}

//! File-backed series loading.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use refindex_core::{Candle, Sample, Timestamped};
use tracing::{debug, info, warn};

use crate::{coingecko, tabular};

/// On-disk encodings understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// CoinGecko JSON (`market_chart` for samples, `ohlc` for candles).
    MarketChart,
    /// Comma separated values with a header row.
    Csv,
}

impl DatasetFormat {
    /// Infer the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::MarketChart),
            Some("csv") => Ok(Self::Csv),
            _ => bail!(
                "unsupported dataset extension for {} (expected .json or .csv)",
                path.display()
            ),
        }
    }
}

/// Supplies the ordered series an indicator run consumes.
pub trait SeriesLoader {
    /// Daily close/volume samples, ascending by time.
    fn load_samples(&self) -> Result<Vec<Sample>>;
    /// OHLC candles, ascending by time. May be empty.
    fn load_candles(&self) -> Result<Vec<Candle>>;
}

/// Loads samples (and optionally candles) from files on disk.
#[derive(Debug, Clone)]
pub struct FileSeriesLoader {
    samples: PathBuf,
    candles: Option<PathBuf>,
}

impl FileSeriesLoader {
    pub fn new(samples: impl Into<PathBuf>) -> Self {
        Self {
            samples: samples.into(),
            candles: None,
        }
    }

    #[must_use]
    pub fn with_candles(mut self, candles: impl Into<PathBuf>) -> Self {
        self.candles = Some(candles.into());
        self
    }
}

impl SeriesLoader for FileSeriesLoader {
    fn load_samples(&self) -> Result<Vec<Sample>> {
        let path = self.samples.as_path();
        let samples = match DatasetFormat::from_path(path)? {
            DatasetFormat::MarketChart => coingecko::parse_market_chart(&read_text(path)?),
            DatasetFormat::Csv => tabular::read_samples(open(path)?),
        }
        .with_context(|| format!("failed to load samples from {}", path.display()))?;
        ensure_chronological(&samples, "sample")?;
        info!(path = %path.display(), count = samples.len(), "loaded daily samples");
        Ok(samples)
    }

    fn load_candles(&self) -> Result<Vec<Candle>> {
        let Some(path) = self.candles.as_deref() else {
            debug!("no candle source configured");
            return Ok(Vec::new());
        };
        if !path.exists() {
            warn!(path = %path.display(), "candle file not found; continuing without candles");
            return Ok(Vec::new());
        }
        let candles = match DatasetFormat::from_path(path)? {
            DatasetFormat::MarketChart => coingecko::parse_ohlc(&read_text(path)?),
            DatasetFormat::Csv => tabular::read_candles(open(path)?),
        }
        .with_context(|| format!("failed to load candles from {}", path.display()))?;
        ensure_chronological(&candles, "candle")?;
        info!(path = %path.display(), count = candles.len(), "loaded OHLC candles");
        Ok(candles)
    }
}

/// Fail unless timestamps are strictly ascending (no duplicates, no reordering).
pub fn ensure_chronological<T: Timestamped>(items: &[T], label: &str) -> Result<()> {
    for (idx, pair) in items.windows(2).enumerate() {
        let (prev, next) = (pair[0].timestamp(), pair[1].timestamp());
        if next <= prev {
            bail!(
                "{label} {} at {next} does not follow previous timestamp {prev}",
                idx + 1
            );
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use refindex_test_utils::{
        daily_candles, daily_samples, day, write_candles_csv, write_market_chart, write_ohlc,
        write_samples_csv,
    };
    use tempfile::tempdir;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("eth.JSON")).unwrap(),
            DatasetFormat::MarketChart
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("eth.csv")).unwrap(),
            DatasetFormat::Csv
        );
        assert!(DatasetFormat::from_path(Path::new("eth.parquet")).is_err());
        assert!(DatasetFormat::from_path(Path::new("eth")).is_err());
    }

    #[test]
    fn loads_json_payloads() -> Result<()> {
        let temp = tempdir()?;
        let closes = [2000.0, 2010.5, 1995.25];
        let samples = daily_samples(&closes, 5.0e8);
        let candles = daily_candles(&closes[..2]);
        let prices_path = temp.path().join("market_chart.json");
        let ohlc_path = temp.path().join("ohlc.json");
        write_market_chart(&prices_path, &samples)?;
        write_ohlc(&ohlc_path, &candles)?;

        let loader = FileSeriesLoader::new(&prices_path).with_candles(&ohlc_path);
        assert_eq!(loader.load_samples()?, samples);
        assert_eq!(loader.load_candles()?, candles);
        Ok(())
    }

    #[test]
    fn loads_csv_files() -> Result<()> {
        let temp = tempdir()?;
        let closes = [10.0, 11.5, 12.25, 11.0];
        let samples = daily_samples(&closes, 3.0);
        let candles = daily_candles(&closes);
        let prices_path = temp.path().join("prices.csv");
        let candles_path = temp.path().join("candles.csv");
        write_samples_csv(&prices_path, &samples)?;
        write_candles_csv(&candles_path, &candles)?;

        let loader = FileSeriesLoader::new(&prices_path).with_candles(&candles_path);
        assert_eq!(loader.load_samples()?, samples);
        assert_eq!(loader.load_candles()?, candles);
        Ok(())
    }

    #[test]
    fn missing_candle_source_is_empty() -> Result<()> {
        let loader = FileSeriesLoader::new("unused.json");
        assert!(loader.load_candles()?.is_empty());

        let temp = tempdir()?;
        let absent =
            FileSeriesLoader::new("unused.json").with_candles(temp.path().join("ohlc.json"));
        assert!(absent.load_candles()?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_duplicate_and_unordered_timestamps() {
        let mut samples = daily_samples(&[1.0, 2.0, 3.0], 1.0);
        assert!(ensure_chronological(&samples, "sample").is_ok());

        samples[2].time = day(1);
        let err = ensure_chronological(&samples, "sample").unwrap_err();
        assert!(err.to_string().contains("sample 2"), "{err}");

        samples[2].time = day(0);
        assert!(ensure_chronological(&samples, "sample").is_err());
    }

    #[test]
    fn unordered_file_fails_to_load() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("prices.csv");
        std::fs::write(&path, "time,close\n2024-01-02,1\n2024-01-01,2\n")?;
        assert!(FileSeriesLoader::new(&path).load_samples().is_err());
        Ok(())
    }
}

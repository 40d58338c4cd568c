use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use refindex_config::AppConfig;
use refindex_data::{FileSeriesLoader, SeriesLoader};
use refindex_indicators::{AtrSource, IndicatorSuite};
use tracing::{info, warn};

use crate::export;
use crate::telemetry::{init_tracing, LogFormat};

#[derive(Parser)]
#[command(author, version, about = "Reference index builder")]
pub struct Cli {
    /// Configuration environment (config/{env}.toml)
    #[arg(long, global = true, default_value = "default")]
    env: String,
    /// Directory holding default.toml and per-environment overlays
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute every indicator for one asset and emit its reference indexes
    Compute(ComputeArgs),
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(Args)]
pub struct ComputeArgs {
    /// Daily samples (.json market_chart payload or .csv)
    #[arg(long)]
    prices: PathBuf,
    /// OHLC candles (.json ohlc payload or .csv); ATR is flat without them
    #[arg(long)]
    candles: Option<PathBuf>,
    /// Asset prefix for index identifiers (overrides export.asset)
    #[arg(long)]
    asset: Option<String>,
    /// Write the JSON array of indexes to this file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the JSON array to stdout. Without this or --output a summary
    /// table is printed
    #[arg(long)]
    stdout: bool,
    /// Emit single-line JSON regardless of export.pretty
    #[arg(long)]
    compact: bool,
    /// Minimum daily samples required (overrides pipeline.min_samples)
    #[arg(long)]
    min_samples: Option<usize>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;
    let config = AppConfig::load(&cli.env, &cli.config_dir)?;

    match cli.command {
        Commands::Compute(args) => args.run(config),
        Commands::ShowConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

impl ComputeArgs {
    fn run(self, mut config: AppConfig) -> Result<()> {
        if let Some(asset) = self.asset {
            config.export.asset = asset;
        }
        if let Some(min_samples) = self.min_samples {
            config.pipeline.min_samples = min_samples;
        }
        config.validate()?;

        let mut loader = FileSeriesLoader::new(&self.prices);
        if let Some(candles) = &self.candles {
            loader = loader.with_candles(candles);
        }
        let samples = loader.load_samples()?;
        let min_samples = config.pipeline.min_samples;
        if samples.len() < min_samples {
            bail!(
                "need at least {min_samples} daily samples, got {} from {}",
                samples.len(),
                self.prices.display()
            );
        }
        let candles = loader.load_candles()?;

        let suite = IndicatorSuite::from_config(&config.indicators)
            .context("failed to build indicator suite")?;
        let report = suite.compute(&samples, &candles);
        if report.atr_source == AtrSource::Flat {
            warn!(
                len = report.atr.len(),
                "no OHLC candles available; ATR falls back to a flat series"
            );
        }

        let asset = config.export.asset.as_str();
        let indexes = export::package(&report, &samples, &candles, asset);
        info!(
            asset,
            samples = samples.len(),
            candles = candles.len(),
            indexes = indexes.len(),
            "computed reference indexes"
        );

        let pretty = config.export.pretty && !self.compact;
        if let Some(path) = &self.output {
            export::write_json(path, &indexes, pretty)?;
            info!(path = %path.display(), "wrote reference indexes");
        }
        if self.stdout {
            println!("{}", export::to_json(&indexes, pretty)?);
        } else if self.output.is_none() {
            print!("{}", export::render_summary(&indexes));
        }
        Ok(())
    }
}

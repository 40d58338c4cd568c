//! Layered settings for the refindex pipeline.
//!
//! Sources are merged in order, later ones winning:
//! `config/default.toml`, `config/{env}.toml`, then `REFINDEX__*`
//! environment variables (`__` separates nested keys, e.g.
//! `REFINDEX__INDICATORS__RSI__PERIOD=21`). Every file is optional and any
//! missing value falls back to its `Default`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use refindex_indicators::IndicatorConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "REFINDEX";
/// Separator between the prefix and nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";
/// Asset prefix used for index identifiers when none is configured.
pub const DEFAULT_ASSET: &str = "ETH";
/// Minimum number of daily samples a run needs before anything is emitted.
pub const DEFAULT_MIN_SAMPLES: usize = 30;

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub indicators: IndicatorConfig,
    pub export: ExportConfig,
    pub pipeline: PipelineConfig,
}

/// How reference indexes are labelled and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix for `riskFactorID` and `marketObjectCode`.
    pub asset: String,
    /// Pretty-print JSON written to files and stdout.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            asset: DEFAULT_ASSET.to_string(),
            pretty: true,
        }
    }
}

/// Run preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_samples: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl AppConfig {
    /// Load `{config_dir}/default.toml`, `{config_dir}/{env}.toml` and the
    /// process environment, then validate the result.
    pub fn load(env: &str, config_dir: &Path) -> Result<Self> {
        Self::load_with(env, config_dir, env_source())
    }

    /// Same as [`AppConfig::load`] but with an explicit environment source.
    pub fn load_with(env: &str, config_dir: &Path, environment: Environment) -> Result<Self> {
        let default_path = config_dir.join("default.toml");
        let env_path = config_dir.join(format!("{env}.toml"));
        debug!(
            default = %default_path.display(),
            overlay = %env_path.display(),
            "resolving configuration sources"
        );

        let mut builder =
            Config::builder().add_source(File::from(default_path.as_path()).required(false));
        if env != "default" {
            builder = builder.add_source(File::from(env_path.as_path()).required(false));
        }
        let settings = builder
            .add_source(environment)
            .build()
            .with_context(|| format!("failed to read configuration from {}", config_dir.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration values")?;
        config.validate()?;
        info!(
            env,
            asset = %config.export.asset,
            min_samples = config.pipeline.min_samples,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<()> {
        self.indicators
            .validate()
            .context("invalid indicator configuration")?;
        if self.export.asset.trim().is_empty() {
            bail!("export.asset must not be empty");
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration as TOML")
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

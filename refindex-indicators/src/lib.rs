#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Batch technical indicators over daily price series, computed in `f64`.

/// Explicit indicator parameters and their defaults.
pub mod config;
/// Foundational traits and shared abstractions.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// Window statistics shared by the rolling indicators.
pub mod stats;
/// Runs the full indicator set over one asset.
pub mod suite;

/// Re-export of the configuration types.
pub use crate::config::IndicatorConfig;
/// Re-export of the core traits, error type and rounding helper.
pub use crate::core::{round_dp, Indicator, IndicatorError, Input, VolumeInput};
/// Re-export of the suite entry points.
pub use crate::suite::{AtrSource, IndicatorReport, IndicatorSuite};

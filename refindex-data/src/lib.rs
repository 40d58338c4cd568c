//! Loaders that turn saved market data into ordered refindex series.

pub mod coingecko;
pub mod io;
pub mod tabular;

pub use io::{ensure_chronological, DatasetFormat, FileSeriesLoader, SeriesLoader};

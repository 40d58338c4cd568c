//! Core domain types shared by the refindex crates.

pub mod reference;
pub mod time;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use reference::{IndexKind, IndexPoint, ReferenceIndex, REFERENCE_BASE};
pub use time::{format_wire_time, parse_timestamp, TimeParseError, WIRE_TIME_FORMAT};

/// Price expressed as a plain float; the engine works in `f64` end to end.
pub type Price = f64;
/// Traded volume for one sample.
pub type Volume = f64;

/// Daily close/volume observation.
///
/// Sequences of samples are ordered ascending by `time` without duplicates.
/// Missing days are simply absent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub close: Price,
    #[serde(default)]
    pub volume: Volume,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, close: Price, volume: Volume) -> Self {
        Self {
            time,
            close,
            volume,
        }
    }
}

/// OHLC candle. Sourced independently from [`Sample`]s and may cover a
/// different window with different timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Candle {
    /// Distance between the high and the low of the candle.
    pub fn range(&self) -> Price {
        self.high - self.low
    }
}

/// Anything carrying a timestamp; used for ordering checks and packaging.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for Sample {
    fn timestamp(&self) -> DateTime<Utc> {
        self.time
    }
}

impl Timestamped for Candle {
    fn timestamp(&self) -> DateTime<Utc> {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sample_volume_defaults_to_zero() {
        let sample: Sample =
            serde_json::from_str(r#"{"time":"2024-01-01T00:00:00Z","close":101.5}"#).unwrap();
        assert_eq!(sample.volume, 0.0);
        assert_eq!(
            sample.timestamp(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn candle_range_is_high_minus_low() {
        let candle = Candle {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            open: 10.0,
            high: 12.5,
            low: 9.0,
            close: 11.0,
        };
        assert_eq!(candle.range(), 3.5);
    }
}

//! Bollinger Bands indicator built on a rolling mean and population standard deviation.

use std::marker::PhantomData;

use crate::core::{round_dp, Indicator, IndicatorError, Input};
use crate::stats::{mean, std_dev, Variance};

const BAND_DECIMALS: u32 = 2;
const WIDTH_DECIMALS: u32 = 4;

/// Policy applied to indices that do not yet have a full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandWarmup {
    /// Middle, upper and lower all equal the raw input value.
    #[default]
    CollapseToPrice,
}

/// Output of the Bollinger Bands indicator, one entry per input in each band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerSeries {
    /// Middle band (rolling mean).
    pub middle: Vec<f64>,
    /// Upper band (mean + k * std dev).
    pub upper: Vec<f64>,
    /// Lower band (mean - k * std dev).
    pub lower: Vec<f64>,
}

impl BollingerSeries {
    /// Number of points in each band.
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// Whether the bands are empty.
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    /// Normalized band width `(upper - lower) / middle`, rounded to four
    /// decimals. Zero wherever the middle band is not positive.
    pub fn width(&self) -> Vec<f64> {
        self.middle
            .iter()
            .zip(&self.upper)
            .zip(&self.lower)
            .map(|((middle, upper), lower)| {
                if *middle > 0.0 {
                    round_dp((upper - lower) / middle, WIDTH_DECIMALS)
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Produces Bollinger Bands from a trailing window.
#[derive(Debug, Clone)]
pub struct BollingerBands<I = f64> {
    period: usize,
    std_multiplier: f64,
    warmup: BandWarmup,
    marker: PhantomData<I>,
}

impl<I> BollingerBands<I>
where
    I: Input,
{
    /// Creates a new Bollinger Bands indicator.
    pub fn new(period: usize, std_multiplier: f64) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("BollingerBands", period));
        }
        if !std_multiplier.is_finite() || std_multiplier.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "BollingerBands",
                "std_multiplier",
                std_multiplier,
            ));
        }

        Ok(Self {
            period,
            std_multiplier,
            warmup: BandWarmup::default(),
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for BollingerBands<I>
where
    I: Input,
{
    type Input = I;
    type Output = BollingerSeries;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let closes: Vec<f64> = inputs.iter().map(Input::value).collect();
        let mut bands = BollingerSeries {
            middle: Vec::with_capacity(closes.len()),
            upper: Vec::with_capacity(closes.len()),
            lower: Vec::with_capacity(closes.len()),
        };

        let warm = closes.len().min(self.period - 1);
        match self.warmup {
            BandWarmup::CollapseToPrice => {
                bands.middle.extend_from_slice(&closes[..warm]);
                bands.upper.extend_from_slice(&closes[..warm]);
                bands.lower.extend_from_slice(&closes[..warm]);
            }
        }

        for window in closes.windows(self.period) {
            let mean = mean(window).unwrap_or_default();
            let std = std_dev(window, Variance::Population).unwrap_or_default();
            let offset = self.std_multiplier * std;
            bands.middle.push(round_dp(mean, BAND_DECIMALS));
            bands.upper.push(round_dp(mean + offset, BAND_DECIMALS));
            bands.lower.push(round_dp(mean - offset, BAND_DECIMALS));
        }

        bands
    }
}

#[cfg(test)]
mod tests {
    use super::{BollingerBands, BollingerSeries};
    use crate::Indicator;

    #[test]
    fn computes_expected_bands() {
        let bb = BollingerBands::<f64>::new(5, 2.0).unwrap();
        let bands = bb.compute(&[10.0, 11.0, 12.0, 13.0, 14.0]);

        assert_eq!(bands.middle[4], 12.0);
        assert_eq!(bands.upper[4], 14.83);
        assert_eq!(bands.lower[4], 9.17);
    }

    #[test]
    fn warm_up_collapses_to_price() {
        let bb = BollingerBands::<f64>::new(5, 2.0).unwrap();
        let closes = [10.123, 11.456, 12.789, 13.0, 14.0, 15.0];
        let bands = bb.compute(&closes);
        assert_eq!(bands.len(), closes.len());
        for idx in 0..4 {
            assert_eq!(bands.middle[idx], closes[idx]);
            assert_eq!(bands.upper[idx], closes[idx]);
            assert_eq!(bands.lower[idx], closes[idx]);
        }
    }

    #[test]
    fn bands_are_ordered_after_warm_up() {
        let bb = BollingerBands::<f64>::new(20, 2.0).unwrap();
        let closes: Vec<f64> = (0..80)
            .map(|idx| 1800.0 + 35.0 * (idx as f64 / 4.0).sin())
            .collect();
        let bands = bb.compute(&closes);
        for idx in 19..closes.len() {
            assert!(bands.lower[idx] <= bands.middle[idx]);
            assert!(bands.middle[idx] <= bands.upper[idx]);
        }
    }

    #[test]
    fn shorter_than_period_is_all_warm_up() {
        let bb = BollingerBands::<f64>::new(20, 2.0).unwrap();
        let bands = bb.compute(&[1.0, 2.0, 3.0]);
        assert_eq!(bands.middle, vec![1.0, 2.0, 3.0]);
        assert!(bb.compute(&[]).is_empty());
    }

    #[test]
    fn width_guards_non_positive_middle() {
        let bands = BollingerSeries {
            middle: vec![0.0, 100.0],
            upper: vec![1.0, 110.0],
            lower: vec![-1.0, 90.0],
        };
        assert_eq!(bands.width(), vec![0.0, 0.2]);
    }

    #[test]
    fn rejects_negative_multiplier() {
        let err = BollingerBands::<f64>::new(5, -1.0).unwrap_err();
        assert!(matches!(
            err,
            crate::IndicatorError::InvalidParameter { .. }
        ));
    }
}

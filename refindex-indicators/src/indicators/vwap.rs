//! Cumulative Volume Weighted Average Price.

use std::marker::PhantomData;

use crate::core::{round_dp, Indicator, VolumeInput};

const VWAP_DECIMALS: u32 = 2;

/// Running VWAP accumulated from the start of the series; never reset per
/// window.
///
/// While cumulative volume is zero the raw close is emitted instead.
#[derive(Debug, Clone)]
pub struct Vwap<I> {
    marker: PhantomData<I>,
}

impl<I> Vwap<I>
where
    I: VolumeInput,
{
    /// Creates a new VWAP indicator.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<I> Default for Vwap<I>
where
    I: VolumeInput,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Indicator for Vwap<I>
where
    I: VolumeInput,
{
    type Input = I;
    type Output = Vec<f64>;

    fn compute(&self, inputs: &[Self::Input]) -> Self::Output {
        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;
        inputs
            .iter()
            .map(|input| {
                let price = input.value();
                let volume = input.volume();
                cum_pv += price * volume;
                cum_volume += volume;
                if cum_volume > 0.0 {
                    round_dp(cum_pv / cum_volume, VWAP_DECIMALS)
                } else {
                    price
                }
            })
            .collect()
    }
}

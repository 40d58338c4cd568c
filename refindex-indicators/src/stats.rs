//! Window statistics shared by the rolling indicators.

use crate::core::float_from_usize;

/// Denominator convention used when computing a variance.
///
/// Bollinger Bands use the population form while realized volatility uses
/// the sample form; the two are intentionally kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1` (Bessel's correction).
    Sample,
}

/// Arithmetic mean; `None` for an empty window.
pub fn mean(window: &[f64]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    Some(window.iter().sum::<f64>() / float_from_usize(window.len()))
}

/// Two-pass variance of `window` under the given convention.
///
/// Returns `None` when the window is too short for the convention
/// (empty for population, fewer than two values for sample).
pub fn variance(window: &[f64], convention: Variance) -> Option<f64> {
    let n = window.len();
    let divisor = match convention {
        Variance::Population if n >= 1 => n,
        Variance::Sample if n >= 2 => n - 1,
        _ => return None,
    };
    let mean = mean(window)?;
    let squared: f64 = window.iter().map(|x| (x - mean) * (x - mean)).sum();
    Some(squared / float_from_usize(divisor))
}

/// Square root of [`variance`].
pub fn std_dev(window: &[f64], convention: Variance) -> Option<f64> {
    variance(window, convention).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_and_sample_forms_differ() {
        let window = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&window), Some(5.0));
        assert_eq!(std_dev(&window, Variance::Population), Some(2.0));
        let sample = std_dev(&window, Variance::Sample).unwrap();
        assert!((sample - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn short_windows_have_no_variance() {
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[], Variance::Population), None);
        assert_eq!(variance(&[3.0], Variance::Population), Some(0.0));
        assert_eq!(variance(&[3.0], Variance::Sample), None);
    }
}

//! Small numeric helpers shared by the analyzers.

use crate::models::Trend;
use indexmap::IndexMap;

/// Minimum half-to-half change in a [0,1] confidence series that counts
/// as movement.
pub const CONFIDENCE_TREND_THRESHOLD: f64 = 0.1;

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Most frequent value. Ties go to the value seen first.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Stability of a series in [0,1]: `1 - stddev / mean`, clamped.
///
/// Fewer than two samples carry no spread information and yield 0.5.
pub fn consistency(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.5;
    }
    let avg = mean(values).unwrap_or(0.0);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();
    let divisor = if avg == 0.0 { 1.0 } else { avg };
    (1.0 - std_dev / divisor).clamp(0.0, 1.0)
}

/// Compare the first half of a [0,1] series with the second half.
///
/// With fewer than three samples the series is reported as stable.
pub fn split_half_trend(values: &[f64]) -> Trend {
    if values.len() < 3 {
        return Trend::Stable;
    }
    let (first, second) = values.split_at(values.len() / 2);
    let first_avg = mean(first).unwrap_or(0.0);
    let second_avg = mean(second).unwrap_or(0.0);

    if second_avg > first_avg + CONFIDENCE_TREND_THRESHOLD {
        Trend::Improving
    } else if second_avg < first_avg - CONFIDENCE_TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(11.111, 1), 11.1);
        assert_eq!(round_to(31.3333, 2), 31.33);
        assert_eq!(round_to(84.5, 0), 85.0);
    }

    #[test]
    fn test_mode_prefers_first_seen_on_tie() {
        assert_eq!(mode(["calm", "excited", "excited", "calm"]), Some("calm"));
        assert_eq!(mode(["low", "high", "high"]), Some("high"));
        assert_eq!(mode(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_consistency_bounds() {
        assert_eq!(consistency(&[0.8]), 0.5);
        assert_eq!(consistency(&[0.5, 0.5, 0.5]), 1.0);
        // Huge spread relative to the mean clamps to zero.
        assert_eq!(consistency(&[0.0, 10.0]), 0.0);
        // All-zero series must not divide by zero.
        assert_eq!(consistency(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_split_half_trend() {
        assert_eq!(split_half_trend(&[0.2, 0.9]), Trend::Stable);
        assert_eq!(split_half_trend(&[0.3, 0.4, 0.7, 0.8]), Trend::Improving);
        assert_eq!(split_half_trend(&[0.9, 0.8, 0.5]), Trend::Declining);
        assert_eq!(split_half_trend(&[0.5, 0.55, 0.52]), Trend::Stable);
    }
}

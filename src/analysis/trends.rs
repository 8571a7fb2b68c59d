//! Per-skill trend analysis across sessions.

use super::stats::{mean, round_to};
use crate::models::{ScorePoint, SkillBreakdownEntry, Trend};
use indexmap::IndexMap;

/// Number of sessions compared at each end of a history.
pub const TREND_WINDOW: usize = 3;
/// Point change on the 0-100 scale that counts as movement.
pub const SKILL_TREND_THRESHOLD: f64 = 5.0;

/// Trend and improvement of a chronological score series.
///
/// Compares the mean of the last three scores with the mean of the first
/// three. Shorter histories report insufficient data and no improvement.
pub fn score_trend(scores: &[f64]) -> (Trend, f64) {
    if scores.len() < TREND_WINDOW {
        return (Trend::InsufficientData, 0.0);
    }

    let old = mean(&scores[..TREND_WINDOW]).unwrap_or(0.0);
    let recent = mean(&scores[scores.len() - TREND_WINDOW..]).unwrap_or(0.0);
    let change = recent - old;

    let trend = if change > SKILL_TREND_THRESHOLD {
        Trend::Improving
    } else if change < -SKILL_TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    };
    (trend, change)
}

/// Summarize one skill's history.
pub fn analyze_skill(points: &[ScorePoint]) -> Option<SkillBreakdownEntry> {
    let scores: Vec<f64> = points.iter().map(|p| p.score).collect();
    let average = mean(&scores)?;
    let (trend, improvement) = score_trend(&scores);

    Some(SkillBreakdownEntry {
        average_score: round_to(average, 2),
        trend,
        improvement: round_to(improvement, 2),
        total_sessions: scores.len(),
        scores_history: scores,
    })
}

/// Summarize every skill, preserving the history's key order.
///
/// Skills with no data points are left out.
pub fn analyze(history: &IndexMap<String, Vec<ScorePoint>>) -> IndexMap<String, SkillBreakdownEntry> {
    history
        .iter()
        .filter_map(|(skill, points)| analyze_skill(points).map(|entry| (skill.clone(), entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(scores: &[f64]) -> Vec<ScorePoint> {
        scores
            .iter()
            .map(|&score| ScorePoint {
                timestamp: None,
                score,
            })
            .collect()
    }

    #[test]
    fn test_improving_history() {
        let entry = analyze_skill(&series(&[40.0, 42.0, 41.0, 70.0, 72.0, 75.0])).unwrap();
        assert_eq!(entry.trend, Trend::Improving);
        assert_eq!(entry.improvement, 31.33);
        assert_eq!(entry.improvement.round(), 31.0);
        assert_eq!(entry.average_score, 56.67);
        assert_eq!(entry.total_sessions, 6);
        assert_eq!(entry.scores_history, vec![40.0, 42.0, 41.0, 70.0, 72.0, 75.0]);
    }

    #[test]
    fn test_short_history_is_insufficient() {
        let entry = analyze_skill(&series(&[60.0, 90.0])).unwrap();
        assert_eq!(entry.trend, Trend::InsufficientData);
        assert_eq!(entry.improvement, 0.0);
        assert_eq!(entry.average_score, 75.0);
    }

    #[test]
    fn test_declining_and_stable() {
        let (trend, change) = score_trend(&[80.0, 80.0, 80.0, 70.0, 70.0, 70.0]);
        assert_eq!(trend, Trend::Declining);
        assert!((change + 10.0).abs() < 1e-9);
        assert_eq!(score_trend(&[70.0, 72.0, 74.0]).0, Trend::Stable);
    }

    #[test]
    fn test_small_drop_with_overlapping_windows_is_stable() {
        // Windows share 80 and 80, so the drop is only 3.33 points.
        let (trend, change) = score_trend(&[80.0, 80.0, 80.0, 70.0]);
        assert_eq!(trend, Trend::Stable);
        assert!((change + 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold is not movement.
        assert_eq!(score_trend(&[60.0, 60.0, 60.0, 65.0, 65.0, 65.0]).0, Trend::Stable);
    }

    #[test]
    fn test_overlapping_windows() {
        // With four scores the windows share the middle two.
        let (trend, change) = score_trend(&[50.0, 60.0, 60.0, 80.0]);
        assert_eq!(trend, Trend::Improving);
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_keeps_key_order_and_skips_empty() {
        let mut history = IndexMap::new();
        history.insert("technical_knowledge".to_string(), series(&[70.0]));
        history.insert("communication".to_string(), Vec::new());
        history.insert("clarity".to_string(), series(&[50.0, 55.0]));

        let breakdown = analyze(&history);
        let keys: Vec<&str> = breakdown.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["technical_knowledge", "clarity"]);
    }
}

//! Multi-session progress dashboard.
//!
//! Builds the dashboard payload from a user's stored interview records:
//! score trends, recent averages, per-skill breakdown and insights.

use super::aggregator::delivery_scores;
use super::insights::summarize;
use super::stats::{mean, round_to};
use super::trends::analyze;
use crate::error::AnalyticsError;
use crate::models::{
    InterviewRecord, ProgressDashboard, RecentPerformance, ScorePoint, Statistics, TrendPoint,
    VerbalMetrics,
};
use indexmap::IndexMap;
use tracing::debug;

/// Skill keys in dashboard order.
pub const SKILL_KEYS: [&str; 6] = [
    "communication",
    "technical_knowledge",
    "clarity",
    "confidence",
    "filler_words",
    "speaking_speed",
];

const IDEAL_WPM: f64 = 140.0;

/// Mean of two verbal sub-scores, when both exist and at least one is positive.
fn paired(first: Option<f64>, second: Option<f64>) -> Option<f64> {
    match (first, second) {
        (Some(a), Some(b)) if a > 0.0 || b > 0.0 => Some((a + b) / 2.0),
        _ => None,
    }
}

/// Skill scores contributed by one record, in [`SKILL_KEYS`] order.
pub fn skill_scores(record: &InterviewRecord) -> [Option<f64>; 6] {
    let metrics: Option<&VerbalMetrics> = record.verbal.as_ref().map(|v| &v.metrics);
    let verbal = |a: fn(&VerbalMetrics) -> Option<f64>, b: fn(&VerbalMetrics) -> Option<f64>| {
        metrics.and_then(|m| paired(a(m), b(m)))
    };

    let non_verbal = record.non_verbal.as_ref();
    let confidence = record
        .delivery_confidence
        .or_else(|| non_verbal.map(|nv| delivery_scores(nv).overall_confidence));
    let filler_words = non_verbal.map(|nv| (100.0 - nv.filler_percentage * 10.0).max(0.0));
    let speaking_speed = non_verbal
        .filter(|nv| nv.total_time > 0.0)
        .map(|nv| {
            let wpm = nv.total_words as f64 / nv.total_time * 60.0;
            (100.0 - (wpm - IDEAL_WPM).abs() / 2.0).max(0.0)
        });

    [
        verbal(
            VerbalMetrics::response_structure,
            VerbalMetrics::vocabulary_richness,
        ),
        verbal(
            VerbalMetrics::domain_knowledge,
            VerbalMetrics::concepts_understanding,
        ),
        verbal(
            VerbalMetrics::answer_correctness,
            VerbalMetrics::depth_of_explanation,
        ),
        confidence,
        filler_words,
        speaking_speed,
    ]
}

/// Chronological per-skill score series. Skills without data are omitted.
pub fn skill_history(records: &[InterviewRecord]) -> IndexMap<String, Vec<ScorePoint>> {
    let mut history: IndexMap<String, Vec<ScorePoint>> = SKILL_KEYS
        .iter()
        .map(|key| (key.to_string(), Vec::new()))
        .collect();

    for record in records {
        for (key, score) in SKILL_KEYS.iter().zip(skill_scores(record)) {
            if let (Some(score), Some(series)) = (score, history.get_mut(*key)) {
                series.push(ScorePoint {
                    timestamp: record.created_at,
                    score,
                });
            }
        }
    }

    history.retain(|_, series| !series.is_empty());
    history
}

fn trend_point(record: &InterviewRecord, overall_score: f64) -> TrendPoint {
    TrendPoint {
        date: record.created_at,
        overall_score,
        verbal_score: record.verbal_score.unwrap_or(0.0),
        nonverbal_score: record.nonverbal_score.unwrap_or(0.0),
        interview_type: record
            .interview_type
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        role: record.role.clone().unwrap_or_default(),
    }
}

/// Mean of the non-zero values, rounded to 2 decimals; 0 when none.
fn nonzero_average<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let values: Vec<f64> = values.into_iter().filter(|v| *v != 0.0).collect();
    mean(&values).map(|m| round_to(m, 2)).unwrap_or(0.0)
}

fn recent_performance(trends: &[TrendPoint], window: usize) -> RecentPerformance {
    let recent = &trends[trends.len().saturating_sub(window)..];
    RecentPerformance {
        average_overall: nonzero_average(recent.iter().map(|t| t.overall_score)),
        average_verbal: nonzero_average(recent.iter().map(|t| t.verbal_score)),
        average_nonverbal: nonzero_average(recent.iter().map(|t| t.nonverbal_score)),
        recent_interviews: recent.to_vec(),
    }
}

fn statistics(records: &[InterviewRecord]) -> Statistics {
    let scores: Vec<f64> = records
        .iter()
        .filter_map(|r| r.overall_score)
        .filter(|s| *s != 0.0)
        .collect();
    let best = scores.iter().copied().reduce(f64::max).unwrap_or(0.0);

    Statistics {
        best_score: round_to(best, 2),
        average_score: mean(&scores).map(|m| round_to(m, 2)).unwrap_or(0.0),
        total_questions_answered: records.iter().map(|r| r.question_count).sum(),
    }
}

/// Build the progress dashboard for a user's interview records.
///
/// Records are ordered by creation time (undated first, input order kept
/// for ties). `recent_window` sets how many of the latest scored sessions
/// feed the recent averages.
pub fn build_dashboard(
    records: &[InterviewRecord],
    recent_window: usize,
) -> Result<ProgressDashboard, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::DataUnavailable(
            "no interviews found; complete some interviews to see your progress".to_string(),
        ));
    }

    let mut ordered: Vec<&InterviewRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.created_at);
    let ordered: Vec<InterviewRecord> = ordered.into_iter().cloned().collect();

    let trends: Vec<TrendPoint> = ordered
        .iter()
        .filter_map(|r| r.overall_score.map(|score| trend_point(r, score)))
        .collect();

    let history = skill_history(&ordered);
    let skill_breakdown = analyze(&history);
    let statistics = statistics(&ordered);
    let recent_performance = recent_performance(&trends, recent_window);
    let (insights, next_steps) =
        summarize(&statistics, &skill_breakdown, &trends, ordered.len());

    debug!(
        "Dashboard: {} interviews, {} trend points, {} skills, {} insights",
        ordered.len(),
        trends.len(),
        skill_breakdown.len(),
        insights.len()
    );

    Ok(ProgressDashboard {
        total_interviews: ordered.len(),
        trends,
        recent_performance,
        skill_breakdown,
        statistics,
        insights,
        next_steps,
    })
}

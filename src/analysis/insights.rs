//! Rule-based dashboard insights and next steps.

use super::stats::mean;
use super::trends::{SKILL_TREND_THRESHOLD, TREND_WINDOW};
use crate::models::{
    Insight, InsightColor, InsightKind, NextStep, NextSteps, SkillBreakdownEntry, Statistics,
    Trend, TrendPoint,
};
use indexmap::IndexMap;

/// Fewer interviews than this triggers the practice nudge.
const PRACTICE_NUDGE_BELOW: usize = 5;
/// Skills below this average become next steps.
const NEXT_STEP_BELOW: f64 = 70.0;
const NEXT_STEP_TARGET: f64 = 75.0;
const STRONG_SKILL: f64 = 75.0;
const WEAK_SKILL: f64 = 60.0;
/// Names listed in the strengths and focus insights.
const NAMED_SKILLS_CAP: usize = 3;

const ON_TRACK_MESSAGE: &str =
    "Great job! All your skills are performing well. Keep practicing to maintain excellence! 🎉";

fn insight(kind: InsightKind, title: &str, message: String, color: InsightColor) -> Insight {
    Insight {
        kind,
        title: title.to_string(),
        message,
        color,
    }
}

/// `technical_knowledge` -> `technical knowledge`
fn display_name(skill: &str) -> String {
    skill.replace('_', " ")
}

/// `technical_knowledge` -> `Technical knowledge`
fn title_name(skill: &str) -> String {
    let name = display_name(skill);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

fn skills_where<F>(breakdown: &IndexMap<String, SkillBreakdownEntry>, predicate: F) -> Vec<String>
where
    F: Fn(&SkillBreakdownEntry) -> bool,
{
    breakdown
        .iter()
        .filter(|(_, entry)| predicate(entry))
        .map(|(skill, _)| display_name(skill))
        .collect()
}

fn overall_insight(average: f64) -> Insight {
    if average >= 75.0 {
        insight(
            InsightKind::Success,
            "Excellent Performance",
            format!("Your average score of {:.1}% shows strong interview skills!", average),
            InsightColor::Green,
        )
    } else if average >= 60.0 {
        insight(
            InsightKind::Info,
            "Good Progress",
            format!("You're doing well with {:.1}% average. Keep practicing!", average),
            InsightColor::Blue,
        )
    } else {
        insight(
            InsightKind::Warning,
            "Room for Growth",
            format!(
                "Your average of {:.1}% shows potential. Focus on consistent practice!",
                average
            ),
            InsightColor::Yellow,
        )
    }
}

fn short_term_insight(trends: &[TrendPoint]) -> Option<Insight> {
    if trends.len() < TREND_WINDOW {
        return None;
    }
    let scores: Vec<f64> = trends.iter().map(|t| t.overall_score).collect();
    let old = mean(&scores[..TREND_WINDOW])?;
    let recent = mean(&scores[scores.len() - TREND_WINDOW..])?;
    let change = recent - old;

    if change > SKILL_TREND_THRESHOLD {
        Some(insight(
            InsightKind::Success,
            "Strong Improvement",
            format!("You've improved by {:.1}% in your recent interviews!", change),
            InsightColor::Green,
        ))
    } else if change < -SKILL_TREND_THRESHOLD {
        Some(insight(
            InsightKind::Warning,
            "Performance Dip",
            format!(
                "Recent scores dropped by {:.1}%. Take a break and refocus!",
                change.abs()
            ),
            InsightColor::Yellow,
        ))
    } else {
        None
    }
}

/// Insights in evaluation order: overall, short-term trend, skills, volume.
pub fn generate_insights(
    statistics: &Statistics,
    skill_breakdown: &IndexMap<String, SkillBreakdownEntry>,
    trends: &[TrendPoint],
    total_interviews: usize,
) -> Vec<Insight> {
    let mut insights = vec![overall_insight(statistics.average_score)];
    insights.extend(short_term_insight(trends));

    let improving = skills_where(skill_breakdown, |e| e.trend == Trend::Improving);
    let declining = skills_where(skill_breakdown, |e| e.trend == Trend::Declining);
    let strong = skills_where(skill_breakdown, |e| e.average_score >= STRONG_SKILL);
    let weak = skills_where(skill_breakdown, |e| e.average_score < WEAK_SKILL);
    let capped = |names: &[String]| names[..names.len().min(NAMED_SKILLS_CAP)].join(", ");

    if !improving.is_empty() {
        insights.push(insight(
            InsightKind::Success,
            "Skills Improving",
            format!(
                "Great job! These skills are trending up: {}",
                improving.join(", ")
            ),
            InsightColor::Green,
        ));
    }
    if !strong.is_empty() {
        insights.push(insight(
            InsightKind::Success,
            "Your Strengths",
            format!("You excel in: {}", capped(&strong)),
            InsightColor::Green,
        ));
    }
    if !weak.is_empty() {
        insights.push(insight(
            InsightKind::Tip,
            "Focus Areas",
            format!("Practice more on: {}", capped(&weak)),
            InsightColor::Purple,
        ));
    }
    if !declining.is_empty() {
        insights.push(insight(
            InsightKind::Warning,
            "Needs Attention",
            format!("These skills need focus: {}", declining.join(", ")),
            InsightColor::Orange,
        ));
    }

    if total_interviews < PRACTICE_NUDGE_BELOW {
        insights.push(insight(
            InsightKind::Tip,
            "Practice More",
            "Complete at least 10 interviews to get comprehensive analytics and better insights!"
                .to_string(),
            InsightColor::Blue,
        ));
    }

    insights
}

/// Up to three skills below 70, in key order, or a congratulation.
pub fn next_steps(skill_breakdown: &IndexMap<String, SkillBreakdownEntry>) -> NextSteps {
    let steps: Vec<NextStep> = skill_breakdown
        .iter()
        .filter(|(_, entry)| entry.average_score < NEXT_STEP_BELOW)
        .take(NAMED_SKILLS_CAP)
        .map(|(skill, entry)| NextStep {
            skill: title_name(skill),
            current_score: entry.average_score,
            target_score: NEXT_STEP_TARGET,
        })
        .collect();

    if steps.is_empty() {
        NextSteps::OnTrack {
            message: ON_TRACK_MESSAGE.to_string(),
        }
    } else {
        NextSteps::Focus { steps }
    }
}

/// Everything the dashboard shows besides the raw numbers.
pub fn summarize(
    statistics: &Statistics,
    skill_breakdown: &IndexMap<String, SkillBreakdownEntry>,
    trends: &[TrendPoint],
    total_interviews: usize,
) -> (Vec<Insight>, NextSteps) {
    (
        generate_insights(statistics, skill_breakdown, trends, total_interviews),
        next_steps(skill_breakdown),
    )
}

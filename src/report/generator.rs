//! Markdown and JSON report generation.
//!
//! This module renders session and progress reports from the analysis
//! results.

use crate::config::ReportConfig;
use crate::models::{
    ActionItem, AggregatedAudio, ChartPoint, CorrelationResult, DeliveryInsights,
    DeliveryScores, ImpactAnalysis, Insight, NextSteps, NonVerbalAnalytics, OverallAssessment, ProgressDashboard, ProgressReport,
    ReportMetadata, SessionReport, SkillBreakdownEntry, TrendPoint,
};
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

/// Generate a complete Markdown report for one session.
pub fn generate_markdown_session(report: &SessionReport, config: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# SkillEdge Session Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));
    if let Some(ref session_id) = report.session_id {
        output.push_str(&format!("- **Session:** `{}`\n\n", session_id));
    }

    if let Some(ref assessment) = report.assessment {
        output.push_str(&generate_assessment_section(assessment));
    }

    output.push_str(&generate_delivery_section(
        &report.non_verbal,
        &report.delivery,
        report.non_verbal_score,
        config.max_filler_terms,
    ));
    output.push_str(&generate_delivery_insights_section(&report.delivery_insights));
    output.push_str(&generate_impact_section(&report.impact));

    if config.include_audio {
        if let Some(ref audio) = report.non_verbal.audio_metrics {
            output.push_str(&generate_audio_section(audio));
        }
    }

    match report.correlation {
        Some(ref correlation) => {
            output.push_str(&generate_correlation_section(correlation));
            if config.include_chart_data {
                output.push_str(&generate_chart_section(&report.chart));
            }
        }
        None => {
            output.push_str("## Content & Delivery\n\n");
            output.push_str(
                "No verbal analysis was supplied, so content and delivery were not compared.\n\n",
            );
        }
    }

    output.push_str(&generate_action_items_section(&report.action_items));
    output.push_str(&generate_recommendations_section(
        &report.verbal_recommendations,
    ));

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate a complete Markdown progress report.
pub fn generate_markdown_progress(report: &ProgressReport, config: &ReportConfig) -> String {
    let dashboard = &report.dashboard;
    let mut output = String::new();

    output.push_str("# SkillEdge Progress Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_statistics_section(dashboard));
    output.push_str(&generate_recent_section(dashboard));
    output.push_str(&generate_trends_section(&dashboard.trends));
    output.push_str(&generate_skills_section(&dashboard.skill_breakdown));
    output.push_str(&generate_insights_section(&dashboard.insights));

    if config.include_next_steps {
        output.push_str(&generate_next_steps_section(&dashboard.next_steps));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Tool Version:** {}\n", metadata.tool_version));
    section.push('\n');

    section
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|item| format!("- {}\n", item)).collect()
}

fn generate_assessment_section(assessment: &OverallAssessment) -> String {
    let mut section = String::new();

    section.push_str("## Overall Assessment\n\n");
    section.push_str(&format!(
        "**Score:** {}/100 | **Readiness:** {}\n\n",
        assessment.overall_score, assessment.readiness
    ));
    section.push_str(&format!("{}\n\n", assessment.summary));

    if !assessment.strengths.is_empty() {
        section.push_str("### Strengths\n\n");
        section.push_str(&bullet_list(&assessment.strengths));
        section.push('\n');
    }
    if !assessment.improvements.is_empty() {
        section.push_str("### Areas for Improvement\n\n");
        section.push_str(&bullet_list(&assessment.improvements));
        section.push('\n');
    }

    section
}

fn generate_delivery_section(
    analytics: &NonVerbalAnalytics,
    delivery: &DeliveryScores,
    non_verbal_score: f64,
    max_filler_terms: usize,
) -> String {
    let mut section = String::new();

    section.push_str("## Delivery\n\n");
    section.push_str("| Metric | Value |\n");
    section.push_str("|:---|:---:|\n");
    section.push_str(&format!("| Questions | {} |\n", analytics.question_count));
    section.push_str(&format!("| Words | {} |\n", analytics.total_words));
    section.push_str(&format!("| Speaking Time | {:.0}s |\n", analytics.total_time));
    section.push_str(&format!(
        "| Words per Minute | {} ({}) |\n",
        analytics.words_per_minute, analytics.speech_rate.label
    ));
    section.push_str(&format!(
        "| Filler Words | {} ({}%) |\n",
        analytics.filler_words, analytics.filler_percentage
    ));
    section.push_str(&format!("| Non-Verbal Score | {} |\n\n", non_verbal_score));

    if !analytics.speech_rate.description.is_empty() {
        section.push_str(&format!("{}\n\n", analytics.speech_rate.description));
    }

    section.push_str("### Delivery Scores\n\n");
    section.push_str("| Fluency | Speech Rate | Voice Modulation | **Confidence** |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        delivery.fluency, delivery.speech_rate, delivery.voice_modulation, delivery.overall_confidence
    ));

    if !analytics.detected_filler_words.is_empty() {
        section.push_str("### Filler Words\n\n");
        section.push_str("| Term | Count |\n");
        section.push_str("|:---|:---:|\n");

        let mut terms: Vec<_> = analytics.detected_filler_words.iter().collect();
        terms.sort_by_key(|(_, count)| std::cmp::Reverse(**count));

        for (term, count) in terms.into_iter().take(max_filler_terms) {
            section.push_str(&format!("| {} | {} |\n", term, count));
        }
        section.push('\n');
    }

    let pauses = &analytics.pause_analysis;
    section.push_str(&format!("### Pause Pattern: {}\n\n", pauses.pattern));
    section.push_str(&format!("{}\n\n", pauses.description));
    section.push_str(&format!("> 💡 **Suggestion:** {}\n\n", pauses.recommendation));

    section
}

fn generate_delivery_insights_section(insights: &DeliveryInsights) -> String {
    let mut section = String::new();

    if !insights.strengths.is_empty() {
        section.push_str("### Delivery Strengths\n\n");
        section.push_str(&bullet_list(&insights.strengths));
        section.push('\n');
    }
    if !insights.improvements.is_empty() {
        section.push_str("### Delivery Improvements\n\n");
        section.push_str(&bullet_list(&insights.improvements));
        section.push('\n');
    }
    if !insights.feedback.is_empty() {
        section.push_str(&format!("{}\n\n", insights.feedback));
    }

    section
}

fn generate_impact_section(impact: &ImpactAnalysis) -> String {
    if impact.factors.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Delivery Impact\n\n");
    section.push_str("| Factor | Impact | Level | Effect |\n");
    section.push_str("|:---|:---:|:---|:---|\n");
    for factor in &impact.factors {
        section.push_str(&format!(
            "| {} | {:+} | {} | {} |\n",
            factor.name, factor.score, factor.level, factor.impact
        ));
    }
    section.push('\n');

    section.push_str(&format!(
        "**Net Impact:** {:+} (positive +{}, negative -{})\n\n",
        impact.net_performance_impact, impact.positive_total, impact.negative_total
    ));

    if !impact.areas_for_improvement.is_empty() {
        section.push_str(&format!(
            "**Focus Areas:** {}\n\n",
            impact.areas_for_improvement.join(", ")
        ));
    }

    let issues: Vec<String> = impact
        .factors
        .iter()
        .flat_map(|f| f.issues.iter().cloned())
        .collect();
    if !issues.is_empty() {
        section.push_str("### Fluency Issues\n\n");
        section.push_str(&bullet_list(&issues));
        section.push('\n');
    }

    section
}

fn generate_audio_section(audio: &AggregatedAudio) -> String {
    let mut section = String::new();

    section.push_str("## Voice Analysis\n\n");
    section.push_str("| Aspect | Summary |\n");
    section.push_str("|:---|:---|\n");
    section.push_str(&format!(
        "| Pitch | {:.1} Hz avg, {} Hz range, {} level, {} trend, consistency {:.2} |\n",
        audio.pitch.average,
        audio.pitch.range,
        audio.pitch.predominant_level,
        audio.pitch.predominant_trend,
        audio.pitch.consistency
    ));
    section.push_str(&format!(
        "| Tone | {} ({} distinct), {} quality, expressiveness {:.2}, warmth {:.2}, clarity {:.2} |\n",
        audio.tone.predominant_emotion,
        audio.tone.emotional_variety,
        audio.tone.predominant_quality,
        audio.tone.average_expressiveness,
        audio.tone.average_warmth,
        audio.tone.average_clarity
    ));
    section.push_str(&format!(
        "| Energy | {} volume, energy {:.2}, brightness {:.2}, consistency {:.2} |\n",
        audio.energy.predominant_volume,
        audio.energy.average_energy,
        audio.energy.average_brightness,
        audio.energy.volume_consistency
    ));
    section.push_str(&format!(
        "| Voice Quality | {}, score {:.2}, breathiness {:.2}, hoarseness {:.2}, strain {:.2} |\n",
        audio.voice_quality.overall,
        audio.voice_quality.average_score,
        audio.voice_quality.average_breathiness,
        audio.voice_quality.average_hoarseness,
        audio.voice_quality.average_strain
    ));
    section.push_str(&format!(
        "| Confidence | {:.2} avg, consistency {:.2}, {} {} |\n\n",
        audio.confidence.average,
        audio.confidence.consistency,
        audio.confidence.trend.emoji(),
        audio.confidence.trend
    ));

    section
}

fn generate_correlation_section(correlation: &CorrelationResult) -> String {
    let mut section = String::new();
    let overall = &correlation.overall_correlation;

    section.push_str("## Content & Delivery\n\n");
    section.push_str(&format!(
        "**Correlation Strength:** {}% ({})\n\n",
        overall.correlation_strength, overall.alignment
    ));
    section.push_str(&format!(
        "{} (verbal {}, non-verbal {}).\n\n",
        overall.description, overall.verbal_score, overall.non_verbal_score
    ));

    let specific = &correlation.specific_correlations;
    section.push_str("| Correlation | Score | Meaning |\n");
    section.push_str("|:---|:---:|:---|\n");
    for (name, entry) in [
        ("Knowledge to Confidence", &specific.knowledge_to_confidence),
        ("Structure to Fluency", &specific.structure_to_fluency),
        ("Vocabulary to Clarity", &specific.vocabulary_to_clarity),
    ] {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            name, entry.score, entry.description
        ));
    }
    section.push('\n');

    if !correlation.performance_gaps.is_empty() {
        section.push_str("### Performance Gaps\n\n");
        for gap in &correlation.performance_gaps {
            section.push_str(&format!(
                "- **{}** ({} points, {} priority): {}\n",
                gap.area, gap.gap, gap.priority, gap.recommendation
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_chart_section(chart: &[ChartPoint]) -> String {
    if chart.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("### Chart Data\n\n");
    section.push_str("| Label | Value |\n");
    section.push_str("|:---|:---:|\n");
    for point in chart {
        section.push_str(&format!("| {} | {} |\n", point.label, point.value));
    }
    section.push('\n');

    section
}

fn generate_action_items_section(items: &[ActionItem]) -> String {
    let mut section = String::new();

    section.push_str("## Action Items\n\n");
    if items.is_empty() {
        section.push_str("No action items. Keep up the good work! 🎉\n\n");
        return section;
    }

    for item in items {
        section.push_str(&format!(
            "- {} **{}** [{}] {}\n",
            item.priority.emoji(),
            item.priority,
            item.category,
            item.item
        ));
    }
    section.push('\n');

    section
}

/// Generate the recommendations section.
fn generate_recommendations_section(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recommendations\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    section.push('\n');

    section
}

fn generate_statistics_section(dashboard: &ProgressDashboard) -> String {
    let stats = &dashboard.statistics;
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Interviews | Best Score | Average Score | Questions Answered |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        dashboard.total_interviews,
        stats.best_score,
        stats.average_score,
        stats.total_questions_answered
    ));

    section
}

fn generate_recent_section(dashboard: &ProgressDashboard) -> String {
    let recent = &dashboard.recent_performance;
    let mut section = String::new();

    section.push_str("## Recent Performance\n\n");
    section.push_str(&format!(
        "Last {} interviews: overall {}, verbal {}, non-verbal {}\n\n",
        recent.recent_interviews.len(),
        recent.average_overall,
        recent.average_verbal,
        recent.average_nonverbal
    ));

    section
}

fn generate_trends_section(trends: &[TrendPoint]) -> String {
    let mut section = String::new();

    section.push_str("## Score Trends\n\n");
    if trends.is_empty() {
        section.push_str("No scored interviews yet.\n\n");
        return section;
    }

    section.push_str("| Date | Type | Role | Overall | Verbal | Non-Verbal |\n");
    section.push_str("|:---|:---|:---|:---:|:---:|:---:|\n");
    for point in trends {
        let date = point
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            date,
            point.interview_type,
            point.role,
            point.overall_score,
            point.verbal_score,
            point.nonverbal_score
        ));
    }
    section.push('\n');

    section
}

fn generate_skills_section(skills: &IndexMap<String, SkillBreakdownEntry>) -> String {
    let mut section = String::new();

    section.push_str("## Skill Breakdown\n\n");
    if skills.is_empty() {
        section.push_str("Not enough data to break down skills yet.\n\n");
        return section;
    }

    section.push_str("| Skill | Average | Trend | Change | Sessions | History |\n");
    section.push_str("|:---|:---:|:---|:---:|:---:|:---|\n");
    for (skill, entry) in skills {
        let history: Vec<String> = entry
            .scores_history
            .iter()
            .map(|s| format!("{:.0}", s))
            .collect();
        section.push_str(&format!(
            "| {} | {} | {} {} | {:+} | {} | {} |\n",
            skill.replace('_', " "),
            entry.average_score,
            entry.trend.emoji(),
            entry.trend,
            entry.improvement,
            entry.total_sessions,
            history.join(" → ")
        ));
    }
    section.push('\n');

    section
}

fn generate_insights_section(insights: &[Insight]) -> String {
    let mut section = String::new();

    section.push_str("## Insights\n\n");
    for insight in insights {
        section.push_str(&format!(
            "- {} **{}:** {}\n",
            insight.kind.emoji(),
            insight.title,
            insight.message
        ));
    }
    section.push('\n');

    section
}

fn generate_next_steps_section(next_steps: &NextSteps) -> String {
    let mut section = String::new();

    section.push_str("## Next Steps\n\n");
    match next_steps {
        NextSteps::Focus { steps } => {
            for step in steps {
                section.push_str(&format!(
                    "- **{}**: current {:.1}% | target {}%+\n",
                    step.skill, step.current_score, step.target_score
                ));
            }
        }
        NextSteps::OnTrack { message } => {
            section.push_str(message);
            section.push('\n');
        }
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by SkillEdge Analytics*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        analyze_impact, assess, build_dashboard, correlate, delivery_insights, delivery_scores,
        format_correlation_data, generate_action_items, FillerLexicon, NonVerbalAggregator,
    };
    use crate::models::{AnswerTiming, InterviewRecord};
    use chrono::{TimeZone, Utc};

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            source: "session.json".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            tool_version: "1.0.0".to_string(),
        }
    }

    fn create_session_report(with_verbal: bool) -> SessionReport {
        let aggregator = NonVerbalAggregator::new(FillerLexicon::standard().unwrap());
        let non_verbal = aggregator
            .aggregate(
                &["um, so I would basically shard the table".to_string()],
                &[Some(AnswerTiming {
                    time_used: Some(5.0),
                    words_spoken: 8,
                })],
                &[],
            )
            .unwrap();
        let delivery = delivery_scores(&non_verbal);
        let score = delivery.overall_confidence;

        let (assessment, correlation, action_items, chart) = if with_verbal {
            let correlation = correlate(85.0, score, None, Some(&non_verbal));
            (
                Some(assess(85.0, score)),
                Some(correlation.clone()),
                generate_action_items(&correlation),
                format_correlation_data(&correlation),
            )
        } else {
            (None, None, Vec::new(), Vec::new())
        };

        SessionReport {
            metadata: metadata(),
            session_id: Some("abc".to_string()),
            delivery_insights: delivery_insights(&non_verbal, &delivery),
            impact: analyze_impact(&non_verbal, &delivery),
            non_verbal,
            delivery,
            non_verbal_score: score,
            verbal_score: with_verbal.then_some(85.0),
            assessment,
            correlation,
            action_items,
            chart,
            verbal_recommendations: vec!["Quantify your impact".to_string()],
        }
    }

    #[test]
    fn test_generate_markdown_session() {
        let report = create_session_report(true);
        let markdown = generate_markdown_session(&report, &ReportConfig::default());

        assert!(markdown.contains("# SkillEdge Session Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("2024-03-01 12:00:00 UTC"));
        assert!(markdown.contains("## Overall Assessment"));
        assert!(markdown.contains("## Delivery"));
        assert!(markdown.contains("| basically | 1 |"));
        assert!(markdown.contains("### Pause Pattern: Too Many Long Pauses"));
        assert!(markdown.contains("## Content & Delivery"));
        assert!(markdown.contains("### Chart Data"));
        assert!(markdown.contains("Work on communication delivery and confidence"));
        assert!(markdown.contains("1. Quantify your impact"));
    }

    #[test]
    fn test_session_delivery_insights_and_impact() {
        let report = create_session_report(false);
        let markdown = generate_markdown_session(&report, &ReportConfig::default());

        assert!(!markdown.contains("### Delivery Strengths"));
        assert!(markdown.contains("### Delivery Improvements"));
        assert!(markdown.contains("- Reduce filler words usage (currently 37.5%)"));
        assert!(markdown.contains("Filler words usage: 37.5%. Pause pattern: Too Many Long Pauses."));

        assert!(markdown.contains("## Delivery Impact"));
        assert!(markdown.contains("| Speech Rate | -10 | negative |"));
        assert!(markdown.contains("| Filler Words | -15 | negative |"));
        assert!(markdown.contains("| Confidence | +5 | misaligned |"));
        assert!(markdown.contains("**Net Impact:** -40 (positive +5, negative -45)"));
        assert!(markdown.contains("**Focus Areas:** Filler Words, Speech Rate, Pause Pattern, Fluency"));
        assert!(markdown.contains("### Fluency Issues"));
        assert!(markdown.contains("- Speaking too slow"));
    }

    #[test]
    fn test_session_without_verbal() {
        let report = create_session_report(false);
        let markdown = generate_markdown_session(&report, &ReportConfig::default());

        assert!(!markdown.contains("## Overall Assessment"));
        assert!(markdown.contains("No verbal analysis was supplied"));
        assert!(markdown.contains("No action items"));
    }

    #[test]
    fn test_report_config_trims_sections() {
        let report = create_session_report(true);
        let config = ReportConfig {
            include_chart_data: false,
            max_filler_terms: 1,
            ..ReportConfig::default()
        };
        let markdown = generate_markdown_session(&report, &config);

        assert!(!markdown.contains("### Chart Data"));
        let listed = ["| um |", "| so |", "| basically |"]
            .iter()
            .filter(|row| markdown.contains(*row))
            .count();
        assert_eq!(listed, 1);
    }

    #[test]
    fn test_generate_markdown_progress() {
        let records: Vec<InterviewRecord> = (1..=3)
            .map(|day| InterviewRecord {
                created_at: Some(Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()),
                interview_type: Some("Behavioral".to_string()),
                overall_score: Some(50.0 + day as f64 * 10.0),
                delivery_confidence: Some(60.0),
                ..InterviewRecord::default()
            })
            .collect();
        let report = ProgressReport {
            metadata: metadata(),
            dashboard: build_dashboard(&records, 5).unwrap(),
        };

        let markdown = generate_markdown_progress(&report, &ReportConfig::default());
        assert!(markdown.contains("# SkillEdge Progress Report"));
        assert!(markdown.contains("| 2024-03-02 | Behavioral |"));
        assert!(markdown.contains("| confidence | 60 |"));
        assert!(markdown.contains("**Practice More:**"));
        assert!(markdown.contains("## Next Steps"));
        assert!(markdown.contains("**Confidence**: current 60.0% | target 75%+"));

        let config = ReportConfig {
            include_next_steps: false,
            ..ReportConfig::default()
        };
        assert!(!generate_markdown_progress(&report, &config).contains("## Next Steps"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_session_report(true);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"non_verbal\""));
        assert!(json.contains("\"wordsPerMinute\""));
        assert!(json.contains("\"overallCorrelation\""));
        assert!(json.contains("\"netPerformanceImpact\": -40"));
        assert!(json.contains("\"delivery_insights\""));
        assert!(json.contains("\"generated_at\": \"2024-03-01T12:00:00Z\""));
    }
}

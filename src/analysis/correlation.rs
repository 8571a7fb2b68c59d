//! Correlation between content (verbal) and delivery (non-verbal) scores.

use crate::models::{
    ActionCategory, ActionItem, Alignment, ChartPoint, CorrelationResult, DeliveryScores,
    ImpactAnalysis, ImpactFactor, NonVerbalAnalytics, OverallAssessment, OverallCorrelation,
    PausePattern, PerformanceGap, Priority, Readiness, SpecificCorrelation, SpecificCorrelations,
    VerbalMetrics,
};

/// Score pairs within this distance are considered well aligned.
const CLOSE_DIFF: f64 = 15.0;
/// Beyond this distance the scores are badly out of balance.
const WIDE_DIFF: f64 = 30.0;
/// Asymmetry that opens a performance gap.
const GAP_THRESHOLD: f64 = 20.0;
/// Scores below this produce a high priority action item.
const ACTION_THRESHOLD: f64 = 70.0;

const DEFAULT_SPECIFIC_SCORE: f64 = 70.0;
const OPTIMAL_PACE_BONUS: f64 = 85.0;
const OFF_PACE_BONUS: f64 = 60.0;

fn correlation_strength(diff: f64) -> u32 {
    if diff <= CLOSE_DIFF {
        85
    } else if diff <= WIDE_DIFF {
        60
    } else {
        40
    }
}

fn strength_description(strength: u32) -> &'static str {
    if strength >= 80 {
        "Excellent alignment between content and delivery"
    } else if strength >= 60 {
        "Good balance with room for improvement"
    } else {
        "Significant gap between content and delivery skills"
    }
}

/// A usable sub-score: present and non-zero.
fn scored(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

fn structure_to_fluency(
    metrics: Option<&VerbalMetrics>,
    non_verbal: Option<&NonVerbalAnalytics>,
) -> f64 {
    let structure = scored(metrics.and_then(VerbalMetrics::response_structure));
    let wpm = non_verbal
        .map(|nv| nv.words_per_minute)
        .filter(|wpm| *wpm > 0);

    match (structure, wpm) {
        (Some(structure), Some(wpm)) => {
            let bonus = if (120..=160).contains(&wpm) {
                OPTIMAL_PACE_BONUS
            } else {
                OFF_PACE_BONUS
            };
            ((structure + bonus) / 2.0).round()
        }
        _ => DEFAULT_SPECIFIC_SCORE,
    }
}

/// Compare one session's verbal and non-verbal scores.
///
/// Sub-metrics are optional; absent values fall back to fixed defaults.
pub fn correlate(
    verbal_score: f64,
    non_verbal_score: f64,
    verbal_metrics: Option<&VerbalMetrics>,
    non_verbal: Option<&NonVerbalAnalytics>,
) -> CorrelationResult {
    let diff = (verbal_score - non_verbal_score).abs();
    let strength = correlation_strength(diff);
    let alignment = if verbal_score > non_verbal_score {
        Alignment::ContentStrong
    } else {
        Alignment::DeliveryStrong
    };

    let vocabulary = scored(verbal_metrics.and_then(VerbalMetrics::vocabulary_richness))
        .unwrap_or(DEFAULT_SPECIFIC_SCORE);

    let specific_correlations = SpecificCorrelations {
        knowledge_to_confidence: SpecificCorrelation {
            score: (100.0 - diff).round(),
            description: "How well your knowledge translates to confident delivery".to_string(),
        },
        structure_to_fluency: SpecificCorrelation {
            score: structure_to_fluency(verbal_metrics, non_verbal),
            description: "Alignment between answer structure and speech fluency".to_string(),
        },
        vocabulary_to_clarity: SpecificCorrelation {
            score: vocabulary,
            description: "Technical vocabulary usage and communication clarity".to_string(),
        },
    };

    let mut performance_gaps = Vec::new();
    if verbal_score > non_verbal_score + GAP_THRESHOLD {
        performance_gaps.push(PerformanceGap {
            area: "Delivery Enhancement".to_string(),
            gap: (verbal_score - non_verbal_score).round(),
            priority: "High".to_string(),
            recommendation: "Focus on improving non-verbal communication to match your strong technical knowledge".to_string(),
        });
    }
    if non_verbal_score > verbal_score + GAP_THRESHOLD {
        performance_gaps.push(PerformanceGap {
            area: "Knowledge Depth".to_string(),
            gap: (non_verbal_score - verbal_score).round(),
            priority: "High".to_string(),
            recommendation: "Strengthen technical knowledge to match your good presentation skills"
                .to_string(),
        });
    }

    CorrelationResult {
        overall_correlation: OverallCorrelation {
            correlation_strength: strength,
            alignment,
            description: strength_description(strength).to_string(),
            verbal_score,
            non_verbal_score,
        },
        specific_correlations,
        performance_gaps,
    }
}

/// Action items in rule order: verbal, non-verbal, then balance.
pub fn generate_action_items(correlation: &CorrelationResult) -> Vec<ActionItem> {
    let overall = &correlation.overall_correlation;
    let verbal = overall.verbal_score;
    let non_verbal = overall.non_verbal_score;

    let rules = [
        (
            verbal < ACTION_THRESHOLD,
            "Improve technical knowledge and domain expertise",
            Priority::High,
            ActionCategory::Verbal,
        ),
        (
            non_verbal < ACTION_THRESHOLD,
            "Work on communication delivery and confidence",
            Priority::High,
            ActionCategory::NonVerbal,
        ),
        (
            (verbal - non_verbal).abs() > WIDE_DIFF,
            "Balance content knowledge with presentation skills",
            Priority::Medium,
            ActionCategory::Overall,
        ),
    ];

    rules
        .into_iter()
        .filter(|(applies, ..)| *applies)
        .map(|(_, item, priority, category)| ActionItem {
            item: item.to_string(),
            priority,
            category,
        })
        .collect()
}

/// Flatten a correlation into a chart series. Pure projection.
pub fn format_correlation_data(correlation: &CorrelationResult) -> Vec<ChartPoint> {
    let specific = &correlation.specific_correlations;
    [
        (
            "Correlation Strength",
            f64::from(correlation.overall_correlation.correlation_strength),
        ),
        (
            "Knowledge to Confidence",
            specific.knowledge_to_confidence.score,
        ),
        ("Structure to Fluency", specific.structure_to_fluency.score),
        ("Vocabulary to Clarity", specific.vocabulary_to_clarity.score),
    ]
    .into_iter()
    .map(|(label, value)| ChartPoint {
        label: label.to_string(),
        value,
    })
    .collect()
}

fn readiness(overall: f64) -> Readiness {
    if overall >= 80.0 {
        Readiness::Excellent
    } else if overall >= 70.0 {
        Readiness::Ready
    } else if overall >= 50.0 {
        Readiness::NeedsImprovement
    } else {
        Readiness::NotReady
    }
}

/// Combined verdict for a session from its verbal and non-verbal scores.
pub fn assess(verbal_score: f64, non_verbal_score: f64) -> OverallAssessment {
    let overall_score = ((verbal_score + non_verbal_score) / 2.0).round();
    let readiness = readiness(overall_score);
    let diff = (verbal_score - non_verbal_score).abs();

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if verbal_score >= 80.0 {
        strengths.push("Excellent technical knowledge and domain expertise");
    } else if verbal_score >= 70.0 {
        strengths.push("Good understanding of concepts");
    } else {
        improvements.push("Strengthen technical knowledge and domain expertise");
    }

    if non_verbal_score >= 80.0 {
        strengths.push("Outstanding communication delivery and confidence");
    } else if non_verbal_score >= 70.0 {
        strengths.push("Good presentation skills");
    } else {
        improvements.push("Improve communication delivery and confidence");
    }

    if diff <= CLOSE_DIFF {
        strengths.push("Well-balanced content and delivery skills");
    } else if diff > WIDE_DIFF {
        improvements.push("Work on balancing content knowledge with presentation skills");
    }

    let verdict = match readiness {
        Readiness::Excellent => {
            "Excellent performance! You demonstrate strong technical knowledge and communication skills."
        }
        Readiness::Ready => "Good job! You are interview ready with minor areas for improvement.",
        Readiness::NeedsImprovement => "Keep practicing to improve your interview skills.",
        Readiness::NotReady => "Significant preparation needed before interviews.",
    };

    OverallAssessment {
        overall_score,
        readiness,
        strengths: strengths.into_iter().map(String::from).collect(),
        improvements: improvements.into_iter().map(String::from).collect(),
        summary: format!("Overall performance score: {}/100. {}", overall_score, verdict),
    }
}

/// Assumed rate when the session has no measurable pace.
const DEFAULT_IMPACT_WPM: u64 = 120;
/// Assumed audio confidence (0-1) without audio data.
const DEFAULT_IMPACT_CONFIDENCE: f64 = 0.5;
/// Assumed fluency without a delivery score.
const DEFAULT_IMPACT_FLUENCY: f64 = 70.0;

fn factor(name: &str, score: i32, level: &str, impact: &str, areas: &[&str]) -> ImpactFactor {
    ImpactFactor {
        name: name.to_string(),
        score,
        level: level.to_string(),
        impact: impact.to_string(),
        affected_areas: areas.iter().map(|a| a.to_string()).collect(),
        issues: Vec::new(),
    }
}

fn speech_rate_impact(wpm: u64) -> ImpactFactor {
    let (score, level) = if (120..=180).contains(&wpm) {
        (15, "positive")
    } else if (100..=200).contains(&wpm) {
        (5, "neutral")
    } else {
        (-10, "negative")
    };
    let (impact, areas): (&str, &[&str]) = if (120..=180).contains(&wpm) {
        ("Optimal speech rate enhances comprehension", &["clarity", "engagement"])
    } else if wpm > 180 {
        ("Fast speech may reduce clarity", &["clarity", "comprehension"])
    } else {
        ("Slow speech may lose listener attention", &["engagement", "confidence"])
    };
    factor("Speech Rate", score, level, impact, areas)
}

fn filler_impact(filler_percentage: f64) -> ImpactFactor {
    if filler_percentage <= 2.0 {
        factor(
            "Filler Words",
            10,
            "positive",
            "Minimal filler words show good preparation",
            &["professionalism"],
        )
    } else if filler_percentage <= 5.0 {
        factor("Filler Words", 0, "neutral", "Moderate filler word usage", &["clarity"])
    } else {
        factor(
            "Filler Words",
            -15,
            "negative",
            "High filler word usage affects professionalism",
            &["professionalism", "clarity", "confidence"],
        )
    }
}

fn pause_impact(pattern: PausePattern) -> ImpactFactor {
    match pattern {
        PausePattern::Balanced => factor(
            "Pause Pattern",
            10,
            "positive",
            "Well-timed pauses enhance delivery",
            &["clarity", "engagement"],
        ),
        PausePattern::TooManyLongPauses => factor(
            "Pause Pattern",
            -10,
            "negative",
            "Long pauses may indicate uncertainty",
            &["confidence", "flow"],
        ),
        PausePattern::RushedSpeech => factor(
            "Pause Pattern",
            -10,
            "negative",
            "Short pauses may rush the message",
            &["clarity", "comprehension"],
        ),
    }
}

fn confidence_impact(confidence: f64) -> ImpactFactor {
    let (score, impact) = if confidence >= 0.7 {
        (20, "High confidence supports strong performance")
    } else if confidence >= 0.5 {
        (5, "Moderate confidence with room for growth")
    } else {
        (-10, "Low confidence may undermine competence")
    };
    let (level, areas): (&str, &[&str]) = if confidence >= 0.6 {
        ("aligned", &["delivery", "presence"])
    } else {
        ("misaligned", &["confidence", "engagement"])
    };
    factor("Confidence", score, level, impact, areas)
}

fn fluency_impact(fluency: f64, non_verbal: &NonVerbalAnalytics, wpm: u64) -> ImpactFactor {
    let mut entry = if fluency >= 80.0 {
        factor(
            "Fluency",
            15,
            "excellent",
            "Excellent fluency enhances overall communication",
            &[],
        )
    } else if fluency >= 60.0 {
        factor(
            "Fluency",
            5,
            "good",
            "Good fluency with minor areas for improvement",
            &[],
        )
    } else {
        factor(
            "Fluency",
            -10,
            "needs improvement",
            "Fluency challenges may distract from content",
            &[],
        )
    };

    if fluency < 80.0 {
        let checks = [
            (non_verbal.filler_percentage > 5.0, "Excessive filler words"),
            (
                non_verbal.pause_analysis.pattern == PausePattern::TooManyLongPauses,
                "Pause timing issues",
            ),
            (wpm > 200, "Speaking too fast"),
            (wpm < 100, "Speaking too slow"),
        ];
        entry.issues = checks
            .into_iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, issue)| issue.to_string())
            .collect();
    }
    entry
}

/// How each delivery factor of a session moves overall performance.
///
/// Factors are speech rate, filler words, pause pattern, audio confidence
/// and fluency, in that order. Missing or zero inputs fall back to
/// neutral defaults.
pub fn analyze_impact(non_verbal: &NonVerbalAnalytics, delivery: &DeliveryScores) -> ImpactAnalysis {
    let wpm = Some(non_verbal.words_per_minute)
        .filter(|wpm| *wpm > 0)
        .unwrap_or(DEFAULT_IMPACT_WPM);
    let confidence = non_verbal
        .audio_metrics
        .as_ref()
        .map(|audio| audio.confidence.average)
        .filter(|c| *c > 0.0 && c.is_finite())
        .unwrap_or(DEFAULT_IMPACT_CONFIDENCE);
    let fluency = scored(Some(delivery.fluency)).unwrap_or(DEFAULT_IMPACT_FLUENCY);

    let factors = vec![
        speech_rate_impact(wpm),
        filler_impact(non_verbal.filler_percentage),
        pause_impact(non_verbal.pause_analysis.pattern),
        confidence_impact(confidence),
        fluency_impact(fluency, non_verbal, wpm),
    ];

    let positive: Vec<&ImpactFactor> = factors.iter().filter(|f| f.score > 0).collect();
    let mut negative: Vec<&ImpactFactor> = factors.iter().filter(|f| f.score < 0).collect();
    negative.sort_by_key(|f| f.score);

    let positive_total: i32 = positive.iter().map(|f| f.score).sum();
    let negative_total: i32 = negative.iter().map(|f| f.score).sum::<i32>().abs();

    ImpactAnalysis {
        positive_factors: positive.iter().map(|f| f.name.clone()).collect(),
        areas_for_improvement: negative.iter().map(|f| f.name.clone()).collect(),
        positive_total,
        negative_total,
        net_performance_impact: positive_total - negative_total,
        factors,
    }
}

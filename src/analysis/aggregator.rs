//! Non-verbal aggregation of a single interview session.
//!
//! This module reduces raw answers, per-answer timings and audio frames
//! into a [`NonVerbalAnalytics`] summary, and derives the delivery
//! sub-scores used as the session's non-verbal score.

use super::audio::aggregate_audio;
use super::stats::round_to;
use crate::error::AnalyticsError;
use crate::models::{
    AnswerTiming, AudioFrameMetric, DeliveryInsights, DeliveryScores, NonVerbalAnalytics,
    PauseAnalysis, PausePattern, SessionRecord, SpeechRate,
};
use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

/// Conversational hedges detected in answers.
pub const FILLER_WORDS: [&str; 14] = [
    "um",
    "uh",
    "like",
    "you know",
    "actually",
    "basically",
    "literally",
    "right",
    "so",
    "well",
    "i mean",
    "kind of",
    "sort of",
    "yeah",
];

/// Seconds assumed for an answer with no recorded time.
pub const DEFAULT_ANSWER_SECONDS: f64 = 60.0;

/// Below this per-answer rate the answer is dominated by long pauses.
const LONG_PAUSE_WPM: f64 = 100.0;
/// Above this per-answer rate the answer is rushed.
const RUSHED_WPM: f64 = 160.0;

const SLOW_PACE_WPM: u64 = 120;
const FAST_PACE_WPM: u64 = 160;

/// Compiled, case-insensitive whole-word matchers for filler terms.
#[derive(Debug, Clone)]
pub struct FillerLexicon {
    terms: Vec<(String, Regex)>,
}

impl FillerLexicon {
    /// The standard filler list followed by any extra terms.
    ///
    /// Extra terms are lowercased; duplicates and blanks are dropped.
    pub fn new<I, S>(extra_terms: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<(String, Regex)> = Vec::new();
        let standard = FILLER_WORDS.iter().map(|t| t.to_string());
        let extra = extra_terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase());

        for term in standard.chain(extra) {
            if term.is_empty() || terms.iter().any(|(existing, _)| *existing == term) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&term));
            let matcher = Regex::new(&pattern).map_err(|source| {
                AnalyticsError::InvalidFillerTerm {
                    term: term.clone(),
                    source,
                }
            })?;
            terms.push((term, matcher));
        }

        Ok(Self { terms })
    }

    pub fn standard() -> Result<Self, AnalyticsError> {
        Self::new(Vec::<String>::new())
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(term, _)| term.as_str())
    }

    /// Occurrences of each term in `text`, in lexicon order, zero counts omitted.
    pub fn count<'a>(&'a self, text: &str) -> Vec<(&'a str, u64)> {
        self.terms
            .iter()
            .filter_map(|(term, matcher)| {
                let hits = matcher.find_iter(text).count() as u64;
                (hits > 0).then_some((term.as_str(), hits))
            })
            .collect()
    }
}

/// Cadence of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceBucket {
    Long,
    Normal,
    Short,
}

/// Effective answering time: recorded time, or the default when unrecorded.
fn answer_seconds(timing: &AnswerTiming) -> f64 {
    timing
        .time_used
        .filter(|t| t.is_finite() && *t >= 0.0)
        .unwrap_or(DEFAULT_ANSWER_SECONDS)
}

/// Classify one answer by its words-per-minute rate.
///
/// An answer without timing is treated as normally paced. A timing entry
/// without a usable time has a rate of 0 and counts as a long pause; the
/// default seconds only feed the session total.
pub fn pace_bucket(timing: Option<&AnswerTiming>) -> PaceBucket {
    let Some(timing) = timing else {
        return PaceBucket::Normal;
    };
    let wpm = match timing.time_used.filter(|t| t.is_finite() && *t > 0.0) {
        Some(seconds) => timing.words_spoken as f64 / (seconds / 60.0),
        None => 0.0,
    };

    if wpm < LONG_PAUSE_WPM {
        PaceBucket::Long
    } else if wpm > RUSHED_WPM {
        PaceBucket::Short
    } else {
        PaceBucket::Normal
    }
}

/// Session pattern from per-answer buckets: a bucket wins only when it
/// outnumbers the other two combined.
pub fn classify_pauses(buckets: &[PaceBucket]) -> PausePattern {
    let count = |wanted: PaceBucket| buckets.iter().filter(|b| **b == wanted).count();
    let long = count(PaceBucket::Long);
    let normal = count(PaceBucket::Normal);
    let short = count(PaceBucket::Short);

    if long > normal + short {
        PausePattern::TooManyLongPauses
    } else if short > normal + long {
        PausePattern::RushedSpeech
    } else {
        PausePattern::Balanced
    }
}

/// Label the session-wide speaking speed.
pub fn speech_rate(words_per_minute: u64) -> SpeechRate {
    let (label, description) = if words_per_minute < SLOW_PACE_WPM {
        (
            "Slow Pace",
            "You speak relatively slowly. Consider picking up the pace slightly to maintain engagement.",
        )
    } else if words_per_minute > FAST_PACE_WPM {
        (
            "Fast Pace",
            "You speak quite quickly. Consider slowing down slightly for better clarity.",
        )
    } else {
        (
            "Good Pace",
            "Your speech rate is optimal for clear communication.",
        )
    };
    SpeechRate {
        label: label.to_string(),
        description: description.to_string(),
    }
}

/// Reduces one session into a [`NonVerbalAnalytics`] summary.
#[derive(Debug, Clone)]
pub struct NonVerbalAggregator {
    lexicon: FillerLexicon,
}

impl NonVerbalAggregator {
    pub fn new(lexicon: FillerLexicon) -> Self {
        Self { lexicon }
    }

    /// Aggregate a stored session record.
    pub fn aggregate_session(
        &self,
        session: &SessionRecord,
    ) -> Result<NonVerbalAnalytics, AnalyticsError> {
        let answers = session.answers.as_deref().ok_or_else(|| {
            AnalyticsError::DataUnavailable("session has no answers".to_string())
        })?;
        self.aggregate(answers, &session.timings, &session.audio_frames())
    }

    /// Aggregate answers with their (possibly missing) timings and audio frames.
    ///
    /// Timings and frame lists are matched to answers by position.
    pub fn aggregate(
        &self,
        answers: &[String],
        timings: &[Option<AnswerTiming>],
        audio_frames: &[Vec<AudioFrameMetric>],
    ) -> Result<NonVerbalAnalytics, AnalyticsError> {
        if answers.is_empty() {
            return Err(AnalyticsError::DataUnavailable(
                "interview contains no answers".to_string(),
            ));
        }

        let mut total_words: u64 = 0;
        let mut total_time = 0.0;
        let mut filler_words: u64 = 0;
        let mut detected: IndexMap<String, u64> = IndexMap::new();
        let mut buckets = Vec::with_capacity(answers.len());

        for (index, answer) in answers.iter().enumerate() {
            total_words += answer.split_whitespace().count() as u64;

            for (term, hits) in self.lexicon.count(answer) {
                filler_words += hits;
                *detected.entry(term.to_string()).or_default() += hits;
            }

            let timing = timings.get(index).and_then(Option::as_ref);
            total_time += timing.map(answer_seconds).unwrap_or(DEFAULT_ANSWER_SECONDS);
            buckets.push(pace_bucket(timing));
        }

        let words_per_minute = if total_time > 0.0 {
            (total_words as f64 / total_time * 60.0).round() as u64
        } else {
            0
        };
        let filler_percentage = if total_words > 0 {
            round_to(filler_words as f64 / total_words as f64 * 100.0, 1)
        } else {
            0.0
        };
        let pattern = classify_pauses(&buckets);

        debug!(
            "Aggregated {} answers: {} words, {} fillers, {} wpm, {}",
            answers.len(),
            total_words,
            filler_words,
            words_per_minute,
            pattern
        );

        Ok(NonVerbalAnalytics {
            total_words,
            total_time,
            words_per_minute,
            speech_rate: speech_rate(words_per_minute),
            filler_words,
            filler_percentage,
            detected_filler_words: detected,
            pause_analysis: PauseAnalysis::from(pattern),
            question_count: answers.len(),
            audio_metrics: aggregate_audio(audio_frames),
        })
    }
}

/// Delivery sub-scores and the combined delivery confidence (0-100).
pub fn delivery_scores(analytics: &NonVerbalAnalytics) -> DeliveryScores {
    let fluency = (100.0 - analytics.filler_percentage * 2.0).clamp(0.0, 100.0);
    let speech_rate = if (SLOW_PACE_WPM..=FAST_PACE_WPM).contains(&analytics.words_per_minute) {
        85.0
    } else {
        65.0
    };
    let voice_modulation = match analytics.pause_analysis.pattern {
        PausePattern::Balanced => 90.0,
        PausePattern::RushedSpeech => 60.0,
        PausePattern::TooManyLongPauses => 75.0,
    };

    DeliveryScores {
        fluency,
        speech_rate,
        voice_modulation,
        overall_confidence: ((voice_modulation + speech_rate + fluency) / 3.0).round(),
    }
}

/// Delivery strengths and improvements, plus a one-line recap.
pub fn delivery_insights(analytics: &NonVerbalAnalytics, scores: &DeliveryScores) -> DeliveryInsights {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    match analytics.speech_rate.label.as_str() {
        "Good Pace" => strengths.push("Excellent speech pacing for clear communication".to_string()),
        "Slow Pace" => improvements
            .push("Consider speaking slightly faster to maintain audience engagement".to_string()),
        "Fast Pace" => improvements
            .push("Try speaking slightly slower to improve clarity and comprehension".to_string()),
        _ => {}
    }

    let fillers = analytics.filler_percentage;
    if fillers < 3.0 {
        strengths.push("Minimal use of filler words - very articulate speech".to_string());
    } else if fillers < 6.0 {
        strengths.push("Good control over filler words usage".to_string());
    } else {
        improvements.push(format!("Reduce filler words usage (currently {}%)", fillers));
    }

    let pauses = &analytics.pause_analysis;
    if pauses.pattern == PausePattern::Balanced {
        strengths.push("Well-balanced pause pattern enhances speech flow".to_string());
    } else {
        let advice = if pauses.recommendation.is_empty() {
            "Practice strategic pausing"
        } else {
            pauses.recommendation.as_str()
        };
        improvements.push(format!("Improve pause timing: {}", advice));
    }

    if (SLOW_PACE_WPM..=FAST_PACE_WPM).contains(&analytics.words_per_minute) {
        strengths.push("Optimal speaking speed for professional communication".to_string());
    }

    if scores.overall_confidence >= 80.0 {
        strengths.push("Strong overall confidence in speech delivery".to_string());
    } else if scores.overall_confidence < 70.0 {
        improvements.push("Focus on building confidence through practice and preparation".to_string());
    }

    let feedback = format!(
        "Speech rate: {}. {} Filler words usage: {}%. Pause pattern: {}. Overall confidence level: {}%.",
        analytics.speech_rate.label,
        analytics.speech_rate.description,
        fillers,
        pauses.pattern,
        scores.overall_confidence
    );

    DeliveryInsights {
        strengths,
        improvements,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> NonVerbalAggregator {
        NonVerbalAggregator::new(FillerLexicon::standard().unwrap())
    }

    fn timing(time_used: f64, words_spoken: u64) -> Option<AnswerTiming> {
        Some(AnswerTiming {
            time_used: Some(time_used),
            words_spoken,
        })
    }

    fn answers(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_word_and_filler_counts() {
        let result = aggregator()
            .aggregate(
                &answers(&["um I think that", "this is a clean answer"]),
                &[timing(30.0, 4), timing(30.0, 5)],
                &[],
            )
            .unwrap();

        assert_eq!(result.total_words, 9);
        assert_eq!(result.filler_words, 1);
        assert_eq!(result.filler_percentage, 11.1);
        assert_eq!(result.total_time, 60.0);
        assert_eq!(result.words_per_minute, 9);
        assert_eq!(result.question_count, 2);
        assert!(result.audio_metrics.is_none());
    }

    #[test]
    fn test_so_counts_as_filler() {
        let result = aggregator()
            .aggregate(&answers(&["um I think so"]), &[], &[])
            .unwrap();
        assert_eq!(result.filler_words, 2);
        assert_eq!(result.detected_filler_words.get("so"), Some(&1));
    }

    #[test]
    fn test_filler_matching_is_whole_word_and_case_insensitive() {
        let result = aggregator()
            .aggregate(
                &answers(&["Like, I MEAN, you know... likely alright, sorted"]),
                &[],
                &[],
            )
            .unwrap();

        let detected: Vec<(&str, u64)> = result
            .detected_filler_words
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(detected, vec![("like", 1), ("you know", 1), ("i mean", 1)]);
        assert_eq!(result.filler_words, 3);
    }

    #[test]
    fn test_detected_fillers_keep_first_detection_order() {
        let result = aggregator()
            .aggregate(&answers(&["yeah well", "um yeah"]), &[], &[])
            .unwrap();
        let keys: Vec<&str> = result.detected_filler_words.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["well", "yeah", "um"]);
        assert_eq!(result.detected_filler_words["yeah"], 2);
    }

    #[test]
    fn test_zero_denominators() {
        let result = aggregator()
            .aggregate(&answers(&["", "   "]), &[timing(0.0, 0), timing(0.0, 0)], &[])
            .unwrap();

        assert_eq!(result.total_words, 0);
        assert_eq!(result.total_time, 0.0);
        assert_eq!(result.words_per_minute, 0);
        assert_eq!(result.filler_percentage, 0.0);
    }

    #[test]
    fn test_missing_timing_defaults_to_sixty_seconds() {
        let result = aggregator()
            .aggregate(&answers(&["one two three", "four"]), &[timing(30.0, 3)], &[])
            .unwrap();
        assert_eq!(result.total_time, 90.0);
    }

    #[test]
    fn test_empty_answers_are_unavailable() {
        let err = aggregator().aggregate(&[], &[], &[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::DataUnavailable(_)));

        let session = SessionRecord::default();
        let err = aggregator().aggregate_session(&session).unwrap_err();
        assert!(matches!(err, AnalyticsError::DataUnavailable(_)));
    }

    #[test]
    fn test_pace_buckets() {
        assert_eq!(pace_bucket(None), PaceBucket::Normal);
        assert_eq!(pace_bucket(timing(60.0, 90).as_ref()), PaceBucket::Long);
        assert_eq!(pace_bucket(timing(60.0, 130).as_ref()), PaceBucket::Normal);
        assert_eq!(pace_bucket(timing(30.0, 100).as_ref()), PaceBucket::Short);
        assert_eq!(pace_bucket(timing(0.0, 10).as_ref()), PaceBucket::Long);
    }

    #[test]
    fn test_unrecorded_time_is_a_long_pause() {
        let untimed = AnswerTiming {
            time_used: None,
            words_spoken: 150,
        };
        assert_eq!(pace_bucket(Some(&untimed)), PaceBucket::Long);

        let result = aggregator()
            .aggregate(&answers(&["one two"]), &[Some(untimed)], &[])
            .unwrap();
        assert_eq!(result.total_time, 60.0);
        assert_eq!(result.words_per_minute, 2);
        assert_eq!(result.pause_analysis.pattern, PausePattern::TooManyLongPauses);
    }

    #[test]
    fn test_pause_patterns() {
        use PaceBucket::*;
        assert_eq!(
            classify_pauses(&[Long, Long, Normal]),
            PausePattern::TooManyLongPauses
        );
        assert_eq!(classify_pauses(&[Short, Short, Long]), PausePattern::RushedSpeech);
        assert_eq!(classify_pauses(&[Long, Short]), PausePattern::Balanced);
        assert_eq!(classify_pauses(&[]), PausePattern::Balanced);
    }

    #[test]
    fn test_pause_analysis_text_follows_pattern() {
        let result = aggregator()
            .aggregate(
                &answers(&["a", "b", "c"]),
                &[timing(60.0, 50), timing(60.0, 60), None],
                &[],
            )
            .unwrap();
        assert_eq!(result.pause_analysis.pattern, PausePattern::TooManyLongPauses);
        assert_eq!(
            result.pause_analysis.recommendation,
            PausePattern::TooManyLongPauses.recommendation()
        );
    }

    #[test]
    fn test_speech_rate_labels() {
        assert_eq!(speech_rate(110).label, "Slow Pace");
        assert_eq!(speech_rate(120).label, "Good Pace");
        assert_eq!(speech_rate(160).label, "Good Pace");
        assert_eq!(speech_rate(161).label, "Fast Pace");
    }

    #[test]
    fn test_extra_filler_terms() {
        let lexicon = FillerLexicon::new(["Hmm", "um", " "]).unwrap();
        let terms: Vec<&str> = lexicon.terms().collect();
        assert_eq!(terms.len(), FILLER_WORDS.len() + 1);
        assert_eq!(terms.last(), Some(&"hmm"));

        let agg = NonVerbalAggregator::new(lexicon);
        let result = agg.aggregate(&answers(&["hmm, um"]), &[], &[]).unwrap();
        assert_eq!(result.filler_words, 2);
    }

    #[test]
    fn test_delivery_scores() {
        let mut analytics = NonVerbalAnalytics {
            words_per_minute: 140,
            filler_percentage: 5.0,
            ..NonVerbalAnalytics::default()
        };
        let scores = delivery_scores(&analytics);
        assert_eq!(scores.fluency, 90.0);
        assert_eq!(scores.speech_rate, 85.0);
        assert_eq!(scores.voice_modulation, 90.0);
        assert_eq!(scores.overall_confidence, 88.0);

        analytics.words_per_minute = 90;
        analytics.filler_percentage = 60.0;
        analytics.pause_analysis = PauseAnalysis::from(PausePattern::RushedSpeech);
        let scores = delivery_scores(&analytics);
        assert_eq!(scores.fluency, 0.0);
        assert_eq!(scores.overall_confidence, 42.0);
    }

    #[test]
    fn test_delivery_insights_for_strong_delivery() {
        let analytics = NonVerbalAnalytics {
            words_per_minute: 140,
            speech_rate: speech_rate(140),
            filler_percentage: 2.9,
            ..NonVerbalAnalytics::default()
        };
        let scores = delivery_scores(&analytics);
        assert_eq!(scores.overall_confidence, 90.0);

        let insights = delivery_insights(&analytics, &scores);
        assert_eq!(
            insights.strengths,
            vec![
                "Excellent speech pacing for clear communication",
                "Minimal use of filler words - very articulate speech",
                "Well-balanced pause pattern enhances speech flow",
                "Optimal speaking speed for professional communication",
                "Strong overall confidence in speech delivery",
            ]
        );
        assert!(insights.improvements.is_empty());
        assert!(insights
            .feedback
            .starts_with("Speech rate: Good Pace. Your speech rate is optimal"));
        assert!(insights
            .feedback
            .ends_with("Filler words usage: 2.9%. Pause pattern: Balanced. Overall confidence level: 90%."));
    }

    #[test]
    fn test_delivery_insights_filler_bands() {
        let insights_at = |filler_percentage: f64| {
            let analytics = NonVerbalAnalytics {
                filler_percentage,
                ..NonVerbalAnalytics::default()
            };
            delivery_insights(&analytics, &delivery_scores(&analytics))
        };

        assert!(insights_at(3.0)
            .strengths
            .contains(&"Good control over filler words usage".to_string()));
        assert!(insights_at(5.9)
            .strengths
            .contains(&"Good control over filler words usage".to_string()));
        assert!(insights_at(6.0)
            .improvements
            .contains(&"Reduce filler words usage (currently 6%)".to_string()));
    }

    #[test]
    fn test_delivery_insights_for_weak_delivery() {
        let analytics = NonVerbalAnalytics {
            words_per_minute: 90,
            speech_rate: speech_rate(90),
            filler_percentage: 20.0,
            pause_analysis: PauseAnalysis::from(PausePattern::TooManyLongPauses),
            ..NonVerbalAnalytics::default()
        };
        let scores = delivery_scores(&analytics);
        assert_eq!(scores.overall_confidence, 67.0);

        let insights = delivery_insights(&analytics, &scores);
        assert!(insights.strengths.is_empty());
        assert_eq!(
            insights.improvements,
            vec![
                "Consider speaking slightly faster to maintain audience engagement",
                "Reduce filler words usage (currently 20%)",
                "Improve pause timing: Practice maintaining a steady flow with shorter pauses.",
                "Focus on building confidence through practice and preparation",
            ]
        );
    }

    #[test]
    fn test_confidence_between_bands_adds_nothing() {
        // 70 <= confidence < 80 is neither a strength nor an improvement.
        let analytics = NonVerbalAnalytics {
            words_per_minute: 140,
            speech_rate: speech_rate(140),
            filler_percentage: 15.0,
            pause_analysis: PauseAnalysis::from(PausePattern::TooManyLongPauses),
            ..NonVerbalAnalytics::default()
        };
        let scores = delivery_scores(&analytics);
        assert_eq!(scores.overall_confidence, 77.0);

        let insights = delivery_insights(&analytics, &scores);
        let all: Vec<&String> = insights.strengths.iter().chain(&insights.improvements).collect();
        assert!(!all.iter().any(|s| s.contains("confidence")));
    }

    #[test]
    fn test_idempotent() {
        let agg = aggregator();
        let input = answers(&["so, basically, I would use a queue", "right"]);
        let timings = [timing(20.0, 7), None];
        let first = agg.aggregate(&input, &timings, &[]).unwrap();
        let second = agg.aggregate(&input, &timings, &[]).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

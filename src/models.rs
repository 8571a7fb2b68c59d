//! Data models for interview analytics.
//!
//! Input records mirror the JSON produced by the interview client, the
//! audio feature extractor and the verbal scoring service. Output records
//! are plain serializable values; none of them carry hidden state.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Session inputs
// ---------------------------------------------------------------------------

/// Timing captured for a single answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerTiming {
    /// Seconds spent answering. `None` falls back to 60 seconds.
    #[serde(default, alias = "timeUsed")]
    pub time_used: Option<f64>,
    /// Words recognised while answering.
    #[serde(default, alias = "wordsSpoken")]
    pub words_spoken: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchMetric {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneMetric {
    #[serde(default)]
    pub emotional_tone: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub expressiveness: Option<f64>,
    #[serde(default)]
    pub warmth: Option<f64>,
    #[serde(default)]
    pub clarity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyMetric {
    #[serde(default)]
    pub volume_level: Option<String>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub brightness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceQualityMetric {
    #[serde(default)]
    pub overall: Option<String>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub breathiness: Option<f64>,
    #[serde(default)]
    pub hoarseness: Option<f64>,
    #[serde(default)]
    pub strain: Option<f64>,
}

/// Audio descriptors emitted by the extractor for one answer snapshot.
///
/// Every field is optional; absent numeric values are left out of
/// averages rather than counted as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFrameMetric {
    #[serde(default)]
    pub pitch: Option<PitchMetric>,
    #[serde(default)]
    pub tone: Option<ToneMetric>,
    #[serde(default)]
    pub energy: Option<EnergyMetric>,
    #[serde(default)]
    pub voice_quality: Option<VoiceQualityMetric>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

/// Audio analysis attached to one answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysisEntry {
    #[serde(default)]
    pub metrics: Vec<AudioFrameMetric>,
}

/// A recorded interview session as stored by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    /// Transcribed answers. `None` means the interview was never completed.
    #[serde(default)]
    pub answers: Option<Vec<String>>,
    #[serde(default)]
    pub timings: Vec<Option<AnswerTiming>>,
    #[serde(default, alias = "audioAnalysis")]
    pub audio_analysis: Vec<Option<AudioAnalysisEntry>>,
}

impl SessionRecord {
    /// Per-answer audio frame lists, with null entries treated as empty.
    pub fn audio_frames(&self) -> Vec<Vec<AudioFrameMetric>> {
        self.audio_analysis
            .iter()
            .map(|entry| entry.as_ref().map(|e| e.metrics.clone()).unwrap_or_default())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Verbal analysis (scored externally)
// ---------------------------------------------------------------------------

/// A single verbal metric score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbalMetrics {
    #[serde(default)]
    pub answer_correctness: Option<MetricScore>,
    #[serde(default)]
    pub concepts_understanding: Option<MetricScore>,
    #[serde(default)]
    pub domain_knowledge: Option<MetricScore>,
    #[serde(default)]
    pub response_structure: Option<MetricScore>,
    #[serde(default)]
    pub depth_of_explanation: Option<MetricScore>,
    #[serde(default)]
    pub vocabulary_richness: Option<MetricScore>,
}

fn metric_value(metric: &Option<MetricScore>) -> Option<f64> {
    metric.as_ref().and_then(|m| m.score)
}

impl VerbalMetrics {
    pub fn answer_correctness(&self) -> Option<f64> {
        metric_value(&self.answer_correctness)
    }

    pub fn concepts_understanding(&self) -> Option<f64> {
        metric_value(&self.concepts_understanding)
    }

    pub fn domain_knowledge(&self) -> Option<f64> {
        metric_value(&self.domain_knowledge)
    }

    pub fn response_structure(&self) -> Option<f64> {
        metric_value(&self.response_structure)
    }

    pub fn depth_of_explanation(&self) -> Option<f64> {
        metric_value(&self.depth_of_explanation)
    }

    pub fn vocabulary_richness(&self) -> Option<f64> {
        metric_value(&self.vocabulary_richness)
    }
}

/// Content scoring returned by the verbal scoring service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbalAnalytics {
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub metrics: VerbalMetrics,
    #[serde(default)]
    pub individual_answers: Vec<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Non-verbal outputs
// ---------------------------------------------------------------------------

/// Session-level speaking cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PausePattern {
    #[default]
    Balanced,
    #[serde(rename = "Too Many Long Pauses")]
    TooManyLongPauses,
    #[serde(rename = "Rushed Speech")]
    RushedSpeech,
}

impl fmt::Display for PausePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PausePattern::Balanced => write!(f, "Balanced"),
            PausePattern::TooManyLongPauses => write!(f, "Too Many Long Pauses"),
            PausePattern::RushedSpeech => write!(f, "Rushed Speech"),
        }
    }
}

impl PausePattern {
    pub fn description(&self) -> &'static str {
        match self {
            PausePattern::Balanced => "Your pause pattern shows good variety.",
            PausePattern::TooManyLongPauses => "You tend to have lengthy pauses between thoughts.",
            PausePattern::RushedSpeech => "You speak with minimal pauses.",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            PausePattern::Balanced => "Continue maintaining your current pause pattern.",
            PausePattern::TooManyLongPauses => {
                "Practice maintaining a steady flow with shorter pauses."
            }
            PausePattern::RushedSpeech => "Add strategic pauses to emphasize key points.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseAnalysis {
    pub pattern: PausePattern,
    pub description: String,
    pub recommendation: String,
}

impl From<PausePattern> for PauseAnalysis {
    fn from(pattern: PausePattern) -> Self {
        Self {
            pattern,
            description: pattern.description().to_string(),
            recommendation: pattern.recommendation().to_string(),
        }
    }
}

/// Classification of the session-wide speaking speed.
///
/// Stored client records carry only the label as a plain string; both
/// shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeechRate {
    pub label: String,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpeechRateRepr {
    Label(String),
    Full {
        #[serde(default)]
        label: String,
        #[serde(default)]
        description: String,
    },
}

impl<'de> Deserialize<'de> for SpeechRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SpeechRateRepr::deserialize(deserializer)? {
            SpeechRateRepr::Label(label) => SpeechRate {
                label,
                description: String::new(),
            },
            SpeechRateRepr::Full { label, description } => SpeechRate { label, description },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// A number that may have been stored as text (e.g. `"11.1"`).
/// Unparseable text reads as 0.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => value,
        NumberOrText::Text(text) => text.trim().parse().unwrap_or(0.0),
    })
}

/// Direction of a series over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Improving,
    Declining,
    #[default]
    Stable,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
            Trend::InsufficientData => write!(f, "insufficient-data"),
        }
    }
}

impl Trend {
    pub fn emoji(&self) -> &'static str {
        match self {
            Trend::Improving => "📈",
            Trend::Declining => "📉",
            Trend::Stable => "➖",
            Trend::InsufficientData => "⏳",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchSummary {
    pub average: f64,
    pub range: f64,
    pub predominant_level: String,
    pub predominant_trend: String,
    pub consistency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneSummary {
    pub predominant_emotion: String,
    pub emotional_variety: usize,
    pub predominant_quality: String,
    pub average_expressiveness: f64,
    pub average_warmth: f64,
    pub average_clarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    pub predominant_volume: String,
    pub average_energy: f64,
    pub average_brightness: f64,
    pub volume_consistency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceQualitySummary {
    pub overall: String,
    pub average_score: f64,
    pub average_breathiness: f64,
    pub average_hoarseness: f64,
    pub average_strain: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceSummary {
    pub average: f64,
    pub consistency: f64,
    pub trend: Trend,
}

/// All audio frames of a session folded into one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAudio {
    pub pitch: PitchSummary,
    pub tone: ToneSummary,
    pub energy: EnergySummary,
    pub voice_quality: VoiceQualitySummary,
    pub confidence: ConfidenceSummary,
}

/// Delivery summary for one interview session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NonVerbalAnalytics {
    pub total_words: u64,
    pub total_time: f64,
    pub words_per_minute: u64,
    pub speech_rate: SpeechRate,
    pub filler_words: u64,
    #[serde(deserialize_with = "lenient_number")]
    pub filler_percentage: f64,
    pub detected_filler_words: IndexMap<String, u64>,
    pub pause_analysis: PauseAnalysis,
    pub question_count: usize,
    pub audio_metrics: Option<AggregatedAudio>,
}

/// Delivery sub-scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryScores {
    pub fluency: f64,
    pub speech_rate: f64,
    pub voice_modulation: f64,
    pub overall_confidence: f64,
}

/// What went well and what to work on in the delivery of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInsights {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// One-line recap of pace, fillers, pauses and confidence.
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// Correlation outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    ContentStrong,
    DeliveryStrong,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::ContentStrong => write!(f, "content-strong"),
            Alignment::DeliveryStrong => write!(f, "delivery-strong"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallCorrelation {
    pub correlation_strength: u32,
    pub alignment: Alignment,
    pub description: String,
    pub verbal_score: f64,
    pub non_verbal_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificCorrelation {
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificCorrelations {
    pub knowledge_to_confidence: SpecificCorrelation,
    pub structure_to_fluency: SpecificCorrelation,
    pub vocabulary_to_clarity: SpecificCorrelation,
}

/// A >20 point asymmetry between content and delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceGap {
    pub area: String,
    pub gap: f64,
    pub priority: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub overall_correlation: OverallCorrelation,
    pub specific_correlations: SpecificCorrelations,
    pub performance_gaps: Vec<PerformanceGap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl Priority {
    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::Low => "🟢",
            Priority::Medium => "🟡",
            Priority::High => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionCategory {
    Verbal,
    NonVerbal,
    Overall,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Verbal => write!(f, "verbal"),
            ActionCategory::NonVerbal => write!(f, "non-verbal"),
            ActionCategory::Overall => write!(f, "overall"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub item: String,
    pub priority: Priority,
    pub category: ActionCategory,
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Readiness {
    Excellent,
    Ready,
    NeedsImprovement,
    NotReady,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Excellent => write!(f, "excellent"),
            Readiness::Ready => write!(f, "ready"),
            Readiness::NeedsImprovement => write!(f, "needs improvement"),
            Readiness::NotReady => write!(f, "not ready"),
        }
    }
}

/// How one delivery factor moves overall performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactFactor {
    pub name: String,
    /// Signed contribution in points.
    pub score: i32,
    pub level: String,
    pub impact: String,
    pub affected_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// Per-factor impacts of delivery on performance, with totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub factors: Vec<ImpactFactor>,
    /// Factor names with a positive score, in factor order.
    pub positive_factors: Vec<String>,
    /// Factor names with a negative score, most negative first.
    pub areas_for_improvement: Vec<String>,
    pub positive_total: i32,
    pub negative_total: i32,
    pub net_performance_impact: i32,
}

/// Combined verdict for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub overall_score: f64,
    pub readiness: Readiness,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Progress inputs and outputs
// ---------------------------------------------------------------------------

/// One score of one skill, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBreakdownEntry {
    pub average_score: f64,
    pub trend: Trend,
    pub improvement: f64,
    pub scores_history: Vec<f64>,
    pub total_sessions: usize,
}

/// A completed interview as persisted for the progress dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewRecord {
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub question_count: usize,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub verbal_score: Option<f64>,
    #[serde(default)]
    pub nonverbal_score: Option<f64>,
    #[serde(default)]
    pub verbal: Option<VerbalAnalytics>,
    #[serde(default, alias = "nonVerbal")]
    pub non_verbal: Option<NonVerbalAnalytics>,
    /// Delivery confidence as stored; derived from `non_verbal` when absent.
    #[serde(default)]
    pub delivery_confidence: Option<f64>,
}

/// Per-session scores plotted on the progress chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: Option<DateTime<Utc>>,
    pub overall_score: f64,
    pub verbal_score: f64,
    pub nonverbal_score: f64,
    pub interview_type: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentPerformance {
    pub average_overall: f64,
    pub average_verbal: f64,
    pub average_nonverbal: f64,
    pub recent_interviews: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub best_score: f64,
    pub average_score: f64,
    pub total_questions_answered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Info,
    Warning,
    Tip,
}

impl InsightKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            InsightKind::Success => "✅",
            InsightKind::Info => "ℹ️",
            InsightKind::Warning => "⚠️",
            InsightKind::Tip => "💡",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub color: InsightColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStep {
    pub skill: String,
    pub current_score: f64,
    pub target_score: f64,
}

/// What the user should practise next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum NextSteps {
    Focus { steps: Vec<NextStep> },
    OnTrack { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDashboard {
    pub total_interviews: usize,
    pub trends: Vec<TrendPoint>,
    pub recent_performance: RecentPerformance,
    pub skill_breakdown: IndexMap<String, SkillBreakdownEntry>,
    pub statistics: Statistics,
    pub insights: Vec<Insight>,
    pub next_steps: NextSteps,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Metadata about a generated report. Filled in by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the input the report was built from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of this tool.
    pub tool_version: String,
}

/// Analysis of a single interview session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub metadata: ReportMetadata,
    pub session_id: Option<String>,
    pub non_verbal: NonVerbalAnalytics,
    pub delivery: DeliveryScores,
    pub delivery_insights: DeliveryInsights,
    pub impact: ImpactAnalysis,
    pub non_verbal_score: f64,
    pub verbal_score: Option<f64>,
    pub assessment: Option<OverallAssessment>,
    pub correlation: Option<CorrelationResult>,
    pub action_items: Vec<ActionItem>,
    pub chart: Vec<ChartPoint>,
    pub verbal_recommendations: Vec<String>,
}

/// Multi-session progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub metadata: ReportMetadata,
    pub dashboard: ProgressDashboard,
}

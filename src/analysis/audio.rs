//! Folding per-answer audio descriptors into one session summary.
//!
//! Every audio field has exactly one rule describing how its samples are
//! combined and what value stands in when no frame reports it. The rules
//! live in [`AudioField::rule`] so the defaults are defined in one place.

use super::stats::{consistency, mean, mode, split_half_trend};
use crate::models::{
    AggregatedAudio, AudioFrameMetric, ConfidenceSummary, EnergySummary, PitchSummary,
    ToneSummary, VoiceQualitySummary,
};
use std::collections::HashSet;
use tracing::debug;

/// How the samples of a field are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Most frequent label, first-seen wins ties.
    Mode,
    /// Arithmetic mean over present values.
    Mean,
    /// Arithmetic mean rounded to a whole number.
    RoundedMean,
}

/// Value used when no frame carries the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Number(f64),
    Label(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub aggregation: Aggregation,
    pub fallback: Fallback,
}

/// Every field of [`AudioFrameMetric`] that is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioField {
    PitchMean,
    PitchLevel,
    PitchTrend,
    EmotionalTone,
    ToneQuality,
    Expressiveness,
    Warmth,
    Clarity,
    VolumeLevel,
    EnergyMean,
    Brightness,
    VoiceQuality,
    QualityScore,
    Breathiness,
    Hoarseness,
    Strain,
    Confidence,
}

impl AudioField {
    pub const ALL: [AudioField; 17] = [
        AudioField::PitchMean,
        AudioField::PitchLevel,
        AudioField::PitchTrend,
        AudioField::EmotionalTone,
        AudioField::ToneQuality,
        AudioField::Expressiveness,
        AudioField::Warmth,
        AudioField::Clarity,
        AudioField::VolumeLevel,
        AudioField::EnergyMean,
        AudioField::Brightness,
        AudioField::VoiceQuality,
        AudioField::QualityScore,
        AudioField::Breathiness,
        AudioField::Hoarseness,
        AudioField::Strain,
        AudioField::Confidence,
    ];

    /// Aggregation strategy and default for this field.
    pub const fn rule(self) -> FieldRule {
        use Aggregation::*;
        use Fallback::*;

        let (aggregation, fallback) = match self {
            AudioField::PitchMean => (RoundedMean, Number(0.0)),
            AudioField::PitchLevel => (Mode, Label("medium")),
            AudioField::PitchTrend => (Mode, Label("stable")),
            AudioField::EmotionalTone => (Mode, Label("neutral")),
            AudioField::ToneQuality => (Mode, Label("neutral")),
            AudioField::Expressiveness => (Mean, Number(0.5)),
            AudioField::Warmth => (Mean, Number(0.5)),
            AudioField::Clarity => (Mean, Number(0.5)),
            AudioField::VolumeLevel => (Mode, Label("normal")),
            AudioField::EnergyMean => (Mean, Number(0.05)),
            AudioField::Brightness => (RoundedMean, Number(0.0)),
            AudioField::VoiceQuality => (Mode, Label("good")),
            AudioField::QualityScore => (Mean, Number(0.7)),
            AudioField::Breathiness => (Mean, Number(0.3)),
            AudioField::Hoarseness => (Mean, Number(0.2)),
            AudioField::Strain => (Mean, Number(0.2)),
            AudioField::Confidence => (Mean, Number(0.5)),
        };
        FieldRule {
            aggregation,
            fallback,
        }
    }

    fn number(self, frame: &AudioFrameMetric) -> Option<f64> {
        let value = match self {
            // Unvoiced frames report a pitch of 0 and are not pitch samples.
            AudioField::PitchMean => frame.pitch.as_ref()?.mean.filter(|v| *v > 0.0),
            AudioField::Expressiveness => frame.tone.as_ref()?.expressiveness,
            AudioField::Warmth => frame.tone.as_ref()?.warmth,
            AudioField::Clarity => frame.tone.as_ref()?.clarity,
            AudioField::EnergyMean => frame.energy.as_ref()?.mean,
            AudioField::Brightness => frame.energy.as_ref()?.brightness,
            AudioField::QualityScore => frame.voice_quality.as_ref()?.quality_score,
            AudioField::Breathiness => frame.voice_quality.as_ref()?.breathiness,
            AudioField::Hoarseness => frame.voice_quality.as_ref()?.hoarseness,
            AudioField::Strain => frame.voice_quality.as_ref()?.strain,
            AudioField::Confidence => frame.confidence_score,
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    fn label(self, frame: &AudioFrameMetric) -> Option<&str> {
        let value = match self {
            AudioField::PitchLevel => frame.pitch.as_ref()?.level.as_deref(),
            AudioField::PitchTrend => frame.pitch.as_ref()?.trend.as_deref(),
            AudioField::EmotionalTone => frame.tone.as_ref()?.emotional_tone.as_deref(),
            AudioField::ToneQuality => frame.tone.as_ref()?.quality.as_deref(),
            AudioField::VolumeLevel => frame.energy.as_ref()?.volume_level.as_deref(),
            AudioField::VoiceQuality => frame.voice_quality.as_ref()?.overall.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Present numeric samples of this field, in frame order.
    pub fn numbers(self, frames: &[&AudioFrameMetric]) -> Vec<f64> {
        frames.iter().filter_map(|f| self.number(f)).collect()
    }

    /// Present label samples of this field, in frame order.
    pub fn labels<'a>(self, frames: &[&'a AudioFrameMetric]) -> Vec<&'a str> {
        frames.iter().filter_map(|&f| self.label(f)).collect()
    }

    /// Aggregate a numeric field according to its rule.
    pub fn aggregate_number(self, frames: &[&AudioFrameMetric]) -> f64 {
        let rule = self.rule();
        let fallback = match rule.fallback {
            Fallback::Number(value) => value,
            Fallback::Label(_) => 0.0,
        };
        match (rule.aggregation, mean(&self.numbers(frames))) {
            (_, None) => fallback,
            (Aggregation::RoundedMean, Some(avg)) => avg.round(),
            (_, Some(avg)) => avg,
        }
    }

    /// Aggregate a categorical field according to its rule.
    pub fn aggregate_label(self, frames: &[&AudioFrameMetric]) -> String {
        let fallback = match self.rule().fallback {
            Fallback::Label(value) => value,
            Fallback::Number(_) => "",
        };
        mode(self.labels(frames)).unwrap_or(fallback).to_string()
    }
}

/// Agreement of categorical volume levels: one level is fully consistent,
/// five or more distinct levels are not consistent at all.
fn volume_consistency(levels: &[&str]) -> f64 {
    if levels.is_empty() {
        return 0.5;
    }
    let distinct = levels.iter().collect::<HashSet<_>>().len() as f64;
    (1.0 - (distinct - 1.0) / 4.0).clamp(0.0, 1.0)
}

/// Combine all audio frames of a session.
///
/// Returns `None` when no answer carries any frame.
pub fn aggregate_audio(frames: &[Vec<AudioFrameMetric>]) -> Option<AggregatedAudio> {
    let flat: Vec<&AudioFrameMetric> = frames.iter().flatten().collect();
    if flat.is_empty() {
        return None;
    }
    debug!("Aggregating {} audio frames", flat.len());

    let pitch_values = AudioField::PitchMean.numbers(&flat);
    let pitch_range = match (
        pitch_values.iter().cloned().reduce(f64::max),
        pitch_values.iter().cloned().reduce(f64::min),
    ) {
        (Some(max), Some(min)) => (max - min).round(),
        _ => 0.0,
    };

    let emotions = AudioField::EmotionalTone.labels(&flat);
    let volume_levels = AudioField::VolumeLevel.labels(&flat);
    let confidence_values = AudioField::Confidence.numbers(&flat);

    Some(AggregatedAudio {
        pitch: PitchSummary {
            average: AudioField::PitchMean.aggregate_number(&flat),
            range: pitch_range,
            predominant_level: AudioField::PitchLevel.aggregate_label(&flat),
            predominant_trend: AudioField::PitchTrend.aggregate_label(&flat),
            consistency: consistency(&pitch_values),
        },
        tone: ToneSummary {
            predominant_emotion: AudioField::EmotionalTone.aggregate_label(&flat),
            emotional_variety: emotions.iter().collect::<HashSet<_>>().len(),
            predominant_quality: AudioField::ToneQuality.aggregate_label(&flat),
            average_expressiveness: AudioField::Expressiveness.aggregate_number(&flat),
            average_warmth: AudioField::Warmth.aggregate_number(&flat),
            average_clarity: AudioField::Clarity.aggregate_number(&flat),
        },
        energy: EnergySummary {
            predominant_volume: AudioField::VolumeLevel.aggregate_label(&flat),
            average_energy: AudioField::EnergyMean.aggregate_number(&flat),
            average_brightness: AudioField::Brightness.aggregate_number(&flat),
            volume_consistency: volume_consistency(&volume_levels),
        },
        voice_quality: VoiceQualitySummary {
            overall: AudioField::VoiceQuality.aggregate_label(&flat),
            average_score: AudioField::QualityScore.aggregate_number(&flat),
            average_breathiness: AudioField::Breathiness.aggregate_number(&flat),
            average_hoarseness: AudioField::Hoarseness.aggregate_number(&flat),
            average_strain: AudioField::Strain.aggregate_number(&flat),
        },
        confidence: ConfidenceSummary {
            average: AudioField::Confidence.aggregate_number(&flat),
            consistency: consistency(&confidence_values),
            trend: split_half_trend(&confidence_values),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnergyMetric, PitchMetric, ToneMetric, Trend};

    fn frame(pitch: Option<f64>, emotion: Option<&str>, confidence: Option<f64>) -> AudioFrameMetric {
        AudioFrameMetric {
            pitch: Some(PitchMetric {
                mean: pitch,
                level: Some("medium".to_string()),
                trend: None,
            }),
            tone: emotion.map(|e| ToneMetric {
                emotional_tone: Some(e.to_string()),
                ..ToneMetric::default()
            }),
            energy: None,
            voice_quality: None,
            confidence_score: confidence,
        }
    }

    #[test]
    fn test_rule_table_kinds_match_fallbacks() {
        for field in AudioField::ALL {
            let rule = field.rule();
            match (rule.aggregation, rule.fallback) {
                (Aggregation::Mode, Fallback::Label(_)) => {}
                (Aggregation::Mean | Aggregation::RoundedMean, Fallback::Number(_)) => {}
                other => panic!("{:?} has mismatched rule {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_no_frames_yields_none() {
        assert!(aggregate_audio(&[]).is_none());
        assert!(aggregate_audio(&[vec![], vec![]]).is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let audio = aggregate_audio(&[vec![AudioFrameMetric::default()]]).unwrap();

        assert_eq!(audio.pitch.average, 0.0);
        assert_eq!(audio.pitch.predominant_level, "medium");
        assert_eq!(audio.pitch.consistency, 0.5);
        assert_eq!(audio.tone.predominant_emotion, "neutral");
        assert_eq!(audio.tone.average_expressiveness, 0.5);
        assert_eq!(audio.energy.predominant_volume, "normal");
        assert_eq!(audio.energy.average_energy, 0.05);
        assert_eq!(audio.energy.volume_consistency, 0.5);
        assert_eq!(audio.voice_quality.overall, "good");
        assert_eq!(audio.voice_quality.average_score, 0.7);
        assert_eq!(audio.confidence.average, 0.5);
        assert_eq!(audio.confidence.trend, Trend::Stable);
    }

    #[test]
    fn test_absent_values_are_not_zero() {
        let frames = vec![
            vec![frame(Some(200.0), Some("calm"), Some(0.8))],
            vec![frame(None, None, None), frame(Some(0.0), Some("excited"), Some(0.6))],
        ];
        let audio = aggregate_audio(&frames).unwrap();

        // Only the 200 Hz sample counts; the 0 Hz frame is unvoiced.
        assert_eq!(audio.pitch.average, 200.0);
        assert_eq!(audio.pitch.range, 0.0);
        assert!((audio.confidence.average - 0.7).abs() < 1e-9);
        // calm and excited tie once each; calm was seen first.
        assert_eq!(audio.tone.predominant_emotion, "calm");
        assert_eq!(audio.tone.emotional_variety, 2);
    }

    #[test]
    fn test_confidence_trend_across_answers() {
        let frames = vec![
            vec![frame(None, None, Some(0.3)), frame(None, None, Some(0.35))],
            vec![frame(None, None, Some(0.7)), frame(None, None, Some(0.75))],
        ];
        let audio = aggregate_audio(&frames).unwrap();
        assert_eq!(audio.confidence.trend, Trend::Improving);
    }

    #[test]
    fn test_volume_consistency() {
        let loud = AudioFrameMetric {
            energy: Some(EnergyMetric {
                volume_level: Some("loud".to_string()),
                mean: Some(0.2),
                brightness: Some(2750.4),
            }),
            ..AudioFrameMetric::default()
        };
        let quiet = AudioFrameMetric {
            energy: Some(EnergyMetric {
                volume_level: Some("quiet".to_string()),
                mean: None,
                brightness: None,
            }),
            ..AudioFrameMetric::default()
        };
        let audio = aggregate_audio(&[vec![loud.clone(), quiet, loud]]).unwrap();

        assert_eq!(audio.energy.predominant_volume, "loud");
        assert_eq!(audio.energy.volume_consistency, 0.75);
        assert_eq!(audio.energy.average_brightness, 2750.0);
        assert!((audio.energy.average_energy - 0.2).abs() < 1e-9);
    }
}

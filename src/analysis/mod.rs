//! Analytics core.
//!
//! Every function here is a pure transformation of its inputs. Nothing is
//! cached between calls and no clock is read; callers inject timestamps.

pub mod aggregator;
pub mod audio;
pub mod correlation;
pub mod insights;
pub mod progress;
pub mod stats;
pub mod trends;

pub use aggregator::{delivery_insights, delivery_scores, FillerLexicon, NonVerbalAggregator};
pub use correlation::{
    analyze_impact, assess, correlate, format_correlation_data, generate_action_items,
};
pub use progress::build_dashboard;

//! Report generation for session and progress analytics.

pub mod generator;

pub use generator::*;

//! Extraction accuracy tools

mod score_accuracy;

pub use score_accuracy::ScoreAccuracyTool;

//! Classifier training, evaluation, persistence and model selection.

pub mod artifact;
pub mod classifier;
pub mod eval;
pub mod sweep;

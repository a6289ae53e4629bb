//! Runtime configuration utilities for lexrel.

use std::env;

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Dimensionality of the pretrained word embeddings.
    pub embedding_dim: usize,
    /// Seed for word-dropout sampling during training.
    pub seed: u64,
    /// Iteration cap for the logistic optimizer.
    pub max_iterations: u64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let embedding_dim = env::var("EMBEDDING_DIM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let seed = env::var("LEXREL_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(133);
        let max_iterations = env::var("MAX_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200);

        Ok(Self {
            embedding_dim,
            seed,
            max_iterations,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            embedding_dim: 50,
            seed: 133,
            max_iterations: 200,
        }
    }
}

//! Persisted model artifacts.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use linfa_logistic::MultiFittedLogisticRegression;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::PipelineError, nlp::IndexTables};

/// A trained classifier bundled with the four symbol tables and the lemma
/// vector table required to reproduce its feature encoding at inference
/// time, without re-reading the original embeddings file.
#[derive(Serialize, Deserialize)]
pub struct Artifact {
    pub alpha: f64,
    pub dropout: f64,
    pub relations: Vec<String>,
    pub tables: IndexTables,
    pub word_vectors: Array2<f32>,
    pub model: MultiFittedLogisticRegression<f64, usize>,
}

impl Artifact {
    /// Write the artifact as JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer(file, self)?;
        info!(path = %path.display(), "saved model artifact");
        Ok(())
    }

    /// Restore a persisted artifact.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }
}

/// Artifact path for one intermediate sweep candidate: the base prefix
/// suffixed with the candidate's dropout value.
pub fn intermediate_path(prefix: &Path, dropout: f64) -> PathBuf {
    PathBuf::from(format!("{}.{:?}", prefix.display(), dropout))
}

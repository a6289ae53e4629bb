//! Error taxonomy for the path classification pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the pipeline stages.
///
/// Out-of-vocabulary paths are deliberately absent: they are a local,
/// recoverable condition handled by dropping the path and counting it,
/// never an error value.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A split references a relation missing from the relation vocabulary,
    /// or key/feature counts drifted between stages.
    #[error("data contract violation: {0}")]
    DataContract(String),

    /// A dataset pair references a term the corpus has never seen.
    #[error("unknown entity '{0}' in corpus")]
    UnknownEntity(String),

    /// Classifier fit or predict failed for one grid point. Aborts the
    /// whole sweep: partial grids cannot be safely compared.
    #[error("training failed at alpha={alpha}, dropout={dropout}: {source}")]
    Training {
        alpha: f64,
        dropout: f64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An input file exists but does not parse as expected.
    #[error("malformed input {}: {detail}", path.display())]
    Malformed { path: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Wrap a classifier failure with the grid point it occurred at.
    pub fn training<E>(alpha: f64, dropout: f64, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Training {
            alpha,
            dropout,
            source: Box::new(source),
        }
    }
}

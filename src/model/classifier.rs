//! Path-evidence relation classifier backed by multinomial logistic
//! regression.

use std::path::Path;

use linfa::{
    dataset::DatasetBase,
    prelude::{Fit, Predict},
};
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::{
    config::Settings,
    error::PipelineError,
    model::{
        artifact::Artifact,
        sweep::{GridPoint, SweepModel},
    },
    nlp::{paths::PathCounts, IndexTables},
};

/// Everything needed to construct one fresh classifier for a grid point.
///
/// Mirrors the construction contract: vocabulary sizes, relation count,
/// pretrained lemma embeddings and the current hyperparameters.
#[derive(Debug, Clone)]
pub struct ClassifierSpec {
    pub num_pos: usize,
    pub num_dep: usize,
    pub num_directions: usize,
    pub num_relations: usize,
    pub lemma_embeddings: Array2<f32>,
    pub relations: Vec<String>,
    pub hyper: GridPoint,
    pub seed: u64,
    pub max_iterations: u64,
}

/// Concrete classifier over per-pair path-count evidence.
///
/// Each pair is encoded as a dense vector: the count-weighted mean of
/// per-edge lemma embeddings, concatenated with count-normalised
/// pos/dep/dir histograms and a trailing no-evidence indicator, so a pair
/// with an empty mapping is itself a signal rather than a hole. Word
/// dropout zeroes a lemma's embedding contribution during training
/// encoding only.
pub struct PathRelationClassifier {
    spec: ClassifierSpec,
    fitted: Option<MultiFittedLogisticRegression<f64, usize>>,
}

impl PathRelationClassifier {
    pub fn new(spec: ClassifierSpec) -> Self {
        Self { spec, fitted: None }
    }

    /// Rebuild a fitted classifier from a persisted artifact, ready for
    /// inference on new pairs. The artifact carries the symbol tables and
    /// the lemma vector table, so no embedding file is needed; seed and
    /// iteration cap only matter on a refit and fall back to defaults.
    pub fn from_artifact(artifact: Artifact) -> Self {
        let defaults = Settings::default();
        let spec = ClassifierSpec {
            num_pos: artifact.tables.pos.len(),
            num_dep: artifact.tables.dep.len(),
            num_directions: artifact.tables.dir.len(),
            num_relations: artifact.relations.len(),
            lemma_embeddings: artifact.word_vectors,
            relations: artifact.relations,
            hyper: GridPoint {
                alpha: artifact.alpha,
                dropout: artifact.dropout,
            },
            seed: defaults.seed,
            max_iterations: defaults.max_iterations,
        };
        Self {
            spec,
            fitted: Some(artifact.model),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.spec.lemma_embeddings.ncols()
    }

    fn feature_dim(&self) -> usize {
        self.embedding_dim() + self.spec.num_pos + self.spec.num_dep + self.spec.num_directions + 1
    }

    /// Encode instances into the dense feature matrix. `rng` enables word
    /// dropout and is only passed during training.
    fn encode(
        &self,
        instances: &[PathCounts],
        mut rng: Option<&mut StdRng>,
    ) -> Result<Array2<f64>, PipelineError> {
        let emb_dim = self.embedding_dim();
        let dim = self.feature_dim();
        let pos_base = emb_dim;
        let dep_base = pos_base + self.spec.num_pos;
        let dir_base = dep_base + self.spec.num_dep;

        let mut rows = Vec::with_capacity(instances.len() * dim);
        for counts in instances {
            let mut row = vec![0.0f64; dim];
            let total: u32 = counts.values().sum();
            if total == 0 {
                row[dim - 1] = 1.0;
                rows.extend_from_slice(&row);
                continue;
            }

            for (path, &count) in counts {
                let weight = count as f64 / total as f64 / path.len().max(1) as f64;
                for edge in &path.edges {
                    let dropped = match rng.as_deref_mut() {
                        Some(r) => r.gen::<f64>() < self.spec.hyper.dropout,
                        None => false,
                    };
                    if !dropped {
                        let vector = self.spec.lemma_embeddings.row(edge.lemma as usize);
                        for (j, v) in vector.iter().enumerate() {
                            row[j] += weight * f64::from(*v);
                        }
                    }
                    row[pos_base + edge.pos as usize] += weight;
                    row[dep_base + edge.dep as usize] += weight;
                    row[dir_base + edge.dir as usize] += weight;
                }
            }
            rows.extend_from_slice(&row);
        }

        Array2::from_shape_vec((instances.len(), dim), rows).map_err(|e| {
            PipelineError::training(self.spec.hyper.alpha, self.spec.hyper.dropout, e)
        })
    }
}

impl SweepModel for PathRelationClassifier {
    fn fit(&mut self, instances: &[PathCounts], y: &[usize]) -> Result<(), PipelineError> {
        let GridPoint { alpha, dropout } = self.spec.hyper;
        if instances.len() != y.len() {
            return Err(PipelineError::DataContract(format!(
                "{} instances paired with {} labels",
                instances.len(),
                y.len()
            )));
        }
        if let Some(&max) = y.iter().max() {
            if max >= self.spec.num_relations {
                return Err(PipelineError::DataContract(format!(
                    "label id {max} exceeds relation count {}",
                    self.spec.num_relations
                )));
            }
        }
        let mut rng = StdRng::seed_from_u64(self.spec.seed);
        let x = self.encode(instances, Some(&mut rng))?;
        let y = Array1::from(y.to_vec());
        let dataset: DatasetBase<_, _> = DatasetBase::new(x, y);

        let model = MultiLogisticRegression::default()
            .alpha(alpha)
            .max_iterations(self.spec.max_iterations);
        let fitted = model
            .fit(&dataset)
            .map_err(|e| PipelineError::training(alpha, dropout, e))?;
        self.fitted = Some(fitted);
        info!(alpha, dropout, instances = instances.len(), "fit classifier");
        Ok(())
    }

    fn predict(&self, instances: &[PathCounts]) -> Result<Vec<usize>, PipelineError> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            PipelineError::DataContract("predict called before fit".to_string())
        })?;
        let x = self.encode(instances, None)?;
        Ok(fitted.predict(&x).to_vec())
    }

    fn save_model(&self, path: &Path, tables: &IndexTables) -> Result<(), PipelineError> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            PipelineError::DataContract("save_model called before fit".to_string())
        })?;
        let artifact = Artifact {
            alpha: self.spec.hyper.alpha,
            dropout: self.spec.hyper.dropout,
            relations: self.spec.relations.clone(),
            tables: tables.clone(),
            word_vectors: self.spec.lemma_embeddings.clone(),
            model: fitted.clone(),
        };
        artifact.save(path)
    }
}

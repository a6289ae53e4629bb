//! Path feature extraction and indexing layer.

pub mod embeddings;
pub mod index;
pub mod paths;
pub mod vectorizer;

use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    data::{corpus::KnowledgeSource, dataset::PairKey},
    error::PipelineError,
    nlp::{index::SymbolIndex, paths::PathCounts},
};

/// The four symbol tables needed to re-derive feature encoding at
/// inference time. Frozen once the loading pass completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexTables {
    pub lemma: SymbolIndex,
    pub pos: SymbolIndex,
    pub dep: SymbolIndex,
    pub dir: SymbolIndex,
}

/// Everything the sweep consumes: the embedding table, the frozen symbol
/// tables, and the per-pair path-count instances aligned with the
/// concatenated split keys.
#[derive(Debug)]
pub struct Prepared {
    pub word_vectors: Array2<f32>,
    pub tables: IndexTables,
    pub instances: Vec<PathCounts>,
    pub dropped_paths: usize,
    pub pairs_without_paths: usize,
}

/// Run vocabulary collection, embedding loading and the path-loading pass
/// once over the concatenated splits.
pub fn prepare(
    corpus: &dyn KnowledgeSource,
    dataset_keys: &[PairKey],
    embeddings_file: &Path,
    embedding_dim: usize,
) -> Result<Prepared, PipelineError> {
    let vocabulary = paths::collect_vocabulary(corpus, dataset_keys)?;
    let (word_vectors, lemma_index) =
        embeddings::load_embeddings(embeddings_file, &vocabulary, embedding_dim)?;
    let loaded = paths::load_paths(corpus, dataset_keys, &lemma_index)?;

    if loaded.instances.len() != dataset_keys.len() {
        return Err(PipelineError::DataContract(format!(
            "loader returned {} instances for {} pairs",
            loaded.instances.len(),
            dataset_keys.len()
        )));
    }

    info!(
        lemmas = lemma_index.len(),
        pos = loaded.pos_index.len(),
        dep = loaded.dep_index.len(),
        dir = loaded.dir_index.len(),
        "finalised symbol tables"
    );

    Ok(Prepared {
        word_vectors,
        tables: IndexTables {
            lemma: lemma_index,
            pos: loaded.pos_index,
            dep: loaded.dep_index,
            dir: loaded.dir_index,
        },
        instances: loaded.instances,
        dropped_paths: loaded.dropped_paths,
        pairs_without_paths: loaded.pairs_without_paths,
    })
}

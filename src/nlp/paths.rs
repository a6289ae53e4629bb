//! Vocabulary collection and the single path-loading pass.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::{
    data::{
        corpus::{EntityId, KnowledgeSource},
        dataset::PairKey,
    },
    error::PipelineError,
    nlp::{
        index::SymbolIndex,
        vectorizer::{self, VectorizedPath, EDGE_DELIMITER},
    },
};

/// Occurrence counts per vectorized path, for one entity pair. An empty
/// mapping is a legitimate outcome: the corpus holds no evidence.
pub type PathCounts = IndexMap<VectorizedPath, u32>;

/// Output of the path-loading pass, aligned index-for-index with the input
/// pair list.
#[derive(Debug)]
pub struct LoadedPaths {
    pub instances: Vec<PathCounts>,
    pub pos_index: SymbolIndex,
    pub dep_index: SymbolIndex,
    pub dir_index: SymbolIndex,
    /// Raw paths discarded because a lemma was out of vocabulary or the
    /// path string did not parse.
    pub dropped_paths: usize,
    /// Pairs whose mapping came out empty.
    pub pairs_without_paths: usize,
}

fn resolve_keys(
    corpus: &dyn KnowledgeSource,
    dataset_keys: &[PairKey],
) -> Result<Vec<(EntityId, EntityId)>, PipelineError> {
    dataset_keys
        .iter()
        .map(|(x, y)| Ok((corpus.entity_id(x)?, corpus.entity_id(y)?)))
        .collect()
}

/// Collect every lemma appearing in any path between the dataset pairs,
/// in first-seen order so downstream id assignment is reproducible.
pub fn collect_vocabulary(
    corpus: &dyn KnowledgeSource,
    dataset_keys: &[PairKey],
) -> Result<IndexSet<String>, PipelineError> {
    let keys = resolve_keys(corpus, dataset_keys)?;

    let mut vocabulary = IndexSet::new();
    for (x_id, y_id) in keys {
        for path in corpus.paths_between(x_id, y_id).keys() {
            for edge in path.split(EDGE_DELIMITER) {
                if let Some(lemma) = vectorizer::edge_lemma(edge) {
                    vocabulary.insert(lemma.to_string());
                }
            }
        }
    }
    info!(lemmas = vocabulary.len(), "collected path vocabulary");
    Ok(vocabulary)
}

/// Run the single vectorization pass over the concatenated splits.
///
/// The pos/dep/dir tables are created here, seeded with the sentinel, and
/// grown only during this pass; callers treat them as read-only afterwards.
/// Unvectorizable paths are dropped and counted, never fatal. The returned
/// instance list preserves the input pair order exactly.
pub fn load_paths(
    corpus: &dyn KnowledgeSource,
    dataset_keys: &[PairKey],
    lemma_index: &SymbolIndex,
) -> Result<LoadedPaths, PipelineError> {
    let keys = resolve_keys(corpus, dataset_keys)?;

    let mut pos_index = SymbolIndex::with_sentinel();
    let mut dep_index = SymbolIndex::with_sentinel();
    let mut dir_index = SymbolIndex::with_sentinel();

    let mut instances = Vec::with_capacity(keys.len());
    let mut dropped_paths = 0usize;
    let mut pairs_without_paths = 0usize;

    for (i, (x_id, y_id)) in keys.iter().enumerate() {
        let raw_paths = corpus.paths_between(*x_id, *y_id);
        let retrieved = raw_paths.len();

        let mut counts = PathCounts::new();
        for (raw, count) in raw_paths {
            match vectorizer::vectorize_path(
                &raw,
                lemma_index,
                &mut pos_index,
                &mut dep_index,
                &mut dir_index,
            ) {
                Some(path) => {
                    *counts.entry(path).or_insert(0) += count;
                }
                None => dropped_paths += 1,
            }
        }

        if counts.len() != retrieved {
            debug!(
                pair = ?dataset_keys[i],
                retrieved,
                kept = counts.len(),
                "dropped paths for pair"
            );
        }
        if counts.is_empty() {
            pairs_without_paths += 1;
        }
        instances.push(counts);
    }

    info!(
        pairs_without_paths,
        all_pairs = dataset_keys.len(),
        dropped_paths,
        pos = pos_index.len(),
        dep = dep_index.len(),
        dir = dir_index.len(),
        "loaded path files"
    );

    Ok(LoadedPaths {
        instances,
        pos_index,
        dep_index,
        dir_index,
        dropped_paths,
        pairs_without_paths,
    })
}

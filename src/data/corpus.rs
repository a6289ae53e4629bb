//! Processed-corpus access: entity ids and the paths observed between them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::error::PipelineError;

/// Dense id of a corpus entity (term).
pub type EntityId = u64;

/// Accessor contract for a processed corpus resource.
///
/// `entity_id` fails for terms the corpus has never seen; that is fatal for
/// the run, not recoverable per pair. `paths_between` returns the raw
/// dependency paths with their occurrence counts, empty when the corpus
/// holds no evidence for the pair.
pub trait KnowledgeSource {
    fn entity_id(&self, word: &str) -> Result<EntityId, PipelineError>;
    fn paths_between(&self, x: EntityId, y: EntityId) -> IndexMap<String, u32>;
}

#[derive(Debug, Deserialize)]
struct PathRow {
    x_id: EntityId,
    y_id: EntityId,
    path: String,
    count: u32,
}

/// File-backed corpus resource under a prefix directory.
///
/// `entities.tsv` holds one term per line, id = line number;
/// `paths.tsv` holds `x_id \t y_id \t raw_path \t count` rows.
#[derive(Debug, Default)]
pub struct FileCorpus {
    entities: IndexMap<String, EntityId>,
    paths: IndexMap<(EntityId, EntityId), IndexMap<String, u32>>,
}

impl FileCorpus {
    /// Load both corpus files eagerly.
    pub fn open(prefix: &Path) -> Result<Self, PipelineError> {
        let entities_path = prefix.join("entities.tsv");
        let mut entities = IndexMap::new();
        for (line_no, line) in std::fs::read_to_string(&entities_path)?.lines().enumerate() {
            let term = line.trim();
            if term.is_empty() {
                continue;
            }
            entities.insert(term.to_string(), line_no as EntityId);
        }

        let paths_path = prefix.join("paths.tsv");
        let mut paths: IndexMap<(EntityId, EntityId), IndexMap<String, u32>> = IndexMap::new();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_path(&paths_path)?;
        for row in reader.deserialize() {
            let row: PathRow = row.map_err(|e| malformed(&paths_path, e))?;
            *paths
                .entry((row.x_id, row.y_id))
                .or_default()
                .entry(row.path)
                .or_insert(0) += row.count;
        }

        info!(
            entities = entities.len(),
            pairs = paths.len(),
            prefix = %prefix.display(),
            "loaded corpus resource"
        );
        Ok(Self { entities, paths })
    }
}

impl KnowledgeSource for FileCorpus {
    fn entity_id(&self, word: &str) -> Result<EntityId, PipelineError> {
        self.entities
            .get(word)
            .copied()
            .ok_or_else(|| PipelineError::UnknownEntity(word.to_string()))
    }

    fn paths_between(&self, x: EntityId, y: EntityId) -> IndexMap<String, u32> {
        self.paths.get(&(x, y)).cloned().unwrap_or_default()
    }
}

fn malformed(path: &PathBuf, e: csv::Error) -> PipelineError {
    PipelineError::Malformed {
        path: path.clone(),
        detail: e.to_string(),
    }
}

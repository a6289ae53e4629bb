//! Relation vocabulary, split loading and dataset assembly.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::{error::PipelineError, nlp::paths::PathCounts};

/// Ordered (x, y) surface-word pair identifying one dataset row.
pub type PairKey = (String, String);

/// Closed relation vocabulary with its label index.
///
/// Class ids follow the insertion order of the relation list, and id to
/// label inversion round-trips for every relation.
#[derive(Debug, Clone)]
pub struct RelationVocabulary {
    relations: Vec<String>,
    index: IndexMap<String, usize>,
}

impl RelationVocabulary {
    pub fn from_relations(relations: Vec<String>) -> Result<Self, PipelineError> {
        let mut index = IndexMap::new();
        for (i, relation) in relations.iter().enumerate() {
            if index.insert(relation.clone(), i).is_some() {
                return Err(PipelineError::DataContract(format!(
                    "duplicate relation '{relation}' in relation list"
                )));
            }
        }
        Ok(Self { relations, index })
    }

    pub fn id(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, id: usize) -> Option<&str> {
        self.relations.get(id).map(String::as_str)
    }

    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

/// Load `relations.txt`, one relation per line.
pub fn load_relations(path: &Path) -> Result<RelationVocabulary, PipelineError> {
    let relations: Vec<String> = std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if relations.is_empty() {
        return Err(PipelineError::DataContract(format!(
            "relation list {} is empty",
            path.display()
        )));
    }
    RelationVocabulary::from_relations(relations)
}

#[derive(Debug, Deserialize)]
struct SplitRow {
    x: String,
    y: String,
    label: String,
}

/// Load one `x \t y \t label` split, preserving row order.
///
/// Every label must appear in the relation vocabulary; a miss is a data
/// contract violation between the split file and the relations file.
pub fn load_split(
    path: &Path,
    relations: &RelationVocabulary,
) -> Result<IndexMap<PairKey, String>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;

    let mut split = IndexMap::new();
    for row in reader.deserialize() {
        let row: SplitRow = row.map_err(|e| PipelineError::Malformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        if relations.id(&row.label).is_none() {
            return Err(PipelineError::DataContract(format!(
                "{}: relation '{}' not in relation list",
                path.display(),
                row.label
            )));
        }
        split.insert((row.x, row.y), row.label);
    }
    Ok(split)
}

/// The three splits with labels already converted to class ids, plus the
/// bookkeeping needed to re-slice aligned feature lists.
#[derive(Debug)]
pub struct DatasetAssembly {
    pub relations: RelationVocabulary,
    pub train_keys: Vec<PairKey>,
    pub val_keys: Vec<PairKey>,
    pub test_keys: Vec<PairKey>,
    pub y_train: Vec<usize>,
    pub y_val: Vec<usize>,
    pub y_test: Vec<usize>,
}

impl DatasetAssembly {
    /// Load `relations.txt`, `train.tsv`, `val.tsv` and `test.tsv` from a
    /// dataset directory.
    pub fn load(dir: &Path) -> Result<Self, PipelineError> {
        let relations = load_relations(&dir.join("relations.txt"))?;
        let train = load_split(&dir.join("train.tsv"), &relations)?;
        let val = load_split(&dir.join("val.tsv"), &relations)?;
        let test = load_split(&dir.join("test.tsv"), &relations)?;
        info!(
            train = train.len(),
            val = val.len(),
            test = test.len(),
            relations = relations.len(),
            "loaded dataset"
        );
        Self::from_splits(relations, train, val, test)
    }

    /// Assemble already-loaded splits; exposed for tests.
    pub fn from_splits(
        relations: RelationVocabulary,
        train: IndexMap<PairKey, String>,
        val: IndexMap<PairKey, String>,
        test: IndexMap<PairKey, String>,
    ) -> Result<Self, PipelineError> {
        let to_ids = |split: &IndexMap<PairKey, String>| -> Result<Vec<usize>, PipelineError> {
            split
                .values()
                .map(|label| {
                    relations.id(label).ok_or_else(|| {
                        PipelineError::DataContract(format!(
                            "relation '{label}' not in relation list"
                        ))
                    })
                })
                .collect()
        };
        let y_train = to_ids(&train)?;
        let y_val = to_ids(&val)?;
        let y_test = to_ids(&test)?;

        Ok(Self {
            relations,
            train_keys: train.into_keys().collect(),
            val_keys: val.into_keys().collect(),
            test_keys: test.into_keys().collect(),
            y_train,
            y_val,
            y_test,
        })
    }

    /// All pair keys in the fixed order train, val, test. This is the one
    /// order the Vocabulary & Path Loader runs in, so indices are shared
    /// across splits.
    pub fn dataset_keys(&self) -> Vec<PairKey> {
        let mut keys =
            Vec::with_capacity(self.train_keys.len() + self.val_keys.len() + self.test_keys.len());
        keys.extend(self.train_keys.iter().cloned());
        keys.extend(self.val_keys.iter().cloned());
        keys.extend(self.test_keys.iter().cloned());
        keys
    }

    /// Re-slice the aligned per-pair feature list back into per-split
    /// slices. Labels and features are never re-paired by key afterwards,
    /// so any count drift here is a defect.
    pub fn slice_instances<'a>(
        &self,
        instances: &'a [PathCounts],
    ) -> Result<(&'a [PathCounts], &'a [PathCounts], &'a [PathCounts]), PipelineError> {
        let (n_train, n_val, n_test) = (
            self.train_keys.len(),
            self.val_keys.len(),
            self.test_keys.len(),
        );
        if instances.len() != n_train + n_val + n_test {
            return Err(PipelineError::DataContract(format!(
                "feature list length {} does not match split sizes {}+{}+{}",
                instances.len(),
                n_train,
                n_val,
                n_test
            )));
        }
        let (train, rest) = instances.split_at(n_train);
        let (val, test) = rest.split_at(n_val);
        Ok((train, val, test))
    }
}

//! Pretrained word-embedding loading against a fixed vocabulary.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indexmap::IndexSet;
use ndarray::Array2;
use tracing::{info, warn};

use crate::{error::PipelineError, nlp::index::SymbolIndex};

/// Load text-format embeddings (`word v1 .. vd` per line), keeping only
/// rows whose word appears in `vocabulary`.
///
/// Returns the vector table and the lemma index it is row-aligned with.
/// Row 0 of the table is all zeros and pairs with the index's `#NOPATH#`
/// sentinel, so the lemma table inverts the same way as pos/dep/dir.
pub fn load_embeddings(
    path: &Path,
    vocabulary: &IndexSet<String>,
    dim: usize,
) -> Result<(Array2<f32>, SymbolIndex), PipelineError> {
    let reader = BufReader::new(File::open(path)?);

    let mut lemma_index = SymbolIndex::with_sentinel();
    let mut rows: Vec<f32> = vec![0.0; dim];

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else {
            continue;
        };
        if !vocabulary.contains(word) {
            continue;
        }

        let values: Vec<f32> = fields
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|e| PipelineError::Malformed {
                path: path.to_path_buf(),
                detail: format!("line {}: {e}", line_no + 1),
            })?;
        if values.len() != dim {
            return Err(PipelineError::Malformed {
                path: path.to_path_buf(),
                detail: format!(
                    "line {}: expected {dim} components, found {}",
                    line_no + 1,
                    values.len()
                ),
            });
        }

        // Duplicate lines keep the first-seen vector.
        let before = lemma_index.len();
        lemma_index.lookup_or_insert(word);
        if lemma_index.len() > before {
            rows.extend_from_slice(&values);
        }
    }

    let covered = lemma_index.len() - 1;
    if covered < vocabulary.len() {
        warn!(
            missing = vocabulary.len() - covered,
            vocabulary = vocabulary.len(),
            "some corpus lemmas have no pretrained vector"
        );
    }
    info!(lemmas = covered, dim, "initialised word embeddings");

    let table = Array2::from_shape_vec((lemma_index.len(), dim), rows).map_err(|e| {
        PipelineError::Malformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
    })?;
    Ok((table, lemma_index))
}

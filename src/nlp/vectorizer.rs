//! Raw dependency-path strings to integer-id edge sequences.

use serde::{Deserialize, Serialize};

use crate::nlp::index::SymbolIndex;

/// Separates edges within a raw path string.
pub const EDGE_DELIMITER: char = '_';
/// Separates the lemma/pos/dep/dir fields within one edge.
pub const FIELD_DELIMITER: char = '/';

/// One dependency edge, fully resolved against the four symbol tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathEdge {
    pub lemma: u32,
    pub pos: u32,
    pub dep: u32,
    pub dir: u32,
}

/// An ordered edge sequence; the unit the classifier counts evidence in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorizedPath {
    pub edges: Vec<PathEdge>,
}

impl VectorizedPath {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Vectorize one raw path, growing the pos/dep/dir tables on demand.
///
/// The lemma table is fixed by the embedding vocabulary and only consulted:
/// a single out-of-vocabulary lemma voids the whole path (`None`), never a
/// partial encoding. Empty paths and edges that do not split into exactly
/// four fields are rejected the same way; an empty per-pair mapping already
/// represents "no evidence", so an empty path has no meaning of its own.
pub fn vectorize_path(
    raw: &str,
    lemma_index: &SymbolIndex,
    pos_index: &mut SymbolIndex,
    dep_index: &mut SymbolIndex,
    dir_index: &mut SymbolIndex,
) -> Option<VectorizedPath> {
    if raw.is_empty() {
        return None;
    }

    let mut edges = Vec::new();
    for edge in raw.split(EDGE_DELIMITER) {
        let mut fields = edge.split(FIELD_DELIMITER);
        let (Some(lemma), Some(pos), Some(dep), Some(dir), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return None;
        };

        let lemma = lemma_index.get(lemma)?;
        edges.push(PathEdge {
            lemma,
            pos: pos_index.lookup_or_insert(pos),
            dep: dep_index.lookup_or_insert(dep),
            dir: dir_index.lookup_or_insert(dir),
        });
    }

    Some(VectorizedPath { edges })
}

/// Lemma field of one edge, used for vocabulary collection.
pub fn edge_lemma(edge: &str) -> Option<&str> {
    edge.split(FIELD_DELIMITER).next().filter(|l| !l.is_empty())
}

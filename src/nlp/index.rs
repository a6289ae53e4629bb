//! Deterministic string-to-id symbol tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel token reserved at id 0 of every index, meaning "no information".
pub const NO_PATH: &str = "#NOPATH#";

/// Append-only token table with dense ids assigned in first-seen order.
///
/// Ids are significant: they are inverted (id to token) for artifact
/// persistence and debugging, so inversion must be a pure function of
/// insertion order. Construction is strictly sequential; once the loading
/// pass finishes, the table is only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolIndex {
    tokens: IndexMap<String, u32>,
}

impl SymbolIndex {
    /// Empty table with no reserved entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the `#NOPATH#` sentinel at id 0.
    pub fn with_sentinel() -> Self {
        let mut index = Self::default();
        index.lookup_or_insert(NO_PATH);
        index
    }

    /// Return the id for `token`, allocating the next dense id on first
    /// sight. Idempotent: repeated calls return the same id.
    pub fn lookup_or_insert(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.tokens.get(token) {
            return id;
        }
        let id = self.tokens.len() as u32;
        self.tokens.insert(token.to_string(), id);
        id
    }

    /// Read-only lookup.
    pub fn get(&self, token: &str) -> Option<u32> {
        self.tokens.get(token).copied()
    }

    /// Invert an id back to its token.
    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get_index(id as usize).map(|(t, _)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in insertion (id) order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }
}

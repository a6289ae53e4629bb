//! Dependency-path lexical relation classification toolkit.
//!
//! Pipeline: resolve dataset word pairs against a processed corpus, mine
//! the dependency paths connecting each pair, vectorize the paths against
//! four symbol tables (lemma, part-of-speech, dependency label, direction),
//! then tune a relation classifier over a hyperparameter grid and keep the
//! model with the best validation F1.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod nlp;

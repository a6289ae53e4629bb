//! Corpus access and dataset assembly layer.

pub mod corpus;
pub mod dataset;

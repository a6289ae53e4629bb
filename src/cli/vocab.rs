//! CLI entry-point for vocabulary and path-coverage diagnostics.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{corpus::FileCorpus, dataset::DatasetAssembly},
    nlp,
};

/// Args for the `vocab` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to the corpus resource directory.
    #[arg(long)]
    pub corpus: PathBuf,
    /// Path to the train/val/test/relations data directory.
    #[arg(long)]
    pub dataset: PathBuf,
    /// Path to the word embeddings file.
    #[arg(long)]
    pub embeddings: PathBuf,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let assembly = DatasetAssembly::load(&args.dataset)?;
    let corpus = FileCorpus::open(&args.corpus)?;

    let dataset_keys = assembly.dataset_keys();
    let prepared = nlp::prepare(
        &corpus,
        &dataset_keys,
        &args.embeddings,
        settings.embedding_dim,
    )?;

    info!(
        pairs = dataset_keys.len(),
        lemmas = prepared.tables.lemma.len(),
        pos = prepared.tables.pos.len(),
        dep = prepared.tables.dep.len(),
        dir = prepared.tables.dir.len(),
        pairs_without_paths = prepared.pairs_without_paths,
        dropped_paths = prepared.dropped_paths,
        "vocabulary report"
    );
    Ok(())
}

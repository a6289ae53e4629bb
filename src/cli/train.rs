//! CLI entry-point for the full train/tune/select pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{corpus::FileCorpus, dataset::DatasetAssembly},
    model::{
        classifier::{ClassifierSpec, PathRelationClassifier},
        sweep::{self, GridPoint, SweepData},
    },
    nlp,
};

/// Args for the `train` command.
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
    /// Where to store the selected model (intermediates get a suffix).
    #[arg(long)]
    pub model_prefix: PathBuf,
    /// Learning-rate grid axis.
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.001])]
    pub alphas: Vec<f64>,
    /// Word-dropout grid axis.
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.2, 0.4])]
    pub dropouts: Vec<f64>,
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
    let (x_train, x_val, x_test) = assembly.slice_instances(&prepared.instances)?;

    let points = sweep::grid(&args.alphas, &args.dropouts);
    let relations = assembly.relations.relations();
    let factory = |point: GridPoint| {
        PathRelationClassifier::new(ClassifierSpec {
            num_pos: prepared.tables.pos.len(),
            num_dep: prepared.tables.dep.len(),
            num_directions: prepared.tables.dir.len(),
            num_relations: relations.len(),
            lemma_embeddings: prepared.word_vectors.clone(),
            relations: relations.to_vec(),
            hyper: point,
            seed: settings.seed,
            max_iterations: settings.max_iterations,
        })
    };

    let outcome = sweep::run_sweep(
        &points,
        factory,
        SweepData {
            x_train,
            y_train: &assembly.y_train,
            x_val,
            y_val: &assembly.y_val,
            x_test,
            y_test: &assembly.y_test,
        },
        relations,
        &prepared.tables,
        &args.model_prefix,
    )?;

    info!(
        alpha = outcome.best.alpha,
        dropout = outcome.best.dropout,
        val_f1 = outcome.best_val_f1,
        test_f1 = outcome.test_metrics.f1,
        model = %args.model_prefix.display(),
        "finished hyperparameter sweep"
    );
    Ok(())
}

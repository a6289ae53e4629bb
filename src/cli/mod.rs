//! Command-line interface wiring for lexrel.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod train;
pub mod vocab;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Dependency-path relation classifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Train(args) => train::run(args, settings).await,
            Commands::Vocab(args) => vocab::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tune and train the path-based relation classifier.
    Train(train::Args),
    /// Report vocabulary and path coverage for a dataset.
    Vocab(vocab::Args),
}

//! Entry point wiring CLI dispatch to pipeline modules.

use anyhow::Result;
use lexrel::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(
        embedding_dim = settings.embedding_dim,
        seed = settings.seed,
        max_iterations = settings.max_iterations,
        "starting lexrel"
    );
    cli.dispatch(settings).await
}

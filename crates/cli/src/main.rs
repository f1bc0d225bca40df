use anyhow::Context;

use stockkeeper_infra::{StockService, StoreConfig};

fn main() -> anyhow::Result<()> {
    stockkeeper_observability::init();

    let config = StoreConfig::from_env();
    tracing::info!(path = %config.data_file.display(), "starting stockkeeper");

    let mut service = StockService::open(config.snapshot_store());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let session = stockkeeper_cli::run(&mut service, stdin.lock(), stdout.lock());

    // Close first so a pending snapshot is written even when the shell failed.
    service
        .close()
        .with_context(|| format!("failed to write final snapshot to {}", config.data_file.display()))?;
    session.context("interactive shell failed")?;
    Ok(())
}

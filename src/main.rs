use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("Sync failed: {err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    readsync::logging::init().context("init logging")?;

    let cli = readsync::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        readsync::cli::Command::Sync(args) => {
            readsync::sync::run(args).await.context("sync")?;
        }
    }

    Ok(())
}

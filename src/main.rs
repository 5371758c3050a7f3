mod cli;
mod error;
mod wire;

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use rolba_config::Config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())))
        .with_writer(std::io::stderr)
        .init();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let pipeline = wire::pipeline(&config, args)?;
    tracing::info!(sources = pipeline.len(), email = args.sends_email(), dry_run = args.dry_run, "Starting run");
    let sections = pipeline.run().await.or_raise(|| ErrorKind::Run)?;
    let new: usize = sections.iter().map(|section| section.records.len()).sum();
    tracing::info!(sections = sections.len(), new, "Finished");
    Ok(())
}

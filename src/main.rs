mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use platform_router_core::{
    Cancellation, Error,
    session::{run_session, selection_channel},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Args, HostConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = HostConfig::load(args.config.as_deref())?.merge(args);
    let model_config = config.model_config()?;
    let selection = config.selection()?;

    let (sender, receiver) = selection_channel();
    match selection {
        Some(selection) => sender.send(selection)?,
        None => drop(sender),
    }

    let cancel = Cancellation::new();
    match run_session(
        &model_config,
        &config.search_term,
        receiver,
        output::print_catalog,
        &cancel,
    ) {
        Ok(plan) => {
            output::print_plan(&plan);
            output::write_plan(&plan, &config.output)?;
            info!("Path written to {}", config.output.display());
            Ok(())
        }
        Err(Error::SelectionAborted) if selection.is_none() => {
            info!("No platforms selected, pass --source-platform, --source-service, --dest-platform and --dest-service to plan a transfer");
            Ok(())
        }
        Err(e) => Err(e).context("planning the transfer failed"),
    }
}

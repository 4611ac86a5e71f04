use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use crate::{
  api::HttpRepoApi,
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod mode;
pub mod model;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let cli = Cli::parse();
  let mut config = Config::new()?.with_api_url(cli.api_url);
  if let Some(tick_rate) = cli.tick_rate {
    config.ui.tick_rate = tick_rate;
  }
  if let Some(frame_rate) = cli.frame_rate {
    config.ui.frame_rate = frame_rate;
  }

  info!("Using backend at {}", config.api.base_url);
  let api = HttpRepoApi::new(&config.api)?;
  let mut app = App::new(&config.ui, Arc::new(api), cli.repo);
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}

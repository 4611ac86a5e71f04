use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  /// Repository URL to list as soon as the explorer starts
  #[arg(short, long, value_name = "URL")]
  pub repo: Option<String>,

  /// Base URL of the explorer backend, overrides the configured `api.base_url`
  #[arg(short, long, value_name = "URL")]
  pub api_url: Option<String>,

  /// Tick rate, i.e. number of ticks per second
  #[arg(short, long, value_name = "FLOAT")]
  pub tick_rate: Option<f64>,

  /// Frame rate, i.e. number of frames per second
  #[arg(short, long, value_name = "FLOAT")]
  pub frame_rate: Option<f64>,
}

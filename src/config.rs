use color_eyre::eyre::Result;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::utils::{PROJECT_NAME, get_config_dir};

const DEFAULT_CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UiConfig {
  pub tick_rate: f64,
  pub frame_rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  pub ui: UiConfig,
}

impl Config {
  /// Embedded defaults, then any config file in the config directory, then
  /// `REPO_EXPLORER_<SECTION>__<KEY>` environment variables.
  pub fn new() -> Result<Self> {
    let config_dir = get_config_dir();
    let mut builder = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Json5));

    let config_files = [
      ("config.json5", FileFormat::Json5),
      ("config.json", FileFormat::Json),
      ("config.yaml", FileFormat::Yaml),
      ("config.toml", FileFormat::Toml),
      ("config.ini", FileFormat::Ini),
    ];
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      if path.exists() {
        info!("Reading config from {}", path.display());
      }
      builder = builder.add_source(File::from(path).format(*format).required(false));
    }
    builder = builder.add_source(
      Environment::with_prefix(PROJECT_NAME.as_str()).prefix_separator("_").separator("__").try_parsing(true),
    );

    let cfg: Self = builder.build()?.try_deserialize()?;
    Ok(cfg)
  }

  pub fn with_api_url(mut self, base_url: Option<String>) -> Self {
    if let Some(base_url) = base_url {
      self.api.base_url = base_url;
    }
    self
  }
}

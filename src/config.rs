//! Server configuration: CLI flags with environment overrides.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
/// Overrides `--port` when set.
pub const PORT_ENV: &str = "PORT";
/// Overrides `--data-dir` when set.
pub const DATA_DIR_ENV: &str = "GRAPH_RUNNER_DATA_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServerConfigError {
  #[error("{var}={value} is not a valid port")]
  InvalidPort { var: &'static str, value: String },
}

/// Resolved settings used by the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub port: u16,
  /// Run results are written under `<data_dir>/results`; in memory when unset.
  pub data_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      data_dir: None,
    }
  }
}

impl ServerConfig {
  /// Env vars override flags. Empty env values count as unset.
  pub fn resolve<F>(
    port: u16,
    data_dir: Option<PathBuf>,
    lookup: F,
  ) -> Result<Self, ServerConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let port = match var(PORT_ENV) {
      Some(value) => value
        .trim()
        .parse::<u16>()
        .map_err(|_| ServerConfigError::InvalidPort {
          var: PORT_ENV,
          value,
        })?,
      None => port,
    };
    let data_dir = var(DATA_DIR_ENV).map(PathBuf::from).or(data_dir);
    Ok(Self { port, data_dir })
  }

  /// [ServerConfig::resolve] against the process environment.
  pub fn from_env(port: u16, data_dir: Option<PathBuf>) -> Result<Self, ServerConfigError> {
    Self::resolve(port, data_dir, |key| env::var(key).ok())
  }
}

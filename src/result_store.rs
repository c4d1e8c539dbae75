//! Run result persistence keyed by `run_id`.
//!
//! - [MemoryResultStore]: process-local map.
//! - [DirResultStore]: one pretty-printed JSON file per run under `<dir>/results/`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::types::RunResult;

/// Subdirectory of the data dir holding run results.
pub const RESULTS_DIRNAME: &str = "results";

#[async_trait]
pub trait ResultStore: Send + Sync {
  async fn save(&self, result: &RunResult) -> Result<(), StoreError>;
  async fn load(&self, run_id: &str) -> Result<Option<RunResult>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryResultStore {
  results: RwLock<HashMap<String, RunResult>>,
}

impl MemoryResultStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
  async fn save(&self, result: &RunResult) -> Result<(), StoreError> {
    self
      .results
      .write()
      .await
      .insert(result.run_id.clone(), result.clone());
    Ok(())
  }

  async fn load(&self, run_id: &str) -> Result<Option<RunResult>, StoreError> {
    Ok(self.results.read().await.get(run_id).cloned())
  }
}

/// Saves a run result to `path` as JSON, creating parent directories.
#[instrument(level = "trace", skip(path, result))]
pub async fn save_run_result(path: &Path, result: &RunResult) -> Result<(), StoreError> {
  let json = serde_json::to_string_pretty(result)?;
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, json).await?;
  Ok(())
}

/// Loads a run result from `path`. Errors if the file is missing or not valid JSON.
#[instrument(level = "trace", skip(path))]
pub async fn load_run_result(path: &Path) -> Result<RunResult, StoreError> {
  let bytes = tokio::fs::read(path).await?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Result store backed by a data directory.
#[derive(Debug, Clone)]
pub struct DirResultStore {
  root: PathBuf,
}

impl DirResultStore {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    Self {
      root: data_dir.into().join(RESULTS_DIRNAME),
    }
  }

  /// File path for `run_id`. Ids containing path separators are rejected.
  fn path_for(&self, run_id: &str) -> Option<PathBuf> {
    let safe = !run_id.is_empty()
      && run_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    safe.then(|| self.root.join(format!("{run_id}.json")))
  }
}

#[async_trait]
impl ResultStore for DirResultStore {
  async fn save(&self, result: &RunResult) -> Result<(), StoreError> {
    let path = self.path_for(&result.run_id).ok_or_else(|| {
      std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("invalid run id '{}'", result.run_id),
      )
    })?;
    save_run_result(&path, result).await?;
    debug!(path = %path.display(), "run result saved");
    Ok(())
  }

  async fn load(&self, run_id: &str) -> Result<Option<RunResult>, StoreError> {
    let Some(path) = self.path_for(run_id) else {
      return Ok(None);
    };
    if !tokio::fs::try_exists(&path).await? {
      return Ok(None);
    }
    load_run_result(&path).await.map(Some)
  }
}

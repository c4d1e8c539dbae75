//! Run preconditions, checked before any scheduling.

use tracing::{instrument, warn};

use crate::catalog::Catalog;
use crate::error::{ConfigError, RunError};
use crate::types::RunConfig;

/// Rejects conflicting enable/disable lists, unknown or under-supplied roots, and unknown or
/// empty overwrites. Reads the catalog only.
#[instrument(level = "trace", skip_all)]
pub async fn check_config(catalog: &dyn Catalog, config: &RunConfig) -> Result<(), RunError> {
  if !config.enable_list.is_empty() && !config.disable_list.is_empty() {
    warn!("both enable_list and disable_list provided");
    return Err(ConfigError::ConflictingLists.into());
  }

  for (node_id, input) in &config.root_inputs {
    let root = catalog
      .find_node(node_id)
      .await?
      .ok_or_else(|| ConfigError::RootNotFound(node_id.clone()))?;
    let missing = root.missing_input_keys(&input.data_in);
    if !missing.is_empty() {
      warn!(node_id = %node_id, missing = ?missing, "incomplete root input");
      return Err(
        ConfigError::IncompleteRootInput {
          node_id: node_id.clone(),
          missing,
        }
        .into(),
      );
    }
  }

  for (node_id, input) in &config.data_overwrites {
    if catalog.find_node(node_id).await?.is_none() {
      return Err(ConfigError::OverwriteNotFound(node_id.clone()).into());
    }
    if input.data_in.is_empty() {
      return Err(ConfigError::EmptyOverwrite(node_id.clone()).into());
    }
  }
  Ok(())
}

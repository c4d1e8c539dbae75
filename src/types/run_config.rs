//! Per-run request configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DataMap;

/// Input supplied for one node: a root's initial data or a mid-run overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
  pub node_id: String,
  #[serde(default)]
  pub data_in: DataMap,
}

impl NodeInput {
  pub fn new(node_id: impl Into<String>, data_in: DataMap) -> Self {
    Self {
      node_id: node_id.into(),
      data_in,
    }
  }
}

/// Per-run request configuration.
///
/// `enable_list` and `disable_list` are mutually exclusive; the engine rejects a config that
/// fills both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
  /// Entry nodes keyed by `node_id`.
  pub root_inputs: BTreeMap<String, NodeInput>,
  /// Inputs that replace a node's `data_in` when it is dequeued.
  #[serde(default)]
  pub data_overwrites: BTreeMap<String, NodeInput>,
  #[serde(default)]
  pub enable_list: Vec<String>,
  #[serde(default)]
  pub disable_list: Vec<String>,
}

impl RunConfig {
  pub fn with_root(mut self, node_id: impl Into<String>, data_in: DataMap) -> Self {
    let node_id = node_id.into();
    self
      .root_inputs
      .insert(node_id.clone(), NodeInput::new(node_id, data_in));
    self
  }

  pub fn with_overwrite(mut self, node_id: impl Into<String>, data_in: DataMap) -> Self {
    let node_id = node_id.into();
    self
      .data_overwrites
      .insert(node_id.clone(), NodeInput::new(node_id, data_in));
    self
  }

  pub fn with_enable_list<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.enable_list = ids.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_disable_list<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.disable_list = ids.into_iter().map(Into::into).collect();
    self
  }

  /// Initial enablement of `node_id` derived from the enable/disable lists.
  ///
  /// `None` when neither list is supplied.
  pub fn initial_enablement(&self, node_id: &str) -> Option<bool> {
    let mut enabled = None;
    if !self.enable_list.is_empty() {
      enabled = Some(self.enable_list.iter().any(|id| id == node_id));
    }
    if !self.disable_list.is_empty() {
      enabled = Some(!self.disable_list.iter().any(|id| id == node_id));
    }
    enabled
  }
}

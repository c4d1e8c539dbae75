//! A directed edge between two catalog nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed edge between two catalog nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
  #[serde(default)]
  pub id: Uuid,
  /// Catalog id of the source node.
  pub src_node: Uuid,
  /// Catalog id of the destination node.
  pub dst_node: Uuid,
  /// Declared key renames for propagated data. Not applied during a run.
  #[serde(default)]
  pub src_to_dst_data_keys: BTreeMap<String, String>,
}

impl Edge {
  pub fn new(src_node: Uuid, dst_node: Uuid) -> Self {
    Self {
      id: Uuid::nil(),
      src_node,
      dst_node,
      src_to_dst_data_keys: BTreeMap::new(),
    }
  }
}

//! A computation node stored in the catalog.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DataMap;

/// A computation node stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  /// Catalog id, assigned on create.
  #[serde(default)]
  pub id: Uuid,
  /// User-facing identifier, unique within the catalog.
  pub node_id: String,
  /// Declared input keys; a root input must supply all of them.
  #[serde(default)]
  pub data_in: DataMap,
  #[serde(default)]
  pub data_out: DataMap,
  /// Incoming edge ids.
  #[serde(default)]
  pub paths_in: Vec<Uuid>,
  /// Outgoing edge ids.
  #[serde(default)]
  pub paths_out: Vec<Uuid>,
}

impl Node {
  pub fn new(node_id: impl Into<String>) -> Self {
    Self {
      id: Uuid::nil(),
      node_id: node_id.into(),
      data_in: DataMap::new(),
      data_out: DataMap::new(),
      paths_in: vec![],
      paths_out: vec![],
    }
  }

  /// Declared `data_in` keys missing from `supplied`.
  pub fn missing_input_keys(&self, supplied: &DataMap) -> Vec<String> {
    self
      .data_in
      .keys()
      .filter(|k| !supplied.contains_key(k.as_str()))
      .cloned()
      .collect()
  }
}

//! Run-scoped mutable copy of a catalog node.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DataMap, Node, NodeStatus};

/// Run-scoped mutable copy of a catalog node, owned by the engine for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingNode {
  pub node_id: String,
  pub data_in: DataMap,
  pub data_out: DataMap,
  pub paths_in: Vec<Uuid>,
  pub paths_out: Vec<Uuid>,
  pub status: NodeStatus,
  /// `None` until an enable/disable list or finalization decides it.
  pub is_enabled: Option<bool>,
  pub level: Option<u32>,
  pub timestamp: DateTime<Utc>,
}

impl WorkingNode {
  /// Fresh working copy: empty input, catalog output, unprocessed.
  pub fn from_catalog(node: &Node, is_enabled: Option<bool>) -> Self {
    Self {
      node_id: node.node_id.clone(),
      data_in: DataMap::new(),
      data_out: node.data_out.clone(),
      paths_in: node.paths_in.clone(),
      paths_out: node.paths_out.clone(),
      status: NodeStatus::Unprocessed,
      is_enabled,
      level: None,
      timestamp: Utc::now(),
    }
  }

  pub fn is_enabled(&self) -> bool {
    self.is_enabled.unwrap_or(false)
  }

  pub fn mark_processed(&mut self) {
    self.status = NodeStatus::Processed;
    self.timestamp = Utc::now();
  }
}

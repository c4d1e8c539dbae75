//! Finalized per-node snapshot stored in a run result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DataMap, NodeStatus, WorkingNode};

/// Finalized per-node snapshot stored in a run result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
  pub node_id: String,
  pub data_in: DataMap,
  pub data_out: DataMap,
  pub paths_in: Vec<Uuid>,
  pub paths_out: Vec<Uuid>,
  pub timestamp: DateTime<Utc>,
  pub status: NodeStatus,
  pub level: Option<u32>,
  pub is_enabled: Option<bool>,
}

impl From<&WorkingNode> for NodeResult {
  fn from(node: &WorkingNode) -> Self {
    Self {
      node_id: node.node_id.clone(),
      data_in: node.data_in.clone(),
      data_out: node.data_out.clone(),
      paths_in: node.paths_in.clone(),
      paths_out: node.paths_out.clone(),
      timestamp: node.timestamp,
      status: node.status,
      level: node.level,
      is_enabled: node.is_enabled,
    }
  }
}

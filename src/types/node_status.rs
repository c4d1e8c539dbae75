//! Processing status of a node within one run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Processing status of a node within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
  #[default]
  Unprocessed,
  Processed,
  Unknown,
}

impl fmt::Display for NodeStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeStatus::Unprocessed => write!(f, "unprocessed"),
      NodeStatus::Processed => write!(f, "processed"),
      NodeStatus::Unknown => write!(f, "unknown"),
    }
  }
}

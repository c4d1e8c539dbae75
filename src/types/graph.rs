//! A stored graph definition and its populated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Edge, Node};

/// A stored graph: ordered node and edge references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
  #[serde(default)]
  pub id: Uuid,
  pub name: String,
  #[serde(default)]
  pub nodes: Vec<Uuid>,
  #[serde(default)]
  pub edges: Vec<Uuid>,
  #[serde(default = "Utc::now")]
  pub created_at: DateTime<Utc>,
}

impl Graph {
  pub fn new(name: impl Into<String>, nodes: Vec<Uuid>, edges: Vec<Uuid>) -> Self {
    Self {
      id: Uuid::nil(),
      name: name.into(),
      nodes,
      edges,
      created_at: Utc::now(),
    }
  }
}

/// A graph with its node and edge references resolved, in reference order.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
  pub graph: Graph,
  pub nodes: Vec<Node>,
  pub edges: Vec<Edge>,
}

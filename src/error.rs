//! Error types for catalog access, validation, configuration checks and runs.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Catalog or result-store failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
  #[error("{kind} {id} not found")]
  NotFound { kind: &'static str, id: String },

  /// A node with the same `node_id` already exists.
  #[error("node_id '{0}' already exists")]
  Conflict(String),

  /// Edges still point at the node being deleted.
  #[error("node {id} is referenced by {edges} edge(s)")]
  NodeInUse { id: Uuid, edges: usize },

  /// An edge endpoint does not name a catalog node.
  #[error("edge references unknown node {0}")]
  InvalidReference(Uuid),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Json(#[from] serde_json::Error),
}

impl StoreError {
  pub fn not_found(kind: &'static str, id: impl fmt::Display) -> Self {
    Self::NotFound {
      kind,
      id: id.to_string(),
    }
  }
}

/// Structural failure reported by the graph validator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
  #[error("graph {0} not found")]
  GraphNotFound(Uuid),

  #[error("Some nodes are not valid: {found} of {referenced} referenced nodes exist")]
  DanglingNodes { referenced: usize, found: usize },

  #[error("Some edges are not valid: {found} of {referenced} referenced edges exist")]
  DanglingEdges { referenced: usize, found: usize },

  #[error("Source node {node} of edge {edge} does not exist")]
  MissingSource { edge: Uuid, node: Uuid },

  #[error("Destination node {node} of edge {edge} does not exist")]
  MissingDestination { edge: Uuid, node: Uuid },

  #[error("Duplicate edges detected: {0}")]
  DuplicateEdge(Uuid),

  #[error("At least one root node must be specified")]
  NoRoots,

  #[error("Root node {0} is not part of the graph")]
  UnknownRoot(String),

  #[error(
    "Graph contains islands; not all nodes are reachable from the specified root inputs ({reached} of {total})"
  )]
  Unreachable { reached: usize, total: usize },

  #[error("Graph contains a cycle ({processed} of {total} nodes sorted)")]
  CycleDetected { processed: usize, total: usize },

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Run request rejected before any scheduling starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("Only one of enable_list or disable_list can be provided.")]
  ConflictingLists,

  #[error("Root node {0} not found in database.")]
  RootNotFound(String),

  #[error("Incomplete data_in keys for root node {node_id}: missing {missing:?}.")]
  IncompleteRootInput {
    node_id: String,
    missing: Vec<String>,
  },

  #[error("Overwrite node {0} not found in database.")]
  OverwriteNotFound(String),

  #[error("data_in values must be provided for overwrite node {0}.")]
  EmptyOverwrite(String),
}

/// Failure raised by a node processor for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ProcessError(String);

impl ProcessError {
  pub fn new(reason: impl Into<String>) -> Self {
    Self(reason.into())
  }
}

/// Stage of a run, recorded so failures report where they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
  Validating,
  Building,
  Seeding,
  Scheduling,
  Finalizing,
  Assembling,
  Done,
  Failed,
}

impl fmt::Display for RunPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunPhase::Validating => write!(f, "validating"),
      RunPhase::Building => write!(f, "building"),
      RunPhase::Seeding => write!(f, "seeding"),
      RunPhase::Scheduling => write!(f, "scheduling"),
      RunPhase::Finalizing => write!(f, "finalizing"),
      RunPhase::Assembling => write!(f, "assembling"),
      RunPhase::Done => write!(f, "done"),
      RunPhase::Failed => write!(f, "failed"),
    }
  }
}

/// Failure of a whole run. No result is persisted for any of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Graph {0} not found.")]
  GraphNotFound(Uuid),

  #[error("run aborted while {phase}: {reason}")]
  Fatal { phase: RunPhase, reason: String },

  #[error(transparent)]
  Store(#[from] StoreError),
}

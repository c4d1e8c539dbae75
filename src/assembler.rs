//! Turns a finalized node table into a [RunResult] and serves derived read views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::types::{
  DataMap, ENABLED_ISLAND, Islands, NodeResult, RunConfig, RunResult, WorkingNode,
};

/// Builds the persisted record for one run.
///
/// Islands: every node whose final `is_enabled` is `false` gets its own bucket keyed by a
/// counter starting at 0, in table order; all other nodes share the `"Enabled"` bucket.
#[instrument(level = "trace", skip(nodes, config, completed))]
pub fn assemble(
  run_id: &str,
  graph_id: Uuid,
  nodes: &[WorkingNode],
  config: &RunConfig,
  completed: &[String],
) -> RunResult {
  let mut node_results = BTreeMap::new();
  let mut islands = Islands::new();
  let mut disabled = 0usize;

  for node in nodes {
    node_results.insert(node.node_id.clone(), NodeResult::from(node));
    if node.is_enabled == Some(false) {
      islands.insert(disabled.to_string(), vec![node.node_id.clone()]);
      disabled += 1;
    } else {
      islands.push(ENABLED_ISLAND, node.node_id.clone());
    }
  }

  RunResult {
    run_id: run_id.to_string(),
    graph_id,
    node_results,
    graph_config: config.clone(),
    topological_order: completed.to_vec(),
    islands,
  }
}

/// Output of a node at the deepest level of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafOutput {
  #[serde(rename = "nodeId")]
  pub node_id: String,
  pub data_out: DataMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelNode {
  #[serde(rename = "nodeId")]
  pub node_id: String,
  pub data: NodeResult,
}

/// Nodes sharing one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBucket {
  pub level: u32,
  pub nodes: Vec<LevelNode>,
}

pub fn node_output<'a>(result: &'a RunResult, node_id: &str) -> Option<&'a DataMap> {
  result.node(node_id).map(|n| &n.data_out)
}

/// Outputs of every node whose level equals the run's maximum level.
pub fn leaf_outputs(result: &RunResult) -> Vec<LeafOutput> {
  let max = result.max_level();
  result
    .node_results
    .iter()
    .filter(|(_, n)| n.level == Some(max))
    .map(|(id, n)| LeafOutput {
      node_id: id.clone(),
      data_out: n.data_out.clone(),
    })
    .collect()
}

/// Nodes grouped by level, ascending. Nodes without a level are left out.
pub fn level_wise(result: &RunResult) -> Vec<LevelBucket> {
  let mut levels: BTreeMap<u32, Vec<LevelNode>> = BTreeMap::new();
  for (id, n) in &result.node_results {
    if let Some(level) = n.level {
      levels.entry(level).or_default().push(LevelNode {
        node_id: id.clone(),
        data: n.clone(),
      });
    }
  }
  levels
    .into_iter()
    .map(|(level, nodes)| LevelBucket { level, nodes })
    .collect()
}

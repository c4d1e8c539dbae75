//! Builds the run table from a loaded graph.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::RunTable;
use crate::types::{LoadedGraph, RunConfig, WorkingNode};

/// One fresh working node per graph node, enablement from the config lists, static in-degrees
/// and successor lists from the graph's edges.
///
/// An edge counts toward its destination's in-degree whenever the destination resolves; it is
/// followed during propagation only when both endpoints resolve.
#[instrument(level = "trace", skip_all, fields(graph_id = %graph.graph.id))]
pub fn build_table(graph: &LoadedGraph, config: &RunConfig) -> RunTable {
  let mut table = RunTable::default();
  let mut by_catalog_id: HashMap<Uuid, usize> = HashMap::new();

  for node in &graph.nodes {
    let enabled = config.initial_enablement(&node.node_id);
    if table.insert(WorkingNode::from_catalog(node, enabled)) {
      by_catalog_id.insert(node.id, table.len() - 1);
    }
  }

  for edge in &graph.edges {
    let src = by_catalog_id.get(&edge.src_node).copied();
    let Some(dst) = by_catalog_id.get(&edge.dst_node).copied() else {
      warn!(edge = %edge.id, dst = %edge.dst_node, "edge destination not in graph");
      continue;
    };
    table.add_in_degree(dst);
    match src {
      Some(src) => table.link(src, dst),
      None => warn!(edge = %edge.id, src = %edge.src_node, "edge source not in graph"),
    }
  }

  debug!(nodes = table.len(), "run table built");
  table
}

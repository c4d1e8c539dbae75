//! Seeds root nodes into the ready queue.

use tracing::{info, instrument, warn};

use super::{ReadyQueue, RunTable};
use crate::types::RunConfig;

/// Sets every root's level to 0. Roots with static in-degree 0 get their supplied input and are
/// queued; the others keep an empty input and can only be reached by propagation.
///
/// Errors if a root is not a node of the run's graph.
#[instrument(level = "trace", skip_all)]
pub fn seed_roots(table: &mut RunTable, config: &RunConfig) -> Result<ReadyQueue, String> {
  let mut queue = ReadyQueue::new();
  for (node_id, input) in &config.root_inputs {
    let idx = table
      .index_of(node_id)
      .ok_or_else(|| format!("root node {node_id} is not part of the graph"))?;
    table.node_mut(idx).level = Some(0);

    let in_degree = table.in_degree(idx);
    if in_degree > 0 {
      warn!(node_id = %node_id, in_degree, "root has incoming edges; not queued");
      continue;
    }
    table.node_mut(idx).data_in = input.data_in.clone();
    queue.push(node_id.as_str());
    info!(node_id = %node_id, "root queued");
  }
  Ok(queue)
}

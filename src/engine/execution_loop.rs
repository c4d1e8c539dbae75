//! Topological dequeue loop: overwrite, process, propagate, complete.

use tracing::{debug, info, instrument, warn};

use super::{ReadyQueue, RunTable};
use crate::processor::NodeProcessor;
use crate::types::RunConfig;

/// Drains `queue`, smallest `node_id` first.
///
/// A node whose processor call fails is skipped: it stays unprocessed, is never completed and
/// none of its successors are released by it. Errors only on table inconsistencies.
#[instrument(level = "trace", skip_all)]
pub fn run_execution_loop(
  table: &mut RunTable,
  queue: &mut ReadyQueue,
  config: &RunConfig,
  processor: &dyn NodeProcessor,
) -> Result<(), String> {
  while let Some(node_id) = queue.pop() {
    let idx = table
      .index_of(&node_id)
      .ok_or_else(|| format!("queued node {node_id} missing from run table"))?;
    info!(node_id = %node_id, "processing node");

    if let Some(overwrite) = config.data_overwrites.get(&node_id) {
      debug!(node_id = %node_id, "applying data overwrite");
      table.node_mut(idx).data_in = overwrite.data_in.clone();
    }

    let data_out = match processor.process(&node_id, &table.node(idx).data_in) {
      Ok(out) => out,
      Err(e) => {
        warn!(node_id = %node_id, error = %e, "node processing failed; skipping node");
        continue;
      }
    };
    table.node_mut(idx).data_out = data_out.clone();

    let next_level = table.node(idx).level.map(|l| l + 1);
    for succ in table.successors(idx).to_vec() {
      let dst = table.node_mut(succ);
      for (key, value) in &data_out {
        dst.data_in.insert(key.clone(), value.clone());
      }
      let remaining = table.satisfy_one(succ);
      let ready = remaining == 0 && !table.is_completed(succ) && table.node(succ).is_enabled();
      if ready {
        let dst = table.node_mut(succ);
        dst.level = next_level;
        debug!(node_id = %dst.node_id, level = ?next_level, "successor queued");
        queue.push(dst.node_id.clone());
      }
    }

    table.complete(idx);
  }
  Ok(())
}

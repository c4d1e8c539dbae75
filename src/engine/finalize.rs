//! End-of-run cleanup of the node table.

use tracing::{debug, instrument};

use super::RunTable;

/// Storage-layer bookkeeping keys removed from every node's `data_in` before the table is final.
pub const RESERVED_KEYS: [&str; 8] = [
  "$__parent",
  "$basePath",
  "$__",
  "_doc",
  "__v",
  "$__deferred",
  "$__path",
  "$__schemaType",
];

/// Disables every node that never completed and strips [RESERVED_KEYS] from all inputs.
#[instrument(level = "trace", skip_all)]
pub fn finalize(table: &mut RunTable) {
  for (node, completed) in table.nodes_mut() {
    if !completed {
      debug!(node_id = %node.node_id, was = ?node.is_enabled, "unreached node disabled");
      node.is_enabled = Some(false);
    }
    for key in RESERVED_KEYS {
      node.data_in.remove(key);
    }
  }
}

//! Catalog and run data model.
//!
//! Catalog entities (`Node`, `Edge`, `Graph`) are immutable during a run; the engine works on
//! `WorkingNode` copies and the assembler turns those into a persisted `RunResult`.

use serde_json::{Map, Value};

mod edge;
mod graph;
mod node;
#[cfg(test)]
mod node_test;
mod node_result;
mod node_status;
mod run_config;
mod run_result;
mod working_node;

pub use edge::Edge;
pub use graph::{Graph, LoadedGraph};
pub use node::Node;
pub use node_result::NodeResult;
pub use node_status::NodeStatus;
pub use run_config::{NodeInput, RunConfig};
pub use run_result::{ENABLED_ISLAND, Islands, RunResult};
pub use working_node::WorkingNode;

/// Open string-keyed mapping of heterogeneous values carried in and out of nodes.
pub type DataMap = Map<String, Value>;

//! Shared fixtures for unit tests: catalogs built from node names and edge pairs.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::catalog::{Catalog, MemoryCatalog};
use crate::error::ProcessError;
use crate::types::{DataMap, Edge, Graph, Node};

pub fn map(v: Value) -> DataMap {
  v.as_object().cloned().unwrap_or_default()
}

/// A catalog holding one graph.
pub struct Fixture {
  pub catalog: MemoryCatalog,
  pub graph: Graph,
  pub ids: HashMap<String, Uuid>,
}

/// Creates nodes `names` and edges `pairs` (by node_id) in a fresh catalog, plus a graph over them.
pub async fn fixture(names: &[&str], pairs: &[(&str, &str)]) -> Fixture {
  fixture_with(names.iter().map(|n| Node::new(*n)).collect(), pairs).await
}

pub async fn fixture_with(nodes: Vec<Node>, pairs: &[(&str, &str)]) -> Fixture {
  let catalog = MemoryCatalog::new();
  let mut ids = HashMap::new();
  let mut node_refs = Vec::new();
  for node in nodes {
    let created = catalog.create_node(node).await.unwrap();
    ids.insert(created.node_id.clone(), created.id);
    node_refs.push(created.id);
  }
  let mut edge_refs = Vec::new();
  for (src, dst) in pairs {
    let edge = catalog
      .create_edge(Edge::new(ids[*src], ids[*dst]))
      .await
      .unwrap();
    edge_refs.push(edge.id);
  }
  let graph = catalog
    .create_graph(Graph::new("fixture", node_refs, edge_refs))
    .await
    .unwrap();
  Fixture {
    catalog,
    graph,
    ids,
  }
}

/// Processor writing `sum = 2 * x` (x defaulting to 0) and failing for node ids in `failing`.
pub fn doubling_x(
  failing: &'static [&'static str],
) -> impl Fn(&str, &DataMap) -> Result<DataMap, ProcessError> + Send + Sync {
  move |node_id: &str, data_in: &DataMap| {
    if failing.iter().any(|f| *f == node_id) {
      return Err(ProcessError::new(format!("{node_id} failed")));
    }
    let x = data_in.get("x").and_then(Value::as_i64).unwrap_or(0);
    let mut out = DataMap::new();
    out.insert("sum".to_string(), Value::from(2 * x));
    Ok(out)
  }
}

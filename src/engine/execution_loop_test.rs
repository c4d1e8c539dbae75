//! Tests for `run_execution_loop`.

use proptest::prelude::*;
use serde_json::json;
use uuid::Uuid;

use super::{RunTable, build_table, run_execution_loop, seed_roots};
use crate::catalog::Catalog;
use crate::processor::{DoublingProcessor, NodeProcessor};
use crate::test_fixtures::{doubling_x, fixture, map};
use crate::types::{DataMap, Edge, Graph, LoadedGraph, Node, NodeStatus, RunConfig};

fn execute(graph: &LoadedGraph, config: &RunConfig, processor: &dyn NodeProcessor) -> RunTable {
  let mut table = build_table(graph, config);
  let mut queue = seed_roots(&mut table, config).unwrap();
  run_execution_loop(&mut table, &mut queue, config, processor).unwrap();
  table
}

async fn chain() -> LoadedGraph {
  let f = fixture(&["R", "A", "B"], &[("R", "A"), ("A", "B")]).await;
  f.catalog.load_graph(f.graph.id).await.unwrap().unwrap()
}

#[tokio::test]
async fn chain_runs_in_dependency_order_with_levels() {
  let graph = chain().await;
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R", "A", "B"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));

  assert_eq!(table.completed(), vec!["R", "A", "B"]);
  assert_eq!(table.get("R").unwrap().level, Some(0));
  assert_eq!(table.get("A").unwrap().level, Some(1));
  assert_eq!(table.get("B").unwrap().level, Some(2));
  assert_eq!(table.get("R").unwrap().data_out["sum"], json!(2));
  assert!(table.nodes().iter().all(|n| n.status == NodeStatus::Processed));
}

#[tokio::test]
async fn outputs_propagate_into_successor_inputs() {
  let graph = chain().await;
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R", "A", "B"]);
  let table = execute(&graph, &cfg, &DoublingProcessor);

  assert_eq!(table.get("A").unwrap().data_in, map(json!({ "sum": 2 })));
  assert_eq!(table.get("B").unwrap().data_in, map(json!({ "sum": 4 })));
  assert_eq!(table.get("B").unwrap().data_out, map(json!({ "sum": 8 })));
}

#[tokio::test]
async fn disabled_node_is_never_queued() {
  let graph = chain().await;
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_disable_list(["B"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));

  assert_eq!(table.completed(), vec!["R", "A"]);
  let b = table.get("B").unwrap();
  assert_eq!(b.status, NodeStatus::Unprocessed);
  assert_eq!(b.level, None);
  // Propagation still delivered A's output before the enablement check.
  assert_eq!(b.data_in["sum"], json!(0));
}

#[tokio::test]
async fn overwrite_replaces_propagated_input() {
  let graph = chain().await;
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_overwrite("A", map(json!({ "x": 5 })))
    .with_enable_list(["R", "A", "B"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));

  assert_eq!(table.get("A").unwrap().data_in, map(json!({ "x": 5 })));
  assert_eq!(table.get("A").unwrap().data_out["sum"], json!(10));
  assert_eq!(table.get("B").unwrap().data_in["sum"], json!(10));
}

#[tokio::test]
async fn failing_node_prunes_its_downstream() {
  let f = fixture(
    &["R", "A", "B", "C"],
    &[("R", "A"), ("R", "B"), ("A", "C"), ("B", "C")],
  )
  .await;
  let graph = f.catalog.load_graph(f.graph.id).await.unwrap().unwrap();
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R", "A", "B", "C"]);
  let table = execute(&graph, &cfg, &doubling_x(&["B"]));

  assert_eq!(table.completed(), vec!["R", "A"]);
  assert_eq!(table.get("B").unwrap().status, NodeStatus::Unprocessed);
  let c = table.index_of("C").unwrap();
  assert_eq!(table.in_degree(c), 1);
  assert!(!table.is_completed(c));
}

#[tokio::test]
async fn ties_break_on_smallest_node_id() {
  let f = fixture(
    &["root", "b", "a", "c"],
    &[("root", "c"), ("root", "b"), ("root", "a")],
  )
  .await;
  let graph = f.catalog.load_graph(f.graph.id).await.unwrap().unwrap();
  let cfg = RunConfig::default()
    .with_root("root", DataMap::new())
    .with_enable_list(["root", "a", "b", "c"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));
  assert_eq!(table.completed(), vec!["root", "a", "b", "c"]);
}

#[tokio::test]
async fn root_with_incoming_edge_is_reached_by_propagation() {
  let graph = chain().await;
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_root("A", map(json!({ "x": 100 })))
    .with_enable_list(["R", "A", "B"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));

  assert_eq!(table.completed(), vec!["R", "A", "B"]);
  let a = table.get("A").unwrap();
  assert_eq!(a.level, Some(1));
  assert_eq!(a.data_in, map(json!({ "sum": 2 })));
}

#[tokio::test]
async fn run_without_lists_stops_after_roots() {
  let graph = chain().await;
  let cfg = RunConfig::default().with_root("R", map(json!({ "x": 1 })));
  let table = execute(&graph, &cfg, &doubling_x(&[]));

  assert_eq!(table.completed(), vec!["R"]);
  assert_eq!(table.get("A").unwrap().is_enabled, None);
  assert_eq!(table.get("A").unwrap().status, NodeStatus::Unprocessed);
}

#[tokio::test]
async fn edge_key_mapping_is_not_applied() {
  let f = fixture(&["R", "A"], &[]).await;
  let mut edge = Edge::new(f.ids["R"], f.ids["A"]);
  edge
    .src_to_dst_data_keys
    .insert("sum".to_string(), "renamed".to_string());
  let edge = f.catalog.create_edge(edge).await.unwrap();
  let mut g = f.graph.clone();
  g.edges.push(edge.id);
  f.catalog.update_graph(g.id, g.clone()).await.unwrap();
  let graph = f.catalog.load_graph(g.id).await.unwrap().unwrap();

  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 3 })))
    .with_enable_list(["R", "A"]);
  let table = execute(&graph, &cfg, &doubling_x(&[]));
  let a = table.get("A").unwrap();
  assert_eq!(a.data_in, map(json!({ "sum": 6 })));
}

fn indexed(count: usize, pairs: &[(usize, usize)]) -> LoadedGraph {
  let nodes: Vec<Node> = (0..count)
    .map(|i| {
      let mut n = Node::new(format!("n{i}"));
      n.id = Uuid::new_v4();
      n
    })
    .collect();
  let edges: Vec<Edge> = pairs
    .iter()
    .map(|&(a, b)| {
      let mut e = Edge::new(nodes[a].id, nodes[b].id);
      e.id = Uuid::new_v4();
      e
    })
    .collect();
  let graph = Graph::new(
    "p",
    nodes.iter().map(|n| n.id).collect(),
    edges.iter().map(|e| e.id).collect(),
  );
  LoadedGraph {
    graph,
    nodes,
    edges,
  }
}

fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
  (2usize..9).prop_flat_map(|n| {
    let pair = (0..n, 0..n).prop_filter_map("forward edge", |(a, b)| {
      (a < b).then_some((a, b))
    });
    (Just(n), prop::collection::vec(pair, 0..20))
  })
}

proptest! {
  #[test]
  fn enabled_dag_completes_in_topological_order((count, pairs) in dag()) {
    let mut pairs = pairs;
    pairs.sort();
    pairs.dedup();
    let graph = indexed(count, &pairs);
    let mut cfg = RunConfig::default()
      .with_enable_list((0..count).map(|i| format!("n{i}")));
    for i in (0..count).filter(|i| !pairs.iter().any(|(_, b)| b == i)) {
      cfg = cfg.with_root(format!("n{i}"), map(json!({ "x": i })));
    }

    let first = execute(&graph, &cfg, &doubling_x(&[])).completed();
    prop_assert_eq!(first.len(), count);
    let pos = |i: usize| first.iter().position(|id| *id == format!("n{i}"));
    for &(a, b) in &pairs {
      prop_assert!(pos(a) < pos(b));
    }

    let second = execute(&graph, &cfg, &doubling_x(&[])).completed();
    prop_assert_eq!(first, second);
  }
}

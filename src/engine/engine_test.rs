//! Tests for `ExecutionEngine`.

use serde_json::json;
use uuid::Uuid;

use super::ExecutionEngine;
use crate::catalog::Catalog;
use crate::error::{ConfigError, RunError, RunPhase};
use crate::processor::DoublingProcessor;
use crate::test_fixtures::{doubling_x, fixture, map};
use crate::types::{ENABLED_ISLAND, Node, NodeStatus, RunConfig};

#[tokio::test]
async fn runs_chain_end_to_end() {
  let f = fixture(&["R", "A", "B"], &[("R", "A"), ("A", "B")]).await;
  let processor = doubling_x(&[]);
  let engine = ExecutionEngine::new(&f.catalog, &processor);
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R", "A", "B"]);

  let result = engine.run(f.graph.id, "run1", &cfg).await.unwrap();
  assert_eq!(result.run_id, "run1");
  assert_eq!(result.graph_id, f.graph.id);
  assert_eq!(result.topological_order, vec!["R", "A", "B"]);
  assert_eq!(result.node("B").unwrap().level, Some(2));
  assert_eq!(result.node("B").unwrap().status, NodeStatus::Processed);
  assert_eq!(result.islands.len(), 1);
  assert_eq!(result.islands[ENABLED_ISLAND], vec!["R", "A", "B"]);
  assert_eq!(result.graph_config, cfg);
}

#[tokio::test]
async fn disabled_node_gets_own_island() {
  let f = fixture(&["R", "A", "B"], &[("R", "A"), ("A", "B")]).await;
  let engine = ExecutionEngine::new(&f.catalog, &DoublingProcessor);
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_disable_list(["B"]);

  let result = engine.run(f.graph.id, "run2", &cfg).await.unwrap();
  assert_eq!(result.topological_order, vec!["R", "A"]);
  assert_eq!(result.node("B").unwrap().is_enabled, Some(false));
  assert_eq!(result.islands[ENABLED_ISLAND], vec!["R", "A"]);
  assert_eq!(result.islands["0"], vec!["B"]);
}

#[tokio::test]
async fn unknown_graph_is_reported() {
  let f = fixture(&["R"], &[]).await;
  let engine = ExecutionEngine::new(&f.catalog, &DoublingProcessor);
  let cfg = RunConfig::default().with_root("R", map(json!({ "x": 1 })));
  let missing = Uuid::new_v4();
  let err = engine.run(missing, "r", &cfg).await.unwrap_err();
  assert!(matches!(err, RunError::GraphNotFound(id) if id == missing));
}

#[tokio::test]
async fn config_errors_surface_before_building() {
  let f = fixture(&["R"], &[]).await;
  let engine = ExecutionEngine::new(&f.catalog, &DoublingProcessor);
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R"])
    .with_disable_list(["R"]);
  let err = engine.run(f.graph.id, "r", &cfg).await.unwrap_err();
  assert!(matches!(err, RunError::Config(ConfigError::ConflictingLists)));
}

#[tokio::test]
async fn root_from_another_graph_aborts_while_seeding() {
  let f = fixture(&["R"], &[]).await;
  f.catalog.create_node(Node::new("stranger")).await.unwrap();
  let engine = ExecutionEngine::new(&f.catalog, &DoublingProcessor);
  let cfg = RunConfig::default().with_root("stranger", map(json!({})));
  let err = engine.run(f.graph.id, "r", &cfg).await.unwrap_err();
  match err {
    RunError::Fatal { phase, reason } => {
      assert_eq!(phase, RunPhase::Seeding);
      assert!(reason.contains("stranger"));
    }
    other => panic!("expected fatal, got {other:?}"),
  }
}

#[tokio::test]
async fn processor_failure_does_not_fail_the_run() {
  let f = fixture(&["R", "A"], &[("R", "A")]).await;
  let processor = doubling_x(&["A"]);
  let engine = ExecutionEngine::new(&f.catalog, &processor);
  let cfg = RunConfig::default()
    .with_root("R", map(json!({ "x": 1 })))
    .with_enable_list(["R", "A"]);
  let result = engine.run(f.graph.id, "r", &cfg).await.unwrap();
  assert_eq!(result.topological_order, vec!["R"]);
  assert_eq!(result.node("A").unwrap().is_enabled, Some(false));
  assert_eq!(result.islands["0"], vec!["A"]);
}

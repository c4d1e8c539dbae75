//! Tests for `Node`.

use serde_json::json;

use super::{DataMap, Node};

fn map(v: serde_json::Value) -> DataMap {
  v.as_object().cloned().unwrap()
}

#[test]
fn deserializes_with_defaults() {
  let node: Node = serde_json::from_value(json!({ "node_id": "a" })).unwrap();
  assert_eq!(node.node_id, "a");
  assert!(node.id.is_nil());
  assert!(node.data_in.is_empty());
  assert!(node.data_out.is_empty());
  assert!(node.paths_in.is_empty());
  assert!(node.paths_out.is_empty());
}

#[test]
fn missing_input_keys_lists_unsupplied_declared_keys() {
  let mut node = Node::new("a");
  node.data_in = map(json!({ "x": null, "y": null }));
  let missing = node.missing_input_keys(&map(json!({ "x": 1, "z": 2 })));
  assert_eq!(missing, vec!["y".to_string()]);
}

#[test]
fn missing_input_keys_empty_when_nothing_declared() {
  let node = Node::new("a");
  assert!(node.missing_input_keys(&DataMap::new()).is_empty());
}

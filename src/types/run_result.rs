//! Persisted outcome of one run.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{NodeResult, RunConfig};

/// Island key shared by every enabled node.
pub const ENABLED_ISLAND: &str = "Enabled";

/// Enabled/disabled partition: one `"Enabled"` bucket, one singleton bucket per disabled node
/// keyed `"0"`, `"1"`, ...
///
/// Iterates and serializes numeric keys in numeric order, followed by the named buckets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Islands(BTreeMap<String, Vec<String>>);

impl Islands {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&Vec<String>> {
    self.0.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn insert(&mut self, key: impl Into<String>, members: Vec<String>) {
    self.0.insert(key.into(), members);
  }

  /// Appends `node_id` to the bucket `key`, creating it if needed.
  pub fn push(&mut self, key: &str, node_id: impl Into<String>) {
    self.0.entry(key.to_string()).or_default().push(node_id.into());
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Vec<String>)> {
    let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| island_order(a.0).cmp(&island_order(b.0)));
    entries.into_iter()
  }
}

/// Sort key: numeric buckets ascending, then named buckets by name.
fn island_order(key: &str) -> (bool, u64, &str) {
  match key.parse::<u64>() {
    Ok(n) => (false, n, ""),
    Err(_) => (true, 0, key),
  }
}

impl std::ops::Index<&str> for Islands {
  type Output = Vec<String>;

  fn index(&self, key: &str) -> &Vec<String> {
    &self.0[key]
  }
}

impl Serialize for Islands {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for (key, members) in self.iter() {
      map.serialize_entry(key, members)?;
    }
    map.end()
  }
}

/// Persisted outcome of one run, keyed by `run_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
  pub run_id: String,
  pub graph_id: Uuid,
  pub node_results: BTreeMap<String, NodeResult>,
  pub graph_config: RunConfig,
  /// Node ids in completion order.
  pub topological_order: Vec<String>,
  pub islands: Islands,
}

impl RunResult {
  pub fn node(&self, node_id: &str) -> Option<&NodeResult> {
    self.node_results.get(node_id)
  }

  /// Highest level reached in the run; 0 when no node has a level.
  pub fn max_level(&self) -> u32 {
    self
      .node_results
      .values()
      .filter_map(|n| n.level)
      .max()
      .unwrap_or(0)
  }
}

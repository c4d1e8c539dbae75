//! Per-run node table: one arena of working nodes indexed by `node_id`.

use std::collections::HashMap;

use crate::types::WorkingNode;

/// Working nodes, remaining in-degrees, successors and completion order for one run.
///
/// Owned by a single engine invocation and dropped (or assembled) at run end.
#[derive(Debug, Default)]
pub struct RunTable {
  nodes: Vec<WorkingNode>,
  index: HashMap<String, usize>,
  in_degree: Vec<usize>,
  /// One entry per edge whose endpoints both resolve.
  successors: Vec<Vec<usize>>,
  completed: Vec<usize>,
  is_completed: Vec<bool>,
}

impl RunTable {
  /// Adds a node; returns false if its `node_id` is already present.
  pub(crate) fn insert(&mut self, node: WorkingNode) -> bool {
    if self.index.contains_key(&node.node_id) {
      return false;
    }
    self.index.insert(node.node_id.clone(), self.nodes.len());
    self.nodes.push(node);
    self.in_degree.push(0);
    self.successors.push(Vec::new());
    self.is_completed.push(false);
    true
  }

  /// Records an edge `src -> dst` by index.
  pub(crate) fn link(&mut self, src: usize, dst: usize) {
    self.successors[src].push(dst);
  }

  pub(crate) fn add_in_degree(&mut self, idx: usize) {
    self.in_degree[idx] += 1;
  }

  /// Decrements the remaining in-degree of `idx` and returns the new value.
  pub(crate) fn satisfy_one(&mut self, idx: usize) -> usize {
    let d = &mut self.in_degree[idx];
    *d = d.saturating_sub(1);
    *d
  }

  pub(crate) fn complete(&mut self, idx: usize) {
    self.nodes[idx].mark_processed();
    if !self.is_completed[idx] {
      self.is_completed[idx] = true;
      self.completed.push(idx);
    }
  }

  pub fn index_of(&self, node_id: &str) -> Option<usize> {
    self.index.get(node_id).copied()
  }

  pub fn node(&self, idx: usize) -> &WorkingNode {
    &self.nodes[idx]
  }

  pub(crate) fn node_mut(&mut self, idx: usize) -> &mut WorkingNode {
    &mut self.nodes[idx]
  }

  pub fn get(&self, node_id: &str) -> Option<&WorkingNode> {
    self.index_of(node_id).map(|i| &self.nodes[i])
  }

  pub fn in_degree(&self, idx: usize) -> usize {
    self.in_degree[idx]
  }

  pub fn successors(&self, idx: usize) -> &[usize] {
    &self.successors[idx]
  }

  pub fn is_completed(&self, idx: usize) -> bool {
    self.is_completed[idx]
  }

  /// Working nodes in graph order.
  pub fn nodes(&self) -> &[WorkingNode] {
    &self.nodes
  }

  pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = (&mut WorkingNode, bool)> {
    self.nodes.iter_mut().zip(self.is_completed.iter().copied())
  }

  /// Completed `node_id`s in completion order.
  pub fn completed(&self) -> Vec<String> {
    self
      .completed
      .iter()
      .map(|&i| self.nodes[i].node_id.clone())
      .collect()
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}

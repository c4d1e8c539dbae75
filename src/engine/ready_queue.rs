//! Ready queue ordered by ascending `node_id`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Nodes whose dependencies are satisfied, popped smallest `node_id` first.
///
/// Lexicographic order is the only tie-break; it makes runs reproducible.
#[derive(Debug, Default)]
pub struct ReadyQueue {
  heap: BinaryHeap<Reverse<String>>,
}

impl ReadyQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, node_id: impl Into<String>) {
    self.heap.push(Reverse(node_id.into()));
  }

  pub fn pop(&mut self) -> Option<String> {
    self.heap.pop().map(|Reverse(id)| id)
  }

  pub fn len(&self) -> usize {
    self.heap.len()
  }

  pub fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }
}

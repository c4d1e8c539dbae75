//! Pre-flight structural validation of a stored graph against a set of roots.
//!
//! Checks run in order and stop at the first failure: existence, edge endpoints, duplicate
//! edges, reachability from the roots (multi-source BFS), acyclicity (Kahn). Nothing is
//! mutated and no execution order is kept.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::types::{Edge, Graph, Node};

/// Source id to destination ids, one entry per edge.
type Adjacency = HashMap<Uuid, Vec<Uuid>>;

/// Fetches the graph's nodes and edges from `catalog` and validates them against `root_node_ids`.
#[instrument(level = "trace", skip(catalog, graph), fields(graph_id = %graph.id))]
pub async fn validate_graph(
  catalog: &dyn Catalog,
  graph: &Graph,
  root_node_ids: &[String],
) -> Result<(), ValidationError> {
  info!(roots = ?root_node_ids, "validating graph");
  let nodes = catalog.nodes_by_ids(&graph.nodes).await?;
  let edges = catalog.edges_by_ids(&graph.edges).await?;
  let r = check_structure(graph, &nodes, &edges, root_node_ids);
  match &r {
    Ok(()) => info!("graph validated"),
    Err(e) => warn!(error = %e, "graph validation failed"),
  }
  r
}

/// Runs every structural check over already-fetched nodes and edges.
#[instrument(level = "trace", skip_all)]
pub fn check_structure(
  graph: &Graph,
  nodes: &[Node],
  edges: &[Edge],
  root_node_ids: &[String],
) -> Result<(), ValidationError> {
  check_existence(graph, nodes, edges)?;
  check_endpoints(nodes, edges)?;
  check_duplicate_edges(graph)?;
  let adjacency = adjacency(nodes, edges);
  check_reachability(nodes, &adjacency, root_node_ids)?;
  check_acyclic(nodes, edges, &adjacency)
}

fn distinct(ids: &[Uuid]) -> usize {
  ids.iter().collect::<HashSet<_>>().len()
}

fn check_existence(graph: &Graph, nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
  let referenced = distinct(&graph.nodes);
  if nodes.len() != referenced {
    return Err(ValidationError::DanglingNodes {
      referenced,
      found: nodes.len(),
    });
  }
  let referenced = distinct(&graph.edges);
  if edges.len() != referenced {
    return Err(ValidationError::DanglingEdges {
      referenced,
      found: edges.len(),
    });
  }
  Ok(())
}

fn check_endpoints(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
  let known: HashSet<Uuid> = nodes.iter().map(|n| n.id).collect();
  for edge in edges {
    if !known.contains(&edge.src_node) {
      return Err(ValidationError::MissingSource {
        edge: edge.id,
        node: edge.src_node,
      });
    }
    if !known.contains(&edge.dst_node) {
      return Err(ValidationError::MissingDestination {
        edge: edge.id,
        node: edge.dst_node,
      });
    }
  }
  Ok(())
}

fn check_duplicate_edges(graph: &Graph) -> Result<(), ValidationError> {
  let mut seen = HashSet::new();
  match graph.edges.iter().find(|id| !seen.insert(**id)) {
    Some(dup) => Err(ValidationError::DuplicateEdge(*dup)),
    None => Ok(()),
  }
}

fn adjacency(nodes: &[Node], edges: &[Edge]) -> Adjacency {
  let mut adjacency: Adjacency = nodes.iter().map(|n| (n.id, Vec::new())).collect();
  for edge in edges {
    adjacency.entry(edge.src_node).or_default().push(edge.dst_node);
  }
  adjacency
}

fn check_reachability(
  nodes: &[Node],
  adjacency: &Adjacency,
  root_node_ids: &[String],
) -> Result<(), ValidationError> {
  if root_node_ids.is_empty() {
    return Err(ValidationError::NoRoots);
  }
  let mut queue = VecDeque::with_capacity(root_node_ids.len());
  for root in root_node_ids {
    let node = nodes
      .iter()
      .find(|n| &n.node_id == root)
      .ok_or_else(|| ValidationError::UnknownRoot(root.clone()))?;
    queue.push_back(node.id);
  }

  let mut visited: HashSet<Uuid> = queue.iter().copied().collect();
  while let Some(id) = queue.pop_front() {
    for next in adjacency.get(&id).into_iter().flatten() {
      if visited.insert(*next) {
        queue.push_back(*next);
      }
    }
  }

  debug!(reached = visited.len(), total = nodes.len(), "reachability");
  if visited.len() != nodes.len() {
    return Err(ValidationError::Unreachable {
      reached: visited.len(),
      total: nodes.len(),
    });
  }
  Ok(())
}

fn check_acyclic(
  nodes: &[Node],
  edges: &[Edge],
  adjacency: &Adjacency,
) -> Result<(), ValidationError> {
  let mut in_degree: HashMap<Uuid, usize> = HashMap::new();
  for edge in edges {
    *in_degree.entry(edge.dst_node).or_default() += 1;
  }

  let mut queue: VecDeque<Uuid> = nodes
    .iter()
    .map(|n| n.id)
    .filter(|id| !in_degree.contains_key(id))
    .collect();

  let mut processed = 0;
  while let Some(id) = queue.pop_front() {
    processed += 1;
    for next in adjacency.get(&id).into_iter().flatten() {
      let degree = in_degree.entry(*next).or_default();
      *degree = degree.saturating_sub(1);
      if *degree == 0 {
        queue.push_back(*next);
      }
    }
  }

  if processed != nodes.len() {
    return Err(ValidationError::CycleDetected {
      processed,
      total: nodes.len(),
    });
  }
  Ok(())
}

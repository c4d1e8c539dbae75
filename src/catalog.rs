//! Catalog of node, edge and graph definitions.
//!
//! The engine and validator only read through [Catalog]; the CRUD methods back the HTTP
//! management routes. [MemoryCatalog] keeps everything in process.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{Edge, Graph, LoadedGraph, Node};

/// Key-value access to catalog entities by id.
#[async_trait]
pub trait Catalog: Send + Sync {
  async fn create_node(&self, node: Node) -> Result<Node, StoreError>;
  async fn list_nodes(&self) -> Result<Vec<Node>, StoreError>;
  async fn get_node(&self, id: Uuid) -> Result<Option<Node>, StoreError>;
  /// Looks a node up by its user-facing `node_id`.
  async fn find_node(&self, node_id: &str) -> Result<Option<Node>, StoreError>;
  /// Nodes whose id appears in `ids`, once each, in first-reference order. Unknown ids are skipped.
  async fn nodes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Node>, StoreError>;
  async fn update_node(&self, id: Uuid, node: Node) -> Result<Node, StoreError>;
  async fn delete_node(&self, id: Uuid) -> Result<Node, StoreError>;

  async fn create_edge(&self, edge: Edge) -> Result<Edge, StoreError>;
  async fn list_edges(&self) -> Result<Vec<Edge>, StoreError>;
  async fn get_edge(&self, id: Uuid) -> Result<Option<Edge>, StoreError>;
  /// Edges whose id appears in `ids`, once each, in first-reference order. Unknown ids are skipped.
  async fn edges_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Edge>, StoreError>;
  async fn update_edge(&self, id: Uuid, edge: Edge) -> Result<Edge, StoreError>;
  async fn delete_edge(&self, id: Uuid) -> Result<Edge, StoreError>;

  async fn create_graph(&self, graph: Graph) -> Result<Graph, StoreError>;
  async fn list_graphs(&self) -> Result<Vec<Graph>, StoreError>;
  async fn get_graph(&self, id: Uuid) -> Result<Option<Graph>, StoreError>;
  async fn update_graph(&self, id: Uuid, graph: Graph) -> Result<Graph, StoreError>;
  async fn delete_graph(&self, id: Uuid) -> Result<Graph, StoreError>;

  /// Fetches a graph with its nodes and edges populated.
  async fn load_graph(&self, id: Uuid) -> Result<Option<LoadedGraph>, StoreError> {
    let Some(graph) = self.get_graph(id).await? else {
      return Ok(None);
    };
    let nodes = self.nodes_by_ids(&graph.nodes).await?;
    let edges = self.edges_by_ids(&graph.edges).await?;
    Ok(Some(LoadedGraph {
      graph,
      nodes,
      edges,
    }))
  }
}

trait Entity: Clone {
  const KIND: &'static str;
  fn id(&self) -> Uuid;
  fn set_id(&mut self, id: Uuid);
}

impl Entity for Node {
  const KIND: &'static str = "node";
  fn id(&self) -> Uuid {
    self.id
  }
  fn set_id(&mut self, id: Uuid) {
    self.id = id;
  }
}

impl Entity for Edge {
  const KIND: &'static str = "edge";
  fn id(&self) -> Uuid {
    self.id
  }
  fn set_id(&mut self, id: Uuid) {
    self.id = id;
  }
}

impl Entity for Graph {
  const KIND: &'static str = "graph";
  fn id(&self) -> Uuid {
    self.id
  }
  fn set_id(&mut self, id: Uuid) {
    self.id = id;
  }
}

fn get_one<T: Entity>(items: &[T], id: Uuid) -> Option<T> {
  items.iter().find(|e| e.id() == id).cloned()
}

fn get_many<T: Entity>(items: &[T], ids: &[Uuid]) -> Vec<T> {
  let mut seen = HashSet::new();
  ids
    .iter()
    .filter(|id| seen.insert(**id))
    .filter_map(|id| get_one(items, *id))
    .collect()
}

fn replace<T: Entity>(items: &mut [T], id: Uuid, mut value: T) -> Result<T, StoreError> {
  let slot = items
    .iter_mut()
    .find(|e| e.id() == id)
    .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
  value.set_id(id);
  *slot = value.clone();
  Ok(value)
}

fn remove<T: Entity>(items: &mut Vec<T>, id: Uuid) -> Result<T, StoreError> {
  let pos = items
    .iter()
    .position(|e| e.id() == id)
    .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
  Ok(items.remove(pos))
}

/// In-process catalog.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
  nodes: RwLock<Vec<Node>>,
  edges: RwLock<Vec<Edge>>,
  graphs: RwLock<Vec<Graph>>,
}

impl MemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Both endpoints of `edge` must be catalog nodes.
fn check_endpoints(nodes: &[Node], edge: &Edge) -> Result<(), StoreError> {
  for endpoint in [edge.src_node, edge.dst_node] {
    if !nodes.iter().any(|n| n.id == endpoint) {
      return Err(StoreError::InvalidReference(endpoint));
    }
  }
  Ok(())
}

#[async_trait]
impl Catalog for MemoryCatalog {
  #[instrument(level = "trace", skip(self, node), fields(node_id = %node.node_id))]
  async fn create_node(&self, mut node: Node) -> Result<Node, StoreError> {
    let mut nodes = self.nodes.write().await;
    if nodes.iter().any(|n| n.node_id == node.node_id) {
      return Err(StoreError::Conflict(node.node_id));
    }
    node.id = Uuid::new_v4();
    nodes.push(node.clone());
    debug!(id = %node.id, "node created");
    Ok(node)
  }

  async fn list_nodes(&self) -> Result<Vec<Node>, StoreError> {
    Ok(self.nodes.read().await.clone())
  }

  async fn get_node(&self, id: Uuid) -> Result<Option<Node>, StoreError> {
    Ok(get_one(&self.nodes.read().await, id))
  }

  async fn find_node(&self, node_id: &str) -> Result<Option<Node>, StoreError> {
    let nodes = self.nodes.read().await;
    Ok(nodes.iter().find(|n| n.node_id == node_id).cloned())
  }

  async fn nodes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Node>, StoreError> {
    Ok(get_many(&self.nodes.read().await, ids))
  }

  #[instrument(level = "trace", skip(self, node))]
  async fn update_node(&self, id: Uuid, node: Node) -> Result<Node, StoreError> {
    let mut nodes = self.nodes.write().await;
    if nodes
      .iter()
      .any(|n| n.id != id && n.node_id == node.node_id)
    {
      return Err(StoreError::Conflict(node.node_id));
    }
    replace(&mut nodes, id, node)
  }

  /// Refused while any edge references the node. Lock order is nodes, then edges.
  async fn delete_node(&self, id: Uuid) -> Result<Node, StoreError> {
    let mut nodes = self.nodes.write().await;
    let edges = self.edges.read().await;
    let referencing = edges
      .iter()
      .filter(|e| e.src_node == id || e.dst_node == id)
      .count();
    if referencing > 0 {
      return Err(StoreError::NodeInUse {
        id,
        edges: referencing,
      });
    }
    remove(&mut *nodes, id)
  }

  #[instrument(level = "trace", skip(self, edge))]
  async fn create_edge(&self, mut edge: Edge) -> Result<Edge, StoreError> {
    let nodes = self.nodes.read().await;
    check_endpoints(&nodes, &edge)?;
    edge.id = Uuid::new_v4();
    self.edges.write().await.push(edge.clone());
    debug!(id = %edge.id, "edge created");
    Ok(edge)
  }

  async fn list_edges(&self) -> Result<Vec<Edge>, StoreError> {
    Ok(self.edges.read().await.clone())
  }

  async fn get_edge(&self, id: Uuid) -> Result<Option<Edge>, StoreError> {
    Ok(get_one(&self.edges.read().await, id))
  }

  async fn edges_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Edge>, StoreError> {
    Ok(get_many(&self.edges.read().await, ids))
  }

  #[instrument(level = "trace", skip(self, edge))]
  async fn update_edge(&self, id: Uuid, edge: Edge) -> Result<Edge, StoreError> {
    let nodes = self.nodes.read().await;
    check_endpoints(&nodes, &edge)?;
    replace(&mut self.edges.write().await, id, edge)
  }

  async fn delete_edge(&self, id: Uuid) -> Result<Edge, StoreError> {
    remove(&mut *self.edges.write().await, id)
  }

  #[instrument(level = "trace", skip(self, graph), fields(name = %graph.name))]
  async fn create_graph(&self, mut graph: Graph) -> Result<Graph, StoreError> {
    graph.id = Uuid::new_v4();
    graph.created_at = Utc::now();
    self.graphs.write().await.push(graph.clone());
    debug!(id = %graph.id, "graph created");
    Ok(graph)
  }

  async fn list_graphs(&self) -> Result<Vec<Graph>, StoreError> {
    Ok(self.graphs.read().await.clone())
  }

  async fn get_graph(&self, id: Uuid) -> Result<Option<Graph>, StoreError> {
    Ok(get_one(&self.graphs.read().await, id))
  }

  async fn update_graph(&self, id: Uuid, mut graph: Graph) -> Result<Graph, StoreError> {
    let mut graphs = self.graphs.write().await;
    if let Some(existing) = graphs.iter().find(|g| g.id == id) {
      graph.created_at = existing.created_at;
    }
    replace(&mut graphs, id, graph)
  }

  async fn delete_graph(&self, id: Uuid) -> Result<Graph, StoreError> {
    remove(&mut *self.graphs.write().await, id)
  }
}

//! Graph service: validation, runs and result lookups over a catalog and a result store.

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::assembler::{self, LeafOutput, LevelBucket};
use crate::catalog::{Catalog, MemoryCatalog};
use crate::engine::ExecutionEngine;
use crate::error::{RunError, StoreError, ValidationError};
use crate::processor::{DoublingProcessor, NodeProcessor};
use crate::result_store::{MemoryResultStore, ResultStore};
use crate::types::{DataMap, Islands, RunConfig, RunResult};

/// Response message for a successful validation.
pub const VALIDATED_MESSAGE: &str = "Graph validated successfully";
/// Response message for a completed run.
pub const RUN_COMPLETED_MESSAGE: &str = "Graph run completed successfully.";

/// Shared by every request; cheap to clone.
#[derive(Clone)]
pub struct GraphService {
  catalog: Arc<dyn Catalog>,
  results: Arc<dyn ResultStore>,
  processor: Arc<dyn NodeProcessor>,
}

impl GraphService {
  pub fn new(
    catalog: Arc<dyn Catalog>,
    results: Arc<dyn ResultStore>,
    processor: Arc<dyn NodeProcessor>,
  ) -> Self {
    Self {
      catalog,
      results,
      processor,
    }
  }

  /// Memory catalog, memory result store and the doubling processor.
  pub fn in_memory() -> Self {
    Self::new(
      Arc::new(MemoryCatalog::new()),
      Arc::new(MemoryResultStore::new()),
      Arc::new(DoublingProcessor),
    )
  }

  pub fn catalog(&self) -> &dyn Catalog {
    self.catalog.as_ref()
  }

  #[instrument(level = "trace", skip(self, roots))]
  pub async fn validate(&self, graph_id: Uuid, roots: &[String]) -> Result<(), ValidationError> {
    let graph = self
      .catalog
      .get_graph(graph_id)
      .await?
      .ok_or(ValidationError::GraphNotFound(graph_id))?;
    crate::validator::validate_graph(self.catalog.as_ref(), &graph, roots).await
  }

  /// Runs the graph, persists its result and returns the new run id.
  #[instrument(level = "trace", skip(self, config))]
  pub async fn run(&self, graph_id: Uuid, config: &RunConfig) -> Result<String, RunError> {
    let run_id = Uuid::new_v4().simple().to_string();
    let engine = ExecutionEngine::new(self.catalog.as_ref(), self.processor.as_ref());
    let result = engine.run(graph_id, &run_id, config).await?;
    self.results.save(&result).await?;
    info!(run_id = %run_id, graph_id = %graph_id, "run result saved");
    Ok(run_id)
  }

  pub async fn result(&self, run_id: &str) -> Result<RunResult, StoreError> {
    self
      .results
      .load(run_id)
      .await?
      .ok_or_else(|| StoreError::not_found("run result", run_id))
  }

  pub async fn node_output(&self, node_id: &str, run_id: &str) -> Result<DataMap, StoreError> {
    let result = self.result(run_id).await?;
    assembler::node_output(&result, node_id)
      .cloned()
      .ok_or_else(|| StoreError::not_found("node", node_id))
  }

  pub async fn leaf_outputs(&self, run_id: &str) -> Result<Vec<LeafOutput>, StoreError> {
    Ok(assembler::leaf_outputs(&self.result(run_id).await?))
  }

  pub async fn level_wise(&self, run_id: &str) -> Result<Vec<LevelBucket>, StoreError> {
    Ok(assembler::level_wise(&self.result(run_id).await?))
  }

  pub async fn topological_order(&self, run_id: &str) -> Result<Vec<String>, StoreError> {
    Ok(self.result(run_id).await?.topological_order)
  }

  pub async fn islands(&self, run_id: &str) -> Result<Islands, StoreError> {
    Ok(self.result(run_id).await?.islands)
  }
}

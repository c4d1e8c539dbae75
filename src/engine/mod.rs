//! Run engine: in-degree driven topological execution of a stored graph.
//!
//! A run moves through [RunPhase]s: check the config, build the node table, seed the roots,
//! drain the ready queue, finalize enablement, assemble the result. Each step lives in its own
//! module; [ExecutionEngine::run] sequences them and turns step failures into [RunError]s.

mod build_table;
mod check_config;
mod execution_loop;
#[cfg(test)]
mod execution_loop_test;
mod finalize;
mod ready_queue;
mod run_table;
mod seed_roots;
#[cfg(test)]
mod engine_test;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::assembler::assemble;
use crate::catalog::Catalog;
use crate::error::{RunError, RunPhase};
use crate::processor::NodeProcessor;
use crate::types::{RunConfig, RunResult};

pub use build_table::build_table;
pub use check_config::check_config;
pub use execution_loop::run_execution_loop;
pub use finalize::{RESERVED_KEYS, finalize};
pub use ready_queue::ReadyQueue;
pub use run_table::RunTable;
pub use seed_roots::seed_roots;

/// Current phase of one run.
#[derive(Debug)]
struct PhaseTracker {
  phase: RunPhase,
}

impl PhaseTracker {
  fn new() -> Self {
    Self {
      phase: RunPhase::Validating,
    }
  }

  fn advance(&mut self, next: RunPhase) {
    debug!(from = %self.phase, to = %next, "run phase");
    self.phase = next;
  }

  fn fatal(&self, reason: String) -> RunError {
    RunError::Fatal {
      phase: self.phase,
      reason,
    }
  }
}

/// Executes stored graphs against a [RunConfig].
pub struct ExecutionEngine<'a> {
  catalog: &'a dyn Catalog,
  processor: &'a dyn NodeProcessor,
}

impl<'a> ExecutionEngine<'a> {
  pub fn new(catalog: &'a dyn Catalog, processor: &'a dyn NodeProcessor) -> Self {
    Self { catalog, processor }
  }

  /// Runs graph `graph_id` and returns the assembled result. Nothing is persisted here.
  #[instrument(level = "trace", skip(self, config), fields(graph_id = %graph_id))]
  pub async fn run(
    &self,
    graph_id: Uuid,
    run_id: &str,
    config: &RunConfig,
  ) -> Result<RunResult, RunError> {
    let mut tracker = PhaseTracker::new();
    match self.drive(&mut tracker, graph_id, run_id, config).await {
      Ok(result) => {
        tracker.advance(RunPhase::Done);
        info!(
          completed = ?result.topological_order,
          "graph run complete"
        );
        Ok(result)
      }
      Err(e) => {
        error!(phase = %tracker.phase, error = %e, "graph run failed");
        tracker.advance(RunPhase::Failed);
        Err(e)
      }
    }
  }

  async fn drive(
    &self,
    tracker: &mut PhaseTracker,
    graph_id: Uuid,
    run_id: &str,
    config: &RunConfig,
  ) -> Result<RunResult, RunError> {
    check_config(self.catalog, config).await?;

    tracker.advance(RunPhase::Building);
    let graph = self
      .catalog
      .load_graph(graph_id)
      .await?
      .ok_or(RunError::GraphNotFound(graph_id))?;
    let mut table = build_table(&graph, config);

    tracker.advance(RunPhase::Seeding);
    let mut queue = seed_roots(&mut table, config).map_err(|r| tracker.fatal(r))?;

    tracker.advance(RunPhase::Scheduling);
    run_execution_loop(&mut table, &mut queue, config, self.processor)
      .map_err(|r| tracker.fatal(r))?;

    tracker.advance(RunPhase::Finalizing);
    finalize(&mut table);

    tracker.advance(RunPhase::Assembling);
    Ok(assemble(
      run_id,
      graph_id,
      table.nodes(),
      config,
      &table.completed(),
    ))
  }
}

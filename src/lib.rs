//! # graph-runner
//!
//! Validates and executes directed graphs of computation nodes in dependency order.
//!
//! ## Architecture
//!
//! - [catalog]: stored nodes, edges and graphs.
//! - [validator]: structural checks (references, duplicates, reachability, cycles).
//! - [engine]: in-degree driven execution of one run over a per-run node table.
//! - [assembler]: turns the finished table into a [RunResult] and serves read views.
//! - [service] and [api]: the HTTP surface.

pub mod api;
pub mod assembler;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod processor;
pub mod result_store;
pub mod service;
#[cfg(test)]
mod test_fixtures;
pub mod types;
pub mod validator;

pub use catalog::{Catalog, MemoryCatalog};
pub use engine::ExecutionEngine;
pub use error::{ConfigError, ProcessError, RunError, RunPhase, StoreError, ValidationError};
pub use processor::{DoublingProcessor, NodeProcessor};
pub use result_store::{DirResultStore, MemoryResultStore, ResultStore};
pub use service::GraphService;
pub use types::{DataMap, Edge, Graph, Node, RunConfig, RunResult};
pub use validator::validate_graph;

//! Route table.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::service::GraphService;

/// All routes with request tracing and permissive CORS.
pub fn router(service: GraphService) -> Router {
  Router::new()
    .route("/validate-graph/:id", post(handlers::validate_graph))
    .route("/run-graph/:id", post(handlers::run_graph))
    // Both results routes must name their first parameter alike; in the second it is the node_id.
    .route("/graphs/results/:id", get(handlers::run_result))
    .route("/graphs/results/:id/:run_id", get(handlers::node_output))
    .route("/graphs/leaf-outputs/:run_id", get(handlers::leaf_outputs))
    .route("/graphs/level-wise/:run_id", get(handlers::level_wise))
    .route(
      "/graphs/topological-order/:run_id",
      get(handlers::topological_order),
    )
    .route("/graphs/islands/:run_id", get(handlers::islands))
    .route(
      "/nodes",
      get(handlers::list_nodes).post(handlers::create_node),
    )
    .route(
      "/nodes/:id",
      get(handlers::get_node)
        .put(handlers::update_node)
        .delete(handlers::delete_node),
    )
    .route(
      "/edges",
      get(handlers::list_edges).post(handlers::create_edge),
    )
    .route(
      "/edges/:id",
      get(handlers::get_edge)
        .put(handlers::update_edge)
        .delete(handlers::delete_edge),
    )
    .route(
      "/graphs",
      get(handlers::list_graphs).post(handlers::create_graph),
    )
    .route(
      "/graphs/:id",
      get(handlers::get_graph)
        .put(handlers::update_graph)
        .delete(handlers::delete_graph),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(service)
}

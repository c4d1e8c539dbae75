//! Request handlers: validation, runs, result views and catalog CRUD.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::ApiError;
use crate::assembler::{LeafOutput, LevelBucket};
use crate::error::StoreError;
use crate::service::{GraphService, RUN_COMPLETED_MESSAGE, VALIDATED_MESSAGE};
use crate::types::{DataMap, Edge, Graph, Islands, Node, RunConfig, RunResult};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Request body, or a 400 `{"error": ...}` when it is missing or malformed.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn json_body<T>(body: JsonBody<T>) -> Result<T, ApiError> {
  body
    .map(|Json(value)| value)
    .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
  #[serde(default)]
  pub root_inputs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
  #[serde(rename = "runId")]
  pub run_id: String,
  pub message: String,
}

pub async fn validate_graph(
  State(service): State<GraphService>,
  Path(graph_id): Path<Uuid>,
  request: JsonBody<ValidateRequest>,
) -> ApiResult<MessageResponse> {
  let request = json_body(request)?;
  service.validate(graph_id, &request.root_inputs).await?;
  Ok(Json(MessageResponse {
    message: VALIDATED_MESSAGE.to_string(),
  }))
}

pub async fn run_graph(
  State(service): State<GraphService>,
  Path(graph_id): Path<Uuid>,
  config: JsonBody<RunConfig>,
) -> ApiResult<RunResponse> {
  let config = json_body(config)?;
  let run_id = service.run(graph_id, &config).await?;
  info!(run_id = %run_id, graph_id = %graph_id, "run request served");
  Ok(Json(RunResponse {
    run_id,
    message: RUN_COMPLETED_MESSAGE.to_string(),
  }))
}

pub async fn run_result(
  State(service): State<GraphService>,
  Path(run_id): Path<String>,
) -> ApiResult<RunResult> {
  Ok(Json(service.result(&run_id).await?))
}

pub async fn node_output(
  State(service): State<GraphService>,
  Path((node_id, run_id)): Path<(String, String)>,
) -> ApiResult<DataMap> {
  Ok(Json(service.node_output(&node_id, &run_id).await?))
}

pub async fn leaf_outputs(
  State(service): State<GraphService>,
  Path(run_id): Path<String>,
) -> ApiResult<Vec<LeafOutput>> {
  Ok(Json(service.leaf_outputs(&run_id).await?))
}

pub async fn level_wise(
  State(service): State<GraphService>,
  Path(run_id): Path<String>,
) -> ApiResult<Vec<LevelBucket>> {
  Ok(Json(service.level_wise(&run_id).await?))
}

pub async fn topological_order(
  State(service): State<GraphService>,
  Path(run_id): Path<String>,
) -> ApiResult<Vec<String>> {
  Ok(Json(service.topological_order(&run_id).await?))
}

pub async fn islands(
  State(service): State<GraphService>,
  Path(run_id): Path<String>,
) -> ApiResult<Islands> {
  Ok(Json(service.islands(&run_id).await?))
}

// Catalog CRUD.

pub async fn create_node(
  State(service): State<GraphService>,
  node: JsonBody<Node>,
) -> Result<(StatusCode, Json<Node>), ApiError> {
  let node = json_body(node)?;
  let node = service.catalog().create_node(node).await?;
  Ok((StatusCode::CREATED, Json(node)))
}

pub async fn list_nodes(State(service): State<GraphService>) -> ApiResult<Vec<Node>> {
  Ok(Json(service.catalog().list_nodes().await?))
}

pub async fn get_node(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Node> {
  let node = service.catalog().get_node(id).await?;
  node
    .map(Json)
    .ok_or_else(|| StoreError::not_found("node", id).into())
}

pub async fn update_node(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
  node: JsonBody<Node>,
) -> ApiResult<Node> {
  let node = json_body(node)?;
  Ok(Json(service.catalog().update_node(id, node).await?))
}

pub async fn delete_node(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Node> {
  Ok(Json(service.catalog().delete_node(id).await?))
}

pub async fn create_edge(
  State(service): State<GraphService>,
  edge: JsonBody<Edge>,
) -> Result<(StatusCode, Json<Edge>), ApiError> {
  let edge = json_body(edge)?;
  let edge = service.catalog().create_edge(edge).await?;
  Ok((StatusCode::CREATED, Json(edge)))
}

pub async fn list_edges(State(service): State<GraphService>) -> ApiResult<Vec<Edge>> {
  Ok(Json(service.catalog().list_edges().await?))
}

pub async fn get_edge(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Edge> {
  let edge = service.catalog().get_edge(id).await?;
  edge
    .map(Json)
    .ok_or_else(|| StoreError::not_found("edge", id).into())
}

pub async fn update_edge(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
  edge: JsonBody<Edge>,
) -> ApiResult<Edge> {
  let edge = json_body(edge)?;
  Ok(Json(service.catalog().update_edge(id, edge).await?))
}

pub async fn delete_edge(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Edge> {
  Ok(Json(service.catalog().delete_edge(id).await?))
}

pub async fn create_graph(
  State(service): State<GraphService>,
  graph: JsonBody<Graph>,
) -> Result<(StatusCode, Json<Graph>), ApiError> {
  let graph = json_body(graph)?;
  let graph = service.catalog().create_graph(graph).await?;
  info!(graph_id = %graph.id, name = %graph.name, "graph created");
  Ok((StatusCode::CREATED, Json(graph)))
}

pub async fn list_graphs(State(service): State<GraphService>) -> ApiResult<Vec<Graph>> {
  Ok(Json(service.catalog().list_graphs().await?))
}

pub async fn get_graph(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Graph> {
  let graph = service.catalog().get_graph(id).await?;
  graph
    .map(Json)
    .ok_or_else(|| StoreError::not_found("graph", id).into())
}

pub async fn update_graph(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
  graph: JsonBody<Graph>,
) -> ApiResult<Graph> {
  let graph = json_body(graph)?;
  Ok(Json(service.catalog().update_graph(id, graph).await?))
}

pub async fn delete_graph(
  State(service): State<GraphService>,
  Path(id): Path<Uuid>,
) -> ApiResult<Graph> {
  Ok(Json(service.catalog().delete_graph(id).await?))
}

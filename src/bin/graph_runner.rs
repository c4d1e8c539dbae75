//! CLI: serve the graph runner HTTP API.
//!
//! Usage: `graph_runner [--port PORT] [--data-dir DIR]`
//!
//! Set RUST_LOG=graph_runner=trace for TRACE-level span enter/exit and events.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use graph_runner::config::{DEFAULT_PORT, ServerConfig};
use graph_runner::{
  DirResultStore, DoublingProcessor, GraphService, MemoryCatalog, MemoryResultStore, ResultStore,
  api,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Serve the graph runner HTTP API.
#[derive(Parser, Debug)]
#[command(name = "graph_runner")]
#[command(after_help = r#"Environment variables (override the flags when set):
  PORT                    Port to listen on (default: 5000).
  GRAPH_RUNNER_DATA_DIR   Directory for run results; results are kept in memory when unset.

Examples:
  graph_runner
  graph_runner --port 8080 --data-dir /var/lib/graph-runner"#)]
struct Args {
  /// Port to listen on. Overridden by PORT if set.
  #[arg(long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
  port: u16,

  /// Directory for run results. Overridden by GRAPH_RUNNER_DATA_DIR if set.
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .init();

  let args = Args::parse();
  let config = match ServerConfig::from_env(args.port, args.data_dir) {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  };
  info!(port = config.port, data_dir = ?config.data_dir, "options (env or flags)");

  let results: Arc<dyn ResultStore> = match &config.data_dir {
    Some(dir) => Arc::new(DirResultStore::new(dir)),
    None => Arc::new(MemoryResultStore::new()),
  };
  let service = GraphService::new(
    Arc::new(MemoryCatalog::new()),
    results,
    Arc::new(DoublingProcessor),
  );
  let app = api::router(service);

  let addr = format!("0.0.0.0:{}", config.port);
  let listener = match tokio::net::TcpListener::bind(&addr).await {
    Ok(l) => l,
    Err(e) => {
      eprintln!("Error binding {}: {}", addr, e);
      process::exit(1);
    }
  };
  info!(addr = %addr, "graph_runner listening");

  if let Err(e) = axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
  {
    error!(error = %e, "server error");
    process::exit(1);
  }
  info!("graph_runner stopped");
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(error = %e, "failed to listen for Ctrl+C");
    std::future::pending::<()>().await;
  }
  info!("shutdown signal received");
}

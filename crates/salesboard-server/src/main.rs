//! salesboard server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite sale store, and serves the dashboard API over HTTP.
//!
//! # Seeding
//!
//! Records are bulk-loaded from a JSON array of sale objects:
//!
//! ```
//! cargo run -p salesboard-server -- --import seed.json
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::{Json, Router, routing::get};
use clap::Parser;
use salesboard_api::{
  AppState, api_router,
  options::{DEFAULT_TTL, FilterOptionsCache},
};
use salesboard_core::sale::Sale;
use salesboard_store_sqlite::SqliteStore;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "salesboard dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Bulk-load a JSON array of sale records into the store and exit.
  #[arg(long, value_name = "FILE")]
  import: Option<PathBuf>,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `SALESBOARD_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host: String,
  #[serde(default = "default_port")]
  port: u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
  /// Filter-options cache TTL in seconds.
  #[serde(default = "default_cache_ttl_secs")]
  filter_cache_ttl_secs: u64,
}

fn default_host() -> String {
  "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
  8000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("salesboard.db")
}

fn default_cache_ttl_secs() -> u64 {
  DEFAULT_TTL.as_secs()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SALESBOARD"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  // Helper mode: seed the store from a JSON file and exit.
  if let Some(path) = cli.import {
    let raw = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read {path:?}"))?;
    let records: Vec<Sale> = serde_json::from_str(&raw)
      .context("import file is not a JSON array of sale records")?;
    let inserted = store.insert_sales(records).await?;
    tracing::info!(count = inserted, "imported sale records");
    return Ok(());
  }

  // Build application state.
  let state = AppState {
    store:          Arc::new(store),
    filter_options: Arc::new(FilterOptionsCache::new(Duration::from_secs(
      server_cfg.filter_cache_ttl_secs,
    ))),
  };

  let app = Router::new()
    .nest("/api", api_router(state))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    // The dashboard frontend is served from a different origin.
    .layer(CorsLayer::permissive());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok" }))
}

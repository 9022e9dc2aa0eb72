use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crolens_common::observability::{init_logging, LogConfig};
use crolens_config::{CrolensConfig, CrolensConfigLoader};
use crolens_server::handlers::AppState;
use crolens_server::{create_router, AnalysisService};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "crolens-server")]
#[command(about = "Landing-page CRO analysis service")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file. When the file does not
    /// exist, configuration comes from CROLENS_* environment variables
    /// and built-in defaults.
    #[arg(short, long, default_value = "crolens.yaml")]
    config: PathBuf,

    /// Override the listen address from config.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = CrolensConfigLoader::new();
    if args.config.exists() {
        loader = loader.with_file(&args.config);
    }
    let cfg: CrolensConfig = loader.load().context("failed to load configuration")?;

    init_logging(LogConfig {
        app_name: "crolens-server",
        emit_stderr: true,
        ..LogConfig::default()
    })?;

    let service = AnalysisService::from_config(&cfg)
        .map_err(|e| anyhow::anyhow!("failed to build analysis service: {e}"))?;
    let state = AppState {
        service: Arc::new(service),
    };

    let addr = args.listen.unwrap_or(cfg.server.listen_addr);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("crolens server listening on http://{addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}

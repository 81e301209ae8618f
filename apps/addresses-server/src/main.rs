//! HTTP server hosting the addresses admin module.

mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use addresses::AddressesModule;
use anyhow::Context;
use axum::Router;
use axum::body::Body;
use clap::{Parser, Subcommand};
use http::{HeaderName, Request};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info, warn};

use crate::config::{AppConfig, DatabaseConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Parser)]
#[command(name = "addresses-server", about = "Addresses admin server", version)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Default, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    #[default]
    Serve,
    /// Apply database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    logging::init(&cfg.logging)?;
    let db = connect(&cfg.database).await?;

    match cli.command.unwrap_or_default() {
        Command::Migrate => {
            AddressesModule::migrate(&db).await?;
            info!("Migrations applied");
            Ok(())
        }
        Command::Serve => serve(cfg, db).await,
    }
}

async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_conns).sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database at {}", cfg.url))
}

async fn serve(cfg: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    if cfg.database.auto_migrate {
        AddressesModule::migrate(&db).await?;
    }

    let module = AddressesModule::new(Arc::new(db), cfg.addresses);
    let app = with_http_stack(module.router());

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    info!(addr = %listener.local_addr()?, "Addresses server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")
}

fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Request id assignment, request tracing and id propagation to the response.
fn with_http_stack(router: Router) -> Router {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::new(header)),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

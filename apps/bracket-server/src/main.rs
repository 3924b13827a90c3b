mod config;

use anyhow::{Context, Result};
use bracket_service::BracketServiceModule;
use clap::Parser;
use config::AppConfig;
use sea_orm::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "bracket-server", about = "Single-elimination bracket service")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&app_config)?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.log_level)),
        )
        .init();

    tracing::info!("Starting bracket server");

    let database = config::redact_url(&app_config.database_url);
    tracing::info!(%database, "Connecting to database");
    let db = Database::connect(&app_config.database_url)
        .await
        .with_context(|| format!("failed to connect to {}", database))?;
    let db = Arc::new(db);

    let module = BracketServiceModule::new(app_config.bracket.clone());
    module.migrate(&db).await?;
    module.init(db.clone())?;

    let router = module
        .register_rest(axum::Router::new())?
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", app_config.bind_addr))?;
    tracing::info!("Server listening on {}", app_config.bind_addr);

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_ctrl_c(cancel.clone()));

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    tracing::info!("Bracket server stopped");
    Ok(())
}

async fn shutdown_on_ctrl_c(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown requested");
    cancel.cancel();
}

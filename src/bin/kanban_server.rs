//! Serves the kanban board REST API backed by `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! kanban_server [--config <path>] [--bind <addr>] [--database-url <url>]
//! ```
//!
//! Settings are read from built-in defaults, the optional TOML file, then
//! `KANBAN_`-prefixed environment variables; command-line flags win over all
//! of them.

use clap::Parser;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use kanban_board::{
    board::{adapters::postgres::PostgresBoardRepository, services::BoardService},
    config::{ConfigError, ServerConfig},
    http, telemetry,
};
use mockable::DefaultClock;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use thiserror::Error;
use tracing::{info, warn};

/// Kanban board server.
#[derive(Debug, Parser)]
#[command(name = "kanban_server", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding configuration.
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// `PostgreSQL` connection string, overriding configuration.
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
}

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to install log subscriber: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to bootstrap schema: {0}")]
    Schema(#[source] kanban_board::board::ports::BoardRepositoryError),
    #[error("server i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::load(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Cli::parse().into_config()?;
    telemetry::init(&config.log_level)?;

    let manager = ConnectionManager::<PgConnection>::new(config.database_url.clone());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(config.pool_timeout())
        .build(manager)?;
    let repository = PostgresBoardRepository::new(pool);
    if config.bootstrap_schema {
        repository
            .bootstrap_schema()
            .await
            .map_err(ServerError::Schema)?;
        info!("board schema ready");
    }

    let service = Arc::new(BoardService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ));
    let app = http::router(service, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!(
        address = %config.bind_address,
        pool_size = config.pool_size,
        "board server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("board server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

use std::net::TcpListener;

use anyhow::{Context, Result};
use hrms_lite::config::{Config, StoreBackend};
use hrms_lite::db::init_db;
use hrms_lite::server;
use hrms_lite::store::{MemoryStore, MySqlStore};
use tracing::{info, warn};
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    let listener = TcpListener::bind(&config.server_addr)
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;

    match config.store_backend {
        StoreBackend::Mysql => {
            let database_url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set")?;
            let pool = init_db(&database_url, config.db_max_connections).await?;
            info!("Connected to database");
            server::run(MySqlStore::new(pool), config, listener)?.await?;
        }
        StoreBackend::Memory => {
            warn!("Running on the in-memory store; data is lost on restart");
            server::run(MemoryStore::default(), config, listener)?.await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

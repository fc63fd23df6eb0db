use clap::Parser;
use recent_feed::config::redact_database_url;
use recent_feed::{build_router, AppState, Config, Datastore, MemoryDatastore, PgDatastore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    info!("Starting recent entries feed");

    let datastore: Arc<dyn Datastore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database: {}", redact_database_url(database_url));

            let store = PgDatastore::new(database_url).await.map_err(|e| {
                error!("Failed to connect to database: {:#}", e);
                e
            })?;
            store.setup_schema().await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, entries will only live in memory");
            Arc::new(MemoryDatastore::new())
        }
    };

    let state = AppState::new(datastore, config.feed_config());
    let app = build_router(state);

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use careport::api::{start_api_server, ApiContext};
use careport::screening::RandomScreener;
use careport::{config, db};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Careport starting v{}", config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    let conn = match db::open_database(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Cannot open database {}: {e}", db_path.display());
            std::process::exit(1);
        }
    };
    tracing::info!(path = %db_path.display(), "Database ready");

    let ctx = ApiContext::new(conn, Arc::new(RandomScreener));

    let mut server = match start_api_server(ctx, config::bind_addr()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "Careport listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    tracing::info!("Shutting down");
    server.shutdown();
}

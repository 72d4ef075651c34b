use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wallet_ledger_api::config::{Config, LogFormat};
use wallet_ledger_api::database;
use wallet_ledger_api::routes;
use wallet_ledger_api::store::{LedgerStore, MemoryLedgerStore, PgLedgerStore};
use wallet_ledger_api::AppState;

#[derive(Parser)]
#[command(name = "wallet-ledger-api", version, about = "Wallet ledger HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(long)]
        port: Option<u16>,
        /// Keep all data in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        in_memory: false,
    }) {
        Command::Serve { port, in_memory } => serve(config, port, in_memory).await,
        Command::Migrate => {
            let pool = database::create_pool(&config.database_url, 1).await?;
            database::run_migrations(&pool).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wallet_ledger_api=debug,tower_http=debug".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn serve(config: Config, port: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    info!("Starting Wallet Ledger API server...");

    let store: Arc<dyn LedgerStore> = if in_memory {
        warn!("Using in-memory store; all data is lost on shutdown");
        Arc::new(MemoryLedgerStore::new())
    } else {
        let db_pool =
            database::new_pool(&config.database_url, config.database_max_connections).await?;
        info!("Database connection pool created");
        database::run_migrations(&db_pool).await?;
        Arc::new(PgLedgerStore::new(db_pool))
    };

    let app = routes::router(AppState::new(store));

    let addr = format!("0.0.0.0:{}", port.unwrap_or(config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, shutting down gracefully...");
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use helpdesk_core::{load_config, validate_config, MemoryTicketStore, TicketStore};
use helpdesk_server::api::{create_router, spawn_heartbeat, WsBroadcaster};
use helpdesk_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());

    // HELPDESK_LOG_FORMAT=json switches to structured output
    let json = std::env::var("HELPDESK_LOG_FORMAT").is_ok_and(|format| format == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> Result<()> {
    init_logging();
    info!("helpdesk {} starting", VERSION);

    // Determine config path
    let config_path = std::env::var("HELPDESK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Rating policy: {:?}", config.store.rating_policy());

    // Create in-memory ticket store
    let store = if config.store.seed {
        MemoryTicketStore::seeded()
    } else {
        MemoryTicketStore::new()
    };
    let ticket_store: Arc<dyn TicketStore> =
        Arc::new(store.with_rating_policy(config.store.rating_policy()));
    info!(
        "Ticket store initialized with {} tickets",
        ticket_store.count(&Default::default()).unwrap_or_default()
    );

    // Create WebSocket broadcaster for the change feed
    let ws_broadcaster = WsBroadcaster::new(config.ws.channel_capacity);
    let heartbeat = spawn_heartbeat(
        ws_broadcaster.clone(),
        Duration::from_secs(config.ws.heartbeat_secs),
    );
    info!("WebSocket broadcaster initialized");

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), ticket_store, ws_broadcaster));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    heartbeat.abort();

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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

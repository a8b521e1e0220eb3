//! Registration server - entry point.

use registration_server::{
    api::{create_router, AppState},
    config::Config,
    sessions::AdminSessions,
};
use registration_store::{Backing, DocumentStore};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting registration server");

    // Initialize storage
    let backing = if config.store.persist {
        Backing::file(config.store.path.clone())
    } else {
        info!("Persistence disabled, using in-memory storage");
        Backing::memory()
    };

    let store = match DocumentStore::open(backing).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load store: {}", e);
            info!("Starting with an empty in-memory store");
            DocumentStore::memory()
        }
    };

    // Create application state
    let sessions = AdminSessions::new(config.admin.password.clone());
    let state = AppState::new(store, sessions);

    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
